//! Shared constants for end-to-end tests

use fourcut_album_server::album::UserId;

/// User who creates the albums in the fixtures, hence their owner.
pub const OWNER: UserId = 1;

/// User listed in the member set of fixture albums.
pub const MEMBER: UserId = 2;

/// User listed in the guest set of fixture albums.
pub const GUEST: UserId = 3;

/// User outside every membership set.
pub const OUTSIDER: UserId = 99;

/// How long to wait for a spawned server to accept requests.
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Per-request timeout.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
