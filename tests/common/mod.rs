//! Common test infrastructure
//!
//! Provides an isolated server per test plus a thin HTTP client. Tests
//! should only import from this module, not from internal submodules.

mod client;
mod constants;
mod server;

pub use client::TestClient;
#[allow(unused_imports)]
pub use constants::*;
pub use server::TestServer;
