mod disk_image_store;

pub use disk_image_store::DiskImageStore;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Stable reference to an image payload held outside the core. The core
/// never inspects the payload, it only holds and forwards the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef(pub String);

/// Interface to the external image storage collaborator.
pub trait ImageStore: Send + Sync {
    /// Stores the payload and returns a reference to it.
    fn store(&self, bytes: &[u8]) -> Result<ImageRef>;

    /// Releases the referenced payload. Releasing a reference that is
    /// already gone is not an error.
    fn release(&self, image_ref: &ImageRef) -> Result<()>;
}

/// In-memory stand-in used by tests: hands out sequential references and
/// remembers what was released.
#[derive(Default)]
pub struct NoOpImageStore {
    stored: Mutex<Vec<ImageRef>>,
    released: Mutex<Vec<ImageRef>>,
}

impl NoOpImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored_refs(&self) -> Vec<ImageRef> {
        self.stored.lock().unwrap().clone()
    }

    pub fn released_refs(&self) -> Vec<ImageRef> {
        self.released.lock().unwrap().clone()
    }
}

impl ImageStore for NoOpImageStore {
    fn store(&self, _bytes: &[u8]) -> Result<ImageRef> {
        let mut stored = self.stored.lock().unwrap();
        let image_ref = ImageRef(format!("noop-{}", stored.len()));
        stored.push(image_ref.clone());
        Ok(image_ref)
    }

    fn release(&self, image_ref: &ImageRef) -> Result<()> {
        self.released.lock().unwrap().push(image_ref.clone());
        Ok(())
    }
}
