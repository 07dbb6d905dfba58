use super::{ImageRef, ImageStore};
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Stores image payloads as uuid-named files under a media directory.
pub struct DiskImageStore {
    media_dir: PathBuf,
}

impl DiskImageStore {
    pub fn new<P: AsRef<Path>>(media_dir: P) -> Result<Self> {
        let media_dir = media_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&media_dir)
            .with_context(|| format!("Failed to create media directory {:?}", media_dir))?;
        Ok(Self { media_dir })
    }

    fn path_for(&self, image_ref: &ImageRef) -> Result<PathBuf> {
        // refs are uuids we minted ourselves; anything path-like is not ours
        if image_ref.0.contains('/') || image_ref.0.contains('\\') || image_ref.0.contains("..") {
            bail!("Malformed image reference: {}", image_ref.0);
        }
        Ok(self.media_dir.join(&image_ref.0))
    }
}

impl ImageStore for DiskImageStore {
    fn store(&self, bytes: &[u8]) -> Result<ImageRef> {
        let image_ref = ImageRef(Uuid::new_v4().to_string());
        let path = self.path_for(&image_ref)?;
        std::fs::write(&path, bytes)
            .with_context(|| format!("Failed to write image payload to {:?}", path))?;
        debug!("Stored {} byte image payload as {}", bytes.len(), image_ref.0);
        Ok(image_ref)
    }

    fn release(&self, image_ref: &ImageRef) -> Result<()> {
        let path = self.path_for(image_ref)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to release image {:?}", path)),
        }
    }
}
