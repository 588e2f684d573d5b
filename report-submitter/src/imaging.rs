use async_trait::async_trait;

use crate::models::ImageReference;

/// Platform seam for the photo pickers. Library and camera each run their own
/// permission flow; `None` covers both denial and the user closing the picker
/// without selecting, and neither is an error.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn pick_from_library(&self) -> Option<ImageReference>;
    async fn capture_from_camera(&self) -> Option<ImageReference>;
}

/// Picker backed by a local file path (CLI). The "library" is the filesystem;
/// a missing file behaves like a cancelled pick. There is no camera on this
/// platform, so capture always comes back empty.
pub struct FileImageSource {
    path: std::path::PathBuf,
}

impl FileImageSource {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ImageSource for FileImageSource {
    async fn pick_from_library(&self) -> Option<ImageReference> {
        match tokio::fs::metadata(&self.path).await {
            Ok(meta) if meta.is_file() => {
                Some(ImageReference::new(self.path.to_string_lossy().to_string()))
            }
            _ => {
                tracing::warn!("image not found at {}", self.path.display());
                None
            }
        }
    }

    async fn capture_from_camera(&self) -> Option<ImageReference> {
        tracing::warn!("camera capture is not available here");
        None
    }
}
