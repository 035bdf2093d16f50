use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{ImagePicker, Permission, PickResult, ServiceError};
use crate::model::LocalImage;

/// Returns the MIME type for a supported image extension, or `None`.
pub(crate) fn image_content_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Picker over a path the user typed into the banner prompt.
///
/// When a media root is configured, only files beneath it may be picked.
/// An empty path is treated as the user cancelling.
#[derive(Debug, Clone)]
pub struct FilePathPicker {
    path: PathBuf,
    media_root: Option<PathBuf>,
}

impl FilePathPicker {
    pub fn new(path: impl Into<PathBuf>, media_root: Option<PathBuf>) -> Self {
        Self {
            path: path.into(),
            media_root,
        }
    }

    fn is_empty(&self) -> bool {
        self.path.as_os_str().is_empty()
    }
}

#[async_trait]
impl ImagePicker for FilePathPicker {
    async fn request_permission(&self) -> Result<Permission, ServiceError> {
        let Some(root) = &self.media_root else {
            return Ok(Permission::Granted);
        };
        if self.is_empty() {
            return Ok(Permission::Granted);
        }
        let Ok(root) = tokio::fs::canonicalize(root).await else {
            debug!(root = %root.display(), "picker: media root is not accessible");
            return Ok(Permission::Denied);
        };
        let candidate = tokio::fs::canonicalize(&self.path)
            .await
            .unwrap_or_else(|_| self.path.clone());
        if candidate.starts_with(&root) {
            Ok(Permission::Granted)
        } else {
            Ok(Permission::Denied)
        }
    }

    async fn launch(&self) -> Result<PickResult, ServiceError> {
        if self.is_empty() {
            return Ok(PickResult::Cancelled);
        }
        let metadata = tokio::fs::metadata(&self.path).await?;
        if !metadata.is_file() || image_content_type(&self.path).is_none() {
            return Err(ServiceError::NotAnImage(self.path.clone()));
        }
        Ok(PickResult::Selected(LocalImage::new(&self.path)))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn content_types_by_extension() {
        assert_eq!(image_content_type(Path::new("a.png")), Some("image/png"));
        assert_eq!(image_content_type(Path::new("a.JPG")), Some("image/jpeg"));
        assert_eq!(image_content_type(Path::new("a.jpeg")), Some("image/jpeg"));
        assert_eq!(image_content_type(Path::new("a.txt")), None);
        assert_eq!(image_content_type(Path::new("noext")), None);
    }

    mod permission {
        use super::*;

        #[tokio::test]
        async fn granted_without_media_root() {
            let picker = FilePathPicker::new("/anywhere/a.png", None);
            assert_eq!(picker.request_permission().await.unwrap(), Permission::Granted);
        }

        #[tokio::test]
        async fn granted_inside_media_root() {
            let dir = tempdir().unwrap();
            let file = dir.path().join("banner.png");
            std::fs::write(&file, b"png").unwrap();
            let picker = FilePathPicker::new(&file, Some(dir.path().to_path_buf()));
            assert_eq!(picker.request_permission().await.unwrap(), Permission::Granted);
        }

        #[tokio::test]
        async fn denied_outside_media_root() {
            let root = tempdir().unwrap();
            let other = tempdir().unwrap();
            let file = other.path().join("banner.png");
            std::fs::write(&file, b"png").unwrap();
            let picker = FilePathPicker::new(&file, Some(root.path().to_path_buf()));
            assert_eq!(picker.request_permission().await.unwrap(), Permission::Denied);
        }

        #[tokio::test]
        async fn denied_when_media_root_missing() {
            let dir = tempdir().unwrap();
            let picker = FilePathPicker::new("a.png", Some(dir.path().join("gone")));
            assert_eq!(picker.request_permission().await.unwrap(), Permission::Denied);
        }
    }

    mod launch {
        use super::*;

        #[tokio::test]
        async fn empty_path_cancels() {
            let picker = FilePathPicker::new("", None);
            assert_eq!(picker.launch().await.unwrap(), PickResult::Cancelled);
        }

        #[tokio::test]
        async fn existing_image_is_selected() {
            let dir = tempdir().unwrap();
            let file = dir.path().join("banner.jpg");
            std::fs::write(&file, b"jpg").unwrap();
            let picker = FilePathPicker::new(&file, None);
            assert_eq!(
                picker.launch().await.unwrap(),
                PickResult::Selected(LocalImage::new(&file))
            );
        }

        #[tokio::test]
        async fn non_image_is_rejected() {
            let dir = tempdir().unwrap();
            let file = dir.path().join("notes.txt");
            std::fs::write(&file, b"hi").unwrap();
            let picker = FilePathPicker::new(&file, None);
            assert!(matches!(
                picker.launch().await,
                Err(ServiceError::NotAnImage(_))
            ));
        }

        #[tokio::test]
        async fn missing_file_is_io_error() {
            let dir = tempdir().unwrap();
            let picker = FilePathPicker::new(dir.path().join("gone.png"), None);
            assert!(matches!(picker.launch().await, Err(ServiceError::Io(_))));
        }
    }
}
