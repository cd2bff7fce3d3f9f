//! Upload store: validates, names and persists uploaded leaf photos.
//!
//! Stored names are `<YYYYmmdd_HHMMSS>_<sanitized original name>` in local
//! time, so the upload folder sorts chronologically.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use krishimitra_core::KrishiError;
use serde::Serialize;
use tokio::fs;
use tracing::{debug, info};

use crate::mime_detect::{is_image, upload_mime_type};

pub const NO_FILE_SELECTED: &str = "No file selected";
pub const EMPTY_UPLOAD: &str = "Uploaded file is empty";

/// Name used when sanitizing leaves nothing of the original.
const FALLBACK_NAME: &str = "upload";

/// URL prefix the gateway serves stored uploads under.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// A persisted upload.
#[derive(Debug, Clone, Serialize)]
pub struct StoredUpload {
    pub file_name: String,
    #[serde(skip)]
    pub path: PathBuf,
    pub mime_type: &'static str,
    pub size_bytes: usize,
}

impl StoredUpload {
    /// Public URL of the stored file.
    pub fn url(&self) -> String {
        format!("{UPLOADS_URL_PREFIX}/{}", self.file_name)
    }
}

/// Check an upload before anything is written and return its MIME type.
pub fn validate_upload(file_name: Option<&str>, data: &[u8]) -> Result<&'static str, KrishiError> {
    let name = match file_name {
        Some(name) if !name.is_empty() => name,
        _ => return Err(KrishiError::InvalidUpload(NO_FILE_SELECTED.into())),
    };
    if data.is_empty() {
        return Err(KrishiError::InvalidUpload(EMPTY_UPLOAD.into()));
    }
    let mime = upload_mime_type(name, data);
    if !is_image(mime) {
        return Err(KrishiError::UnsupportedMedia(mime.into()));
    }
    Ok(mime)
}

/// Reduce a client-supplied file name to a safe ASCII name.
///
/// Path separators and whitespace runs become `_`, anything outside
/// `[A-Za-z0-9._-]` is dropped, and leading/trailing dots and underscores are
/// trimmed.
pub fn secure_filename(name: &str) -> String {
    let spaced: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Timestamped storage name for an upload.
pub fn stored_name(timestamp: NaiveDateTime, original_name: &str) -> String {
    format!(
        "{}_{}",
        timestamp.format("%Y%m%d_%H%M%S"),
        secure_filename(original_name)
    )
}

/// Directory-backed upload store. Cheap to clone.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: Arc<PathBuf>,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Arc::new(dir.into()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> Result<(), KrishiError> {
        fs::create_dir_all(self.dir.as_path()).await.map_err(|e| {
            KrishiError::Storage(format!(
                "failed to create upload directory {}: {e}",
                self.dir.display()
            ))
        })
    }

    /// Validate and persist an upload under the current local time.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> Result<StoredUpload, KrishiError> {
        self.save_at(Local::now().naive_local(), original_name, data).await
    }

    pub async fn save_at(
        &self,
        timestamp: NaiveDateTime,
        original_name: &str,
        data: &[u8],
    ) -> Result<StoredUpload, KrishiError> {
        let mime_type = validate_upload(Some(original_name), data)?;
        self.ensure_dir().await?;

        let file_name = stored_name(timestamp, original_name);
        let path = self.dir.join(&file_name);
        fs::write(&path, data).await.map_err(|e| {
            KrishiError::Storage(format!("failed to write {}: {e}", path.display()))
        })?;

        info!(file = %file_name, bytes = data.len(), mime = mime_type, "Stored upload");
        Ok(StoredUpload {
            file_name,
            path,
            mime_type,
            size_bytes: data.len(),
        })
    }

    /// Path of a stored upload, or `None` if the name could escape the store.
    pub fn resolve(&self, file_name: &str) -> Option<PathBuf> {
        if file_name.is_empty()
            || file_name.contains("..")
            || file_name.contains('/')
            || file_name.contains('\\')
        {
            debug!(file = %file_name, "Rejected upload path");
            return None;
        }
        Some(self.dir.join(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 7)
            .unwrap()
    }

    #[test]
    fn sanitizes_file_names() {
        assert_eq!(secure_filename("my leaf photo.jpg"), "my_leaf_photo.jpg");
        assert_eq!(secure_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(secure_filename("C:\\Users\\me\\leaf.png"), "C_Users_me_leaf.png");
        assert_eq!(secure_filename("  .hidden.jpg"), "hidden.jpg");
        assert_eq!(secure_filename("पत्ता.jpg"), "jpg");
        assert_eq!(secure_filename("..."), "upload");
    }

    #[test]
    fn stored_name_is_timestamped() {
        assert_eq!(stored_name(at(), "leaf.jpg"), "20240309_140507_leaf.jpg");
    }

    #[test]
    fn validation_rejects_missing_name_and_empty_data() {
        let err = validate_upload(Some(""), JPEG).unwrap_err();
        assert_eq!(err.to_string(), NO_FILE_SELECTED);
        let err = validate_upload(None, JPEG).unwrap_err();
        assert_eq!(err.to_string(), NO_FILE_SELECTED);
        let err = validate_upload(Some("leaf.jpg"), &[]).unwrap_err();
        assert_eq!(err.to_string(), EMPTY_UPLOAD);
    }

    #[test]
    fn validation_rejects_non_images() {
        let err = validate_upload(Some("notes.txt"), b"hello").unwrap_err();
        assert!(matches!(err, KrishiError::UnsupportedMedia(ref m) if m == "text/plain"));
        assert_eq!(validate_upload(Some("leaf"), JPEG).unwrap(), "image/jpeg");
    }

    #[tokio::test]
    async fn saves_into_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path().join("uploads"));

        let stored = store.save_at(at(), "leaf one.jpg", JPEG).await.unwrap();
        assert_eq!(stored.file_name, "20240309_140507_leaf_one.jpg");
        assert_eq!(stored.url(), "/uploads/20240309_140507_leaf_one.jpg");
        assert_eq!(stored.size_bytes, JPEG.len());
        assert_eq!(std::fs::read(&stored.path).unwrap(), JPEG);
    }

    #[tokio::test]
    async fn save_validates_first() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path().join("uploads"));
        assert!(store.save("leaf.jpg", &[]).await.is_err());
        assert!(!store.dir().exists());
    }

    #[test]
    fn resolve_rejects_traversal() {
        let store = UploadStore::new("/srv/uploads");
        assert!(store.resolve("../secret").is_none());
        assert!(store.resolve("a/b.jpg").is_none());
        assert!(store.resolve("").is_none());
        assert_eq!(
            store.resolve("20240309_140507_leaf.jpg"),
            Some(PathBuf::from("/srv/uploads/20240309_140507_leaf.jpg"))
        );
    }
}
