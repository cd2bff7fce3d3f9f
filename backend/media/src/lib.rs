//! Leaf photo uploads: type detection, validation, storage and serving.

pub mod media_server;
pub mod mime_detect;
pub mod store;

pub use media_server::media_router;
pub use mime_detect::{detect_mime_type, is_image, is_inline_safe, sniff_image_type, upload_mime_type};
pub use store::{
    secure_filename, stored_name, validate_upload, StoredUpload, UploadStore, EMPTY_UPLOAD,
    NO_FILE_SELECTED, UPLOADS_URL_PREFIX,
};
