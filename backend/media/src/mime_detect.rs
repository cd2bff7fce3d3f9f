//! MIME type detection for uploaded leaf photos.
//!
//! Extension first, then magic bytes for files whose name says nothing useful.

use std::path::Path;

/// Detect MIME type by file extension.
pub fn detect_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" | "jfif" => "image/jpeg",
        "png"          => "image/png",
        "gif"          => "image/gif",
        "webp"         => "image/webp",
        "bmp"          => "image/bmp",
        "tiff" | "tif" => "image/tiff",
        "heic"         => "image/heic",
        "avif"         => "image/avif",

        "txt"          => "text/plain",
        "json"         => "application/json",
        "pdf"          => "application/pdf",

        _              => "application/octet-stream",
    }
}

/// Identify common image formats from their leading bytes.
pub fn sniff_image_type(data: &[u8]) -> Option<&'static str> {
    match data {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some("image/png"),
        [b'G', b'I', b'F', b'8', ..] => Some("image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        [b'B', b'M', ..] => Some("image/bmp"),
        [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => Some("image/tiff"),
        _ => None,
    }
}

/// MIME type of an upload: the extension's if it names an image, else the sniffed one.
pub fn upload_mime_type(file_name: &str, data: &[u8]) -> &'static str {
    let by_name = detect_mime_type(Path::new(file_name));
    if is_image(by_name) {
        return by_name;
    }
    sniff_image_type(data).unwrap_or(by_name)
}

/// Whether a MIME type is for an image.
pub fn is_image(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// Whether a file is safe to serve inline (not just download).
pub fn is_inline_safe(mime: &str) -> bool {
    matches!(
        mime,
        "image/jpeg" | "image/png" | "image/gif" | "image/webp" | "image/bmp"
    )
}
