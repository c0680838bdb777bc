//! Extension inference: URL path first, then Content-Type, then `.jpg`.

use super::path::extension_from_url_path;

/// Used when neither the URL nor the Content-Type names a known image type.
pub const DEFAULT_EXTENSION: &str = ".jpg";

/// Maps the primary Content-Type token (before `;`) to an extension.
pub fn extension_from_content_type(content_type: &str) -> Option<&'static str> {
    let primary = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    match primary.as_str() {
        "image/jpeg" | "image/jpg" => Some(".jpg"),
        "image/png" => Some(".png"),
        "image/gif" => Some(".gif"),
        "image/webp" => Some(".webp"),
        "image/bmp" => Some(".bmp"),
        "image/tiff" => Some(".tif"),
        _ => None,
    }
}

/// Leading-dot extension for a downloaded image.
///
/// # Examples
///
/// - `infer_extension("http://x/y.PNG?v=2", None)` → `".png"`
/// - `infer_extension("http://x/y", Some("image/webp; charset=binary"))` → `".webp"`
/// - `infer_extension("http://x/y", None)` → `".jpg"`
pub fn infer_extension(url: &str, content_type: Option<&str>) -> String {
    if let Some(ext) = extension_from_url_path(url) {
        return ext;
    }
    content_type
        .and_then(extension_from_content_type)
        .unwrap_or(DEFAULT_EXTENSION)
        .to_string()
}
