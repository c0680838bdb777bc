//! Image extension taken from the URL path.

/// Extensions recognized in a URL path, lowercased.
const IMAGE_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "gif", "webp", "bmp", "tiff", "tif"];

/// Returns the lowercased image extension of the URL path, with a leading dot.
///
/// Query and fragment are ignored. A URL that `url` refuses to parse (e.g. a
/// space in the host) is read as raw text up to the first `?` or `#`. Returns
/// `None` for paths without an extension and for unrecognized extensions.
pub fn extension_from_url_path(url: &str) -> Option<String> {
    let url = url.trim();
    let path = match url::Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => raw_path(url).to_string(),
    };
    let segment = path.rsplit('/').next()?;
    let (_, ext) = segment.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(format!(".{}", ext))
    } else {
        None
    }
}

/// `url` without its query and fragment.
fn raw_path(url: &str) -> &str {
    let end = url.find(|c| c == '?' || c == '#').unwrap_or(url.len());
    &url[..end]
}
