//! Usable-URL check for raw cell text.

/// Tokens that spreadsheet exports produce for empty or non-URL cells.
const NULL_LIKE: [&str; 7] = ["", "nan", "none", "null", "na", "true", "false"];

/// True only for an absolute `http://` or `https://` URL after trimming.
///
/// Null-like tokens (compared case-insensitively) are rejected.
pub fn is_valid_url(value: Option<&str>) -> bool {
    let Some(value) = value else {
        return false;
    };
    let s = value.trim().to_lowercase();
    if NULL_LIKE.contains(&s.as_str()) {
        return false;
    }
    s.starts_with("http://") || s.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_and_null_like() {
        assert!(!is_valid_url(None));
        assert!(!is_valid_url(Some("")));
        assert!(!is_valid_url(Some("  ")));
        assert!(!is_valid_url(Some("NaN")));
        assert!(!is_valid_url(Some("NULL")));
        assert!(!is_valid_url(Some(" none ")));
        assert!(!is_valid_url(Some("NA")));
        assert!(!is_valid_url(Some("TRUE")));
        assert!(!is_valid_url(Some("false")));
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(!is_valid_url(Some("ftp://x")));
        assert!(!is_valid_url(Some("data:image/png;base64,AAAA")));
        assert!(!is_valid_url(Some("www.example.com/a.jpg")));
    }

    #[test]
    fn accepts_http_and_https() {
        assert!(is_valid_url(Some("https://x/y.jpg")));
        assert!(is_valid_url(Some("  HTTP://X/Y.JPG  ")));
    }
}
