//! URL cell validation and image extension inference.
//!
//! Spreadsheet exports leave literal `nan`/`NULL`/boolean text in URL columns;
//! those are rejected here before any network round-trip.

mod extension;
mod path;
mod validate;

pub use extension::{extension_from_content_type, infer_extension, DEFAULT_EXTENSION};
pub use path::extension_from_url_path;
pub use validate::is_valid_url;
