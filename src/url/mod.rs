//! URL handling module
//!
//! This module resolves links found in page markup against the page they
//! were found on, and recognizes pagination links by their query string.

mod normalize;

// Re-export main functions
pub use normalize::{is_pagination_link, normalize_url};
