//! URL handling module for pagesift
//!
//! This module provides link resolution against a base page, origin keys for
//! the robots cache, and same-host checks for the pagination guard.

mod host;
mod resolve;

// Re-export main functions
pub use host::{origin_key, same_host};
pub use resolve::resolve_href;
