//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod analysis;
pub mod status;
pub mod upload;

// Re-export all handlers for use in router
pub use analysis::*;
pub use status::*;
pub use upload::*;
