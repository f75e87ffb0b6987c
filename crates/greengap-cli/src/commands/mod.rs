//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `shared` - Shared utilities (simulated series, advisor, output helpers)
//! - `simulate` - Synthetic dataset generation
//! - `analyze` - Full analysis over simulated data
//! - `import` - Dataset analysis and what-if scenarios
//! - `serve` - Web server command

pub mod analyze;
pub mod import;
pub mod serve;
pub mod shared;
pub mod simulate;

// Re-export command functions for main.rs
pub use analyze::*;
pub use import::*;
pub use serve::*;
pub use shared::*;
pub use simulate::*;
