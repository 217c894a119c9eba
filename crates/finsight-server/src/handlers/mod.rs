//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod categorize;
pub mod chat;
pub mod health;
pub mod investment;
pub mod needs;
pub mod predictions;

// Re-export all handlers for use in router
pub use categorize::*;
pub use chat::*;
pub use health::*;
pub use investment::*;
pub use needs::*;
pub use predictions::*;
