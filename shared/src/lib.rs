//! Shared types for the Heron admin console
//!
//! Wire DTOs, the uniform response envelope and the permission tree
//! derivation used by both heron-client and heron-mock.

pub mod models;
pub mod response;

// Re-exports
pub use response::{CODE_SUCCESS, Envelope, Page};
pub use serde::{Deserialize, Serialize};

pub use models::permission::{build_menu_tree, build_permission_tree};
