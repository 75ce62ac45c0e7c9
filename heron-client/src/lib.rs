//! Heron Client - admin dashboard client
//!
//! Headless state layer over the admin REST API: session lifecycle,
//! RBAC permission state with menu derivation, a navigation guard, and
//! the tag-view tab tracker.

pub mod api;
pub mod client;
pub mod config;
pub mod dict;
pub mod error;
pub mod guard;
pub mod http;
pub mod permission;
pub mod session;
pub mod storage;
pub mod tags;

pub use client::AdminClient;
pub use config::ClientConfig;
pub use dict::DictionaryStore;
pub use error::{ClientError, ClientResult};
pub use guard::{GuardDecision, Route, RouteTable, decide};
pub use http::HttpClient;
pub use permission::PermissionStore;
pub use session::SessionStore;
pub use storage::TokenStorage;
pub use tags::{TagView, TagViewTracker};

// Re-export shared types for convenience
pub use shared::{Envelope, Page};
