//! REST API surface, grouped by backend area
//!
//! Each module extends [`HttpClient`](crate::http::HttpClient) with the
//! endpoints of one area. Auth endpoints live in the session store.

mod department;
mod dict;
mod file;
mod log;
mod notice;
mod permission;
mod role;
mod system;
mod user;
