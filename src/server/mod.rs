//! Server module for building the dashboard HTTP server
//!
//! This module provides a `ServerBuilder` that wires the invoice store,
//! route cache and identity provider into the form and panel routes.

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
