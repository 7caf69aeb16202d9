//! HTTP gateway for the bookmark service.
//!
//! Exposes the bookmark resource as JSON over HTTP with axum. The router
//! table is built once in [`App::router`] from an explicit [`AppState`].

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::{App, CorsPolicy};
pub use state::AppState;
