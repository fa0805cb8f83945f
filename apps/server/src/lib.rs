//! Review server library.
//!
//! Wires the domain layer from `review-core` to its external collaborators:
//! configuration, logging, the Postgres store adapter, and the axum HTTP
//! transport.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod state;

pub use error::{ApiError, ApiResult};
