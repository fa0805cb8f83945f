//! Domain layer for the review-assignment service.
//!
//! This crate holds the data model, the store abstractions, and the three
//! services that implement the pull-request lifecycle: team management,
//! user activation, and randomized reviewer assignment/reassignment.
//! It knows nothing about HTTP or SQL; the server crate supplies the
//! Postgres-backed store and the transport layer.

pub mod error;
pub mod models;
pub mod picker;
pub mod services;
pub mod store;

pub use error::{Error, Result};
