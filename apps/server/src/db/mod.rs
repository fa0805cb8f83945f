//! Postgres-backed store adapter.

mod postgres;

pub use postgres::PostgresStore;
