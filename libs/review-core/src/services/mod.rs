//! Business logic layer.
//!
//! Services orchestrate operations by coordinating stores and applying
//! business rules. They hold no mutable state of their own: every call
//! re-reads from the store, and same-entity write atomicity is delegated
//! to the store implementation.

pub mod pull_request;
pub mod team;
pub mod user;

pub use pull_request::PullRequestService;
pub use team::TeamService;
pub use user::UserService;
