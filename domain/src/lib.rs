//! This module re-exports various items from the `entity_api` crate.
//!
//! The purpose of this re-export is to ensure that consumers of the `domain` crate do not need to
//! directly depend on the `entity_api` crate. By re-exporting these items, we provide a clear and
//! consistent interface for working with partial updates within the domain layer, while the
//! underlying implementation details remain in the `entity_api` crate.
pub use entity_api::mutate::{IntoUpdateMap, UpdateMap};

// Re-exports from `entity` crate via `entity_api`
pub use entity_api::{notebooks, pages, priority, task_status, tasks, users, Id};

pub mod assist;
pub mod error;
pub mod gateway;
pub mod jwt;
pub mod notebook;
pub mod page;
pub mod task;
pub mod user;

mod notify;
