//! # Core Error Types
//!
//! Recoverable conditions only. Broken invariants (adding a duplicate
//! component, removing a component that is not there) are programmer errors
//! and panic instead; see [`crate::Storage`].

use crate::ecs::entity::Entity;
use thiserror::Error;

/// Errors reported by the entity/component store.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcsError {
    /// The operation was given the null handle or an entity that is not
    /// currently live.
    #[error("invalid entity handle {0}")]
    InvalidEntity(Entity),
}
