//! # Sable Core
//!
//! An entity/component data store: lightweight integer handles ("entities")
//! with arbitrary, independently-typed data records ("components") attached
//! to them.
//!
//! ## Design
//!
//! - Entities are opaque 1-based ids; `0` is the reserved null handle.
//!   Retired ids are recycled through a free list in O(1).
//! - Each component type gets its own sparse [`Storage`], created lazily on
//!   first use and routed through a type-erased [`Registry`].
//! - Iteration is single-type only; composing multi-type queries is left to
//!   the caller.
//!
//! Nothing in this crate is thread-safe. A [`World`] is a plain value; a
//! caller that wants shared access must serialize it.
//!
//! ## Example
//!
//! ```
//! use sable_core::World;
//!
//! #[derive(Debug, PartialEq)]
//! struct Position { x: f32, y: f32 }
//!
//! let mut world = World::new();
//! let e = world.create();
//! world.add(e, Position { x: 1.0, y: 2.0 }).unwrap();
//! assert_eq!(world.get::<Position>(e), Some(&Position { x: 1.0, y: 2.0 }));
//! ```

pub mod bitset;
pub mod ecs;
mod error;
pub mod serial;

pub use bitset::DynamicBitset;
pub use ecs::entity::{Entity, EntityAllocator};
pub use ecs::registry::{ComponentToken, Registry};
pub use ecs::storage::Storage;
pub use ecs::world::World;
pub use error::EcsError;
pub use serial::Record;
