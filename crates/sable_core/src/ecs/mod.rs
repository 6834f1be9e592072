//! # Entity Component System
//!
//! The store is split along its seams:
//!
//! - [`entity`]: identity lifecycle: issuing, validating, recycling ids.
//!   Never looks at component data.
//! - [`storage`]: one sparse, entity-indexed sequence per component type.
//! - [`registry`]: the type-erased table routing a component type to its
//!   storage. The single integration point all component operations pass
//!   through.
//! - [`world`]: ties allocator and registry together and keeps them
//!   consistent.

pub mod entity;
pub mod registry;
pub mod storage;
pub mod world;

pub use entity::{Entity, EntityAllocator};
pub use registry::{ComponentToken, Registry};
pub use storage::Storage;
pub use world::World;
