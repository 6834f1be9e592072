//! # Entity Identity
//!
//! Entities are opaque 1-based integer handles. They carry no data of their
//! own; an entity id is a key into the per-type component storages. Id `0`
//! is the reserved null handle.
//!
//! The allocator recycles retired ids through a free list, so `create` is
//! O(1) whether the id is fresh or reused.

use crate::bitset::DynamicBitset;
use crate::error::EcsError;
use std::fmt;

/// Opaque entity handle.
///
/// `0` is the null sentinel ([`Entity::NULL`]); every issued id is positive.
/// At most one live entity holds a given id at a time; an id is reused only
/// after its prior holder was destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Entity(u32);

impl Entity {
    /// Null/invalid entity handle.
    pub const NULL: Self = Self(0);

    /// Wraps a raw id. `0` yields the null handle.
    #[inline]
    #[must_use]
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[inline]
    #[must_use]
    pub const fn to_raw(self) -> u32 {
        self.0
    }

    /// Checks whether this is the null handle.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// 0-based slot index into entity-indexed structures.
    ///
    /// Meaningless for the null handle; callers check `is_null` first.
    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issues, validates and recycles entity ids.
///
/// State is a high-water mark (highest id ever issued), a LIFO free list of
/// retired ids, and a liveness bitset. An id is in exactly one state at a
/// time: unused, live, or retired.
///
/// Destroy is **idempotent by design**: destroying the null handle or an id
/// that is not currently live is a no-op returning `false`, not an error.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    alive: DynamicBitset,
    free: Vec<Entity>,
    high_water: u32,
    live_count: u32,
}

impl EntityAllocator {
    /// Creates an empty allocator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a live entity id. Never fails.
    ///
    /// Pops the free list when possible, otherwise bumps the high-water
    /// mark. Free-list entries resurrected out of band by [`create_at`] are
    /// skipped.
    ///
    /// [`create_at`]: EntityAllocator::create_at
    pub fn create(&mut self) -> Entity {
        while let Some(recycled) = self.free.pop() {
            if self.alive.get(recycled.index()) {
                // Stale entry: create_at revived this id while it sat in
                // the free list.
                continue;
            }
            self.alive.set(recycled.index(), true);
            self.live_count += 1;
            return recycled;
        }

        self.high_water += 1;
        let fresh = Entity::from_raw(self.high_water);
        self.alive.set(fresh.index(), true);
        self.live_count += 1;
        fresh
    }

    /// Issues a specific id, for deterministic replay (e.g. restoring
    /// deserialized entities).
    ///
    /// Falls back to [`create`](EntityAllocator::create) when `desired` is
    /// already live. Ids jumped over when `desired` exceeds the high-water
    /// mark become immediately reusable through the free list.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidEntity`] when `desired` is the null handle.
    pub fn create_at(&mut self, desired: Entity) -> Result<Entity, EcsError> {
        if desired.is_null() {
            return Err(EcsError::InvalidEntity(desired));
        }
        if self.is_alive(desired) {
            return Ok(self.create());
        }

        if desired.to_raw() > self.high_water {
            for skipped in self.high_water + 1..desired.to_raw() {
                self.free.push(Entity::from_raw(skipped));
            }
            self.high_water = desired.to_raw();
        }

        self.alive.set(desired.index(), true);
        self.live_count += 1;
        Ok(desired)
    }

    /// Retires an entity, resetting the caller's handle to [`Entity::NULL`].
    ///
    /// Returns `false` (and changes nothing) for the null handle or an id
    /// that is not currently live; idempotent, consistent with the
    /// allocator-wide destroy policy. On success the id joins the free list
    /// for reuse.
    pub fn destroy(&mut self, entity: &mut Entity) -> bool {
        if entity.is_null() || !self.alive.get(entity.index()) {
            return false;
        }

        self.alive.set(entity.index(), false);
        self.live_count -= 1;
        self.free.push(*entity);
        *entity = Entity::NULL;
        true
    }

    /// Checks whether an id is currently live.
    #[inline]
    #[must_use]
    pub fn is_alive(&self, entity: Entity) -> bool {
        !entity.is_null() && self.alive.get(entity.index())
    }

    /// Number of currently-live entities.
    #[inline]
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.live_count
    }

    /// Highest id ever issued.
    #[inline]
    #[must_use]
    pub const fn high_water(&self) -> u32 {
        self.high_water
    }
}
