//! # World
//!
//! The owner of the whole store: an [`EntityAllocator`] for identity, a
//! [`Registry`] for per-type storage, and the per-entity index of attached
//! component types that keeps the two consistent.

use crate::bitset::DynamicBitset;
use crate::ecs::entity::{Entity, EntityAllocator};
use crate::ecs::registry::{ComponentToken, Registry};
use crate::ecs::storage::Storage;
use crate::error::EcsError;
use std::any::Any;

/// Entity/component store.
///
/// A plain value: create as many independent worlds as needed, nothing is
/// shared between them. Not thread-safe; callers using a world from more
/// than one thread must serialize access themselves.
///
/// Destroy follows the allocator's idempotent policy: destroying the null
/// handle or a dead id is a no-op returning `false`.
#[derive(Debug, Default)]
pub struct World {
    allocator: EntityAllocator,
    registry: Registry,
    /// Per entity slot, the set of component tokens it currently holds.
    /// Maintained by `add`/`remove`/`destroy`; drives `for_each_on` and
    /// component teardown without scanning every registered type.
    attachments: Vec<DynamicBitset>,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a live entity. Never fails.
    pub fn create(&mut self) -> Entity {
        self.allocator.create()
    }

    /// Creates an entity with a specific id, for deterministic replay.
    ///
    /// Falls back to a fresh id when `desired` is already live.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidEntity`] when `desired` is the null handle.
    pub fn create_at(&mut self, desired: Entity) -> Result<Entity, EcsError> {
        self.allocator.create_at(desired)
    }

    /// Destroys an entity along with every component it holds, resetting
    /// the caller's handle to [`Entity::NULL`].
    ///
    /// Returns `false` (and changes nothing) for the null handle or a dead
    /// id. A recycled id always starts componentless.
    pub fn destroy(&mut self, entity: &mut Entity) -> bool {
        if !self.allocator.is_alive(*entity) {
            return false;
        }
        let index = entity.index();

        if let Some(held) = self.attachments.get_mut(index) {
            let doomed = *entity;
            for token in held.ones() {
                self.registry
                    .slot_mut(ComponentToken::from_index(token))
                    .discard(doomed);
            }
            held.clear();
        }

        self.allocator.destroy(entity)
    }

    /// Checks whether an id is currently live.
    #[inline]
    #[must_use]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.allocator.is_alive(entity)
    }

    /// Number of currently-live entities.
    #[inline]
    #[must_use]
    pub fn entity_count(&self) -> u32 {
        self.allocator.count()
    }

    /// Attaches a component to a live entity, returning a reference to the
    /// stored value.
    ///
    /// # Errors
    ///
    /// [`EcsError::InvalidEntity`] for the null handle or a dead entity.
    ///
    /// # Panics
    ///
    /// Panics when `entity` already holds a live `C`: a duplicate add is
    /// caller logic error (see [`Storage::insert`]).
    pub fn add<C: 'static>(&mut self, entity: Entity, value: C) -> Result<&mut C, EcsError> {
        if !self.allocator.is_alive(entity) {
            return Err(EcsError::InvalidEntity(entity));
        }

        let token = self.registry.register::<C>();
        let index = entity.index();
        if index >= self.attachments.len() {
            self.attachments.resize_with(index + 1, DynamicBitset::new);
        }
        self.attachments[index].set(token.index(), true);

        Ok(self.registry.get_or_create::<C>().insert(entity, value))
    }

    /// Returns the component of type `C` on `entity`, or `None` when `C`
    /// was never used, the entity is out of range, or no live value exists.
    /// Absence is not an error.
    #[must_use]
    pub fn get<C: 'static>(&self, entity: Entity) -> Option<&C> {
        self.registry.get::<C>()?.get(entity)
    }

    /// Mutable variant of [`get`](World::get).
    pub fn get_mut<C: 'static>(&mut self, entity: Entity) -> Option<&mut C> {
        self.registry.get_mut::<C>()?.get_mut(entity)
    }

    /// Detaches and returns the component of type `C` on `entity`.
    ///
    /// # Panics
    ///
    /// Panics when no live `C` exists for `entity` (see
    /// [`Storage::remove`]).
    pub fn remove<C: 'static>(&mut self, entity: Entity) -> C {
        let token = self.registry.token_of::<C>();
        let value = self
            .registry
            .get_mut::<C>()
            .unwrap_or_else(|| {
                panic!(
                    "no {} component to remove on entity {entity}",
                    std::any::type_name::<C>(),
                )
            })
            .remove(entity);

        if let (Some(token), Some(held)) = (token, self.attachments.get_mut(entity.index())) {
            held.set(token.index(), false);
        }
        value
    }

    /// Checks whether `entity` holds a live component of type `C`.
    #[must_use]
    pub fn has<C: 'static>(&self, entity: Entity) -> bool {
        self.registry
            .get::<C>()
            .is_some_and(|storage| storage.contains(entity))
    }

    /// Visits every live `(entity, component)` pair of type `C`, ascending
    /// entity-id order. A no-op when `C` was never used.
    ///
    /// Single-type only by design: intersecting multiple component types is
    /// composed by the caller out of `get` calls.
    pub fn for_each<C: 'static>(&mut self, visit: impl FnMut(Entity, &mut C)) {
        if let Some(storage) = self.registry.get_mut::<C>() {
            storage.for_each_mut(visit);
        }
    }

    /// Visits every live component attached to one entity, in ascending
    /// token (registration) order, as `&dyn Any`.
    pub fn for_each_on(&self, entity: Entity, mut visit: impl FnMut(ComponentToken, &dyn Any)) {
        if entity.is_null() {
            return;
        }
        let Some(held) = self.attachments.get(entity.index()) else {
            return;
        };

        for index in held.ones() {
            let token = ComponentToken::from_index(index);
            if let Some(value) = self.registry.slot(token).component_any(entity) {
                visit(token, value);
            }
        }
    }

    /// Read access to the storage for `C`, if `C` was ever used. This is
    /// the hook a serializer uses to pull entity-ordered sequences.
    #[must_use]
    pub fn storage<C: 'static>(&self) -> Option<&Storage<C>> {
        self.registry.get::<C>()
    }

    /// Mutable storage access; creates the storage on first use.
    pub fn storage_mut<C: 'static>(&mut self) -> &mut Storage<C> {
        self.registry.get_or_create::<C>()
    }

    /// The token assigned to `C`, or `None` when `C` was never used.
    #[must_use]
    pub fn token_of<C: 'static>(&self) -> Option<ComponentToken> {
        self.registry.token_of::<C>()
    }
}
