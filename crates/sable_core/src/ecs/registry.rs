//! # Component Registry
//!
//! The type-erased table behind every component operation: it maps a
//! component type to the [`Storage`] holding that type's values, creating
//! the storage lazily on first use.
//!
//! Routing is keyed on [`TypeId`], so two distinct component types can never
//! collide and the same type always reaches the same storage. Each slot owns
//! its storage as a `Box<dyn ErasedStorage>`; the indirection gives every
//! slot the same size no matter what `C` it holds, and recovering the
//! concrete `Storage<C>` is a checked downcast rather than a blind
//! reinterpretation.

use crate::ecs::entity::Entity;
use crate::ecs::storage::Storage;
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Slots start with room for a handful of entities; growth covers the rest.
const INITIAL_STORAGE_CAPACITY: usize = 8;

/// Dense per-type token, assigned in registration order.
///
/// Stable within one registry: the same component type always resolves to
/// the same token, distinct types never share one. Tokens order the
/// per-entity component walk ([`World::for_each_on`]).
///
/// [`World::for_each_on`]: crate::World::for_each_on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentToken(u32);

impl ComponentToken {
    /// 0-based slot index of this token.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Rebuilds a token from a slot index. Crate-internal: only indices that
    /// came out of [`index`](ComponentToken::index) are valid.
    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).expect("component token index overflow"))
    }
}

/// Type-blind view of a [`Storage`], one vtable per component type.
///
/// This is the uniform shape every registry slot stores; everything the
/// world needs to do without knowing `C` goes through here.
pub(crate) trait ErasedStorage: Any {
    /// Upcast for checked downcasting to `Storage<C>`.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Whether `entity` holds a live value in this storage.
    fn contains(&self, entity: Entity) -> bool;

    /// Clears `entity`'s slot if live; missing is fine.
    fn discard(&mut self, entity: Entity);

    /// The live value for `entity` as `&dyn Any`, if present.
    fn component_any(&self, entity: Entity) -> Option<&dyn Any>;

    /// Component type name, for diagnostics.
    fn type_name(&self) -> &'static str;
}

impl<C: 'static> ErasedStorage for Storage<C> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn contains(&self, entity: Entity) -> bool {
        Storage::contains(self, entity)
    }

    fn discard(&mut self, entity: Entity) {
        Storage::discard(self, entity);
    }

    fn component_any(&self, entity: Entity) -> Option<&dyn Any> {
        self.get(entity).map(|value| value as &dyn Any)
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<C>()
    }
}

/// Maps component types to their storages.
///
/// A plain value owned by a [`World`](crate::World); there is no global
/// registry, so independent worlds never share storage and tests stay
/// deterministic. Slots are created lazily and live as long as the registry;
/// they are never individually torn down.
#[derive(Default)]
pub struct Registry {
    tokens: HashMap<TypeId, ComponentToken>,
    slots: Vec<Box<dyn ErasedStorage>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns (or looks up) the token for `C`, creating its storage slot on
    /// first use.
    pub fn register<C: 'static>(&mut self) -> ComponentToken {
        let slots = &mut self.slots;
        *self.tokens.entry(TypeId::of::<C>()).or_insert_with(|| {
            let token =
                ComponentToken(u32::try_from(slots.len()).expect("component type count overflow"));
            slots.push(Box::new(Storage::<C>::with_capacity(
                INITIAL_STORAGE_CAPACITY,
            )));
            token
        })
    }

    /// Returns the storage for `C`, creating it on first use. Never fails.
    pub fn get_or_create<C: 'static>(&mut self) -> &mut Storage<C> {
        let token = self.register::<C>();

        // The token was keyed on C's TypeId, so the downcast cannot fail.
        self.slots[token.index()]
            .as_any_mut()
            .downcast_mut::<Storage<C>>()
            .expect("registry slot holds a different component type")
    }

    /// Returns the storage for `C`, or `None` when `C` was never used.
    #[must_use]
    pub fn get<C: 'static>(&self) -> Option<&Storage<C>> {
        let token = self.token_of::<C>()?;
        self.slots[token.index()].as_any().downcast_ref()
    }

    /// Mutable variant of [`get`](Registry::get); still never creates.
    pub fn get_mut<C: 'static>(&mut self) -> Option<&mut Storage<C>> {
        let token = self.token_of::<C>()?;
        self.slots[token.index()].as_any_mut().downcast_mut()
    }

    /// The token assigned to `C`, or `None` when `C` was never used.
    #[must_use]
    pub fn token_of<C: 'static>(&self) -> Option<ComponentToken> {
        self.tokens.get(&TypeId::of::<C>()).copied()
    }

    /// Number of registered component types.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.slots.len()
    }

    /// Type-blind slot access by token.
    pub(crate) fn slot(&self, token: ComponentToken) -> &dyn ErasedStorage {
        self.slots[token.index()].as_ref()
    }

    /// Mutable type-blind slot access by token.
    pub(crate) fn slot_mut(&mut self, token: ComponentToken) -> &mut dyn ErasedStorage {
        self.slots[token.index()].as_mut()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.slots.iter().map(|slot| slot.type_name()))
            .finish()
    }
}
