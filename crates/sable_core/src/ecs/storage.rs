//! # Component Storage
//!
//! One sparse, entity-indexed sequence per component type. Slot `i` belongs
//! to entity id `i + 1`; a `Some` slot is a live component, a `None` slot is
//! an empty one (never added, or removed). Holes are expected and never
//! compacted.
//!
//! Growth is append-only: covering a higher entity id extends the sequence
//! in place and never reorders existing slots, so the index-to-entity
//! mapping is stable across growth.

use crate::ecs::entity::Entity;
use std::any::type_name;

/// Sparse storage for a single component type.
///
/// Owned by the [`Registry`](crate::Registry) entry for `C`; the registry is
/// the only way callers reach it. References returned by `get`/`get_mut`
/// stay valid until the next structural mutation (an insert that grows, or a
/// remove) of this storage.
///
/// Absence is not an error, but the two invariant-breaking misuses are:
/// inserting a duplicate and removing what is not there both panic rather
/// than corrupt the entity-to-slot mapping.
#[derive(Debug)]
pub struct Storage<C> {
    slots: Vec<Option<C>>,
}

impl<C> Storage<C> {
    /// Creates an empty storage with room reserved for `capacity` slots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Number of slots (live or empty); always ≥ the highest entity id ever
    /// stored here.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Checks whether any component is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Checks whether `entity` holds a live component.
    #[inline]
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        !entity.is_null()
            && self
                .slots
                .get(entity.index())
                .is_some_and(Option::is_some)
    }

    /// Stores a component for `entity`, growing to cover its slot if needed.
    ///
    /// # Panics
    ///
    /// Panics when `entity` already holds a live `C`. A duplicate add is
    /// caller logic error, not a runtime condition to recover from; halting
    /// beats silently clobbering a live value.
    pub fn insert(&mut self, entity: Entity, value: C) -> &mut C {
        debug_assert!(!entity.is_null());
        let index = entity.index();
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
        }

        let slot = &mut self.slots[index];
        assert!(
            slot.is_none(),
            "duplicate component {} on entity {entity}",
            type_name::<C>(),
        );
        slot.insert(value)
    }

    /// Returns the component for `entity`, or `None` when the handle is
    /// null, the slot is out of range, or the slot is empty.
    #[inline]
    #[must_use]
    pub fn get(&self, entity: Entity) -> Option<&C> {
        if entity.is_null() {
            return None;
        }
        self.slots.get(entity.index())?.as_ref()
    }

    /// Mutable variant of [`get`](Storage::get).
    #[inline]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut C> {
        if entity.is_null() {
            return None;
        }
        self.slots.get_mut(entity.index())?.as_mut()
    }

    /// Takes the component out of `entity`'s slot, leaving a hole.
    ///
    /// # Panics
    ///
    /// Panics when no live `C` exists for `entity` (never added, already
    /// removed, or the null handle); removing what is not there is caller
    /// logic error.
    pub fn remove(&mut self, entity: Entity) -> C {
        let taken = if entity.is_null() {
            None
        } else {
            self.slots.get_mut(entity.index()).and_then(Option::take)
        };
        match taken {
            Some(value) => value,
            None => panic!(
                "no {} component to remove on entity {entity}",
                type_name::<C>(),
            ),
        }
    }

    /// Clears `entity`'s slot if it is live. Unlike [`remove`], missing is
    /// fine; this is the path entity destruction takes.
    ///
    /// [`remove`]: Storage::remove
    pub(crate) fn discard(&mut self, entity: Entity) {
        if entity.is_null() {
            return;
        }
        if let Some(slot) = self.slots.get_mut(entity.index()) {
            *slot = None;
        }
    }

    /// Iterates `(entity, component)` pairs in ascending entity-id order,
    /// skipping empty slots.
    ///
    /// This is also the entity-ordered sequence handed to a serializer at
    /// the persistence boundary.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &C)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let id = u32::try_from(index + 1).ok()?;
            Some((Entity::from_raw(id), slot.as_ref()?))
        })
    }

    /// Visits every live component mutably, ascending entity-id order.
    ///
    /// Structural mutation of this storage from inside `visit` is impossible
    /// (the storage is exclusively borrowed), which is what makes the
    /// reference handed out sound.
    pub fn for_each_mut(&mut self, mut visit: impl FnMut(Entity, &mut C)) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if let (Ok(id), Some(value)) = (u32::try_from(index + 1), slot.as_mut()) {
                visit(Entity::from_raw(id), value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e(id: u32) -> Entity {
        Entity::from_raw(id)
    }

    #[test]
    fn test_insert_get_roundtrip() {
        let mut storage = Storage::with_capacity(8);
        storage.insert(e(1), 42u64);
        assert_eq!(storage.get(e(1)), Some(&42));
        assert_eq!(storage.get(e(2)), None);
        assert!(storage.contains(e(1)));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_get_null_and_out_of_range() {
        let storage: Storage<u64> = Storage::with_capacity(8);
        assert_eq!(storage.get(Entity::NULL), None);
        assert_eq!(storage.get(e(100)), None);
    }

    #[test]
    #[should_panic(expected = "duplicate component")]
    fn test_duplicate_insert_panics() {
        let mut storage = Storage::with_capacity(8);
        storage.insert(e(1), 1u32);
        storage.insert(e(1), 2u32);
    }

    #[test]
    #[should_panic(expected = "no u32 component to remove")]
    fn test_remove_missing_panics() {
        let mut storage: Storage<u32> = Storage::with_capacity(8);
        storage.remove(e(1));
    }

    #[test]
    fn test_remove_then_reinsert() {
        let mut storage = Storage::with_capacity(8);
        storage.insert(e(3), "first".to_string());
        assert_eq!(storage.remove(e(3)), "first");
        assert_eq!(storage.get(e(3)), None);

        // The hole is reusable without hitting the duplicate panic.
        storage.insert(e(3), "second".to_string());
        assert_eq!(storage.get(e(3)).map(String::as_str), Some("second"));
    }

    #[test]
    fn test_growth_preserves_existing() {
        let mut storage = Storage::with_capacity(2);
        storage.insert(e(1), 10i32);
        storage.insert(e(2), 20i32);

        // Crossing the initial capacity must not disturb earlier slots.
        storage.insert(e(40), 400i32);
        assert!(storage.capacity() >= 40);
        assert_eq!(storage.get(e(1)), Some(&10));
        assert_eq!(storage.get(e(2)), Some(&20));
        assert_eq!(storage.get(e(40)), Some(&400));
        assert_eq!(storage.get(e(39)), None);
    }

    #[test]
    fn test_iter_ascending_live_only() {
        let mut storage = Storage::with_capacity(8);
        storage.insert(e(5), 'c');
        storage.insert(e(1), 'a');
        storage.insert(e(3), 'b');
        storage.remove(e(3));

        let visited: Vec<(u32, char)> =
            storage.iter().map(|(en, c)| (en.to_raw(), *c)).collect();
        assert_eq!(visited, vec![(1, 'a'), (5, 'c')]);
    }

    #[test]
    fn test_for_each_mut_mutates_in_place() {
        let mut storage = Storage::with_capacity(8);
        storage.insert(e(1), 1u32);
        storage.insert(e(2), 2u32);
        storage.for_each_mut(|_, value| *value *= 10);
        assert_eq!(storage.get(e(1)), Some(&10));
        assert_eq!(storage.get(e(2)), Some(&20));
    }

    #[test]
    fn test_discard_is_idempotent() {
        let mut storage = Storage::with_capacity(8);
        storage.insert(e(2), 7u8);
        storage.discard(e(2));
        assert_eq!(storage.get(e(2)), None);
        // Missing and out-of-range are both fine here.
        storage.discard(e(2));
        storage.discard(e(99));
        storage.discard(Entity::NULL);
    }
}
