//! End-to-end scenarios against the public `World` surface.

use sable_core::serial::{read_components, write_components, Record};
use sable_core::{DynamicBitset, Entity, World};
use std::io::{self, Read, Write};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Position {
    x: f32,
    y: f32,
}

impl Record for Position {
    fn encode<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.x.encode(out)?;
        self.y.encode(out)
    }

    fn decode<R: Read>(input: &mut R) -> io::Result<Self> {
        Ok(Self {
            x: f32::decode(input)?,
            y: f32::decode(input)?,
        })
    }
}

#[test]
fn bitset_grows_past_initial_capacity() {
    let mut bits = DynamicBitset::with_capacity(8);
    bits.set(10, true);
    assert!(bits.get(10));
    assert!(!bits.get(9));
}

#[test]
fn live_entities_never_share_an_id() {
    let mut world = World::new();
    let mut handles: Vec<Entity> = (0..32).map(|_| world.create()).collect();

    // Churn: retire every other entity, then create a fresh batch.
    for handle in handles.iter_mut().skip(1).step_by(2) {
        world.destroy(handle);
    }
    for _ in 0..16 {
        handles.push(world.create());
    }

    let live: Vec<Entity> = handles
        .iter()
        .copied()
        .filter(|e| world.is_alive(*e))
        .collect();
    let mut deduped = live.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(live.len(), deduped.len());
    assert_eq!(world.entity_count(), 32);
}

#[test]
fn destroyed_id_is_reused_immediately() {
    let mut world = World::new();
    world.create();
    let mut e = world.create();
    let retired = e;
    world.destroy(&mut e);

    assert_eq!(world.create(), retired);
}

#[test]
fn destroy_of_never_created_entity_is_a_noop() {
    let mut world = World::new();
    world.create();

    let mut phantom = Entity::from_raw(2);
    assert!(!world.destroy(&mut phantom));
    assert_eq!(world.entity_count(), 1);
}

#[test]
fn for_each_position_yields_exactly_the_live_pairs() {
    let mut world = World::new();
    let e1 = world.create();
    let _e2 = world.create();
    let e3 = world.create();

    world.add(e1, Position { x: 1.0, y: 1.0 }).unwrap();
    world.add(e3, Position { x: 3.0, y: 3.0 }).unwrap();

    let mut visited = Vec::new();
    world.for_each::<Position>(|entity, pos| visited.push((entity, *pos)));
    assert_eq!(
        visited,
        vec![
            (e1, Position { x: 1.0, y: 1.0 }),
            (e3, Position { x: 3.0, y: 3.0 }),
        ]
    );
}

#[test]
fn growth_preserves_earlier_components() {
    let mut world = World::new();
    let early: Vec<Entity> = (0..4).map(|_| world.create()).collect();
    for (i, e) in early.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        world.add(*e, Position { x: i as f32, y: 0.0 }).unwrap();
    }

    // Push a component well past the initial storage capacity.
    let far = world.create_at(Entity::from_raw(100)).unwrap();
    world.add(far, Position { x: 100.0, y: 0.0 }).unwrap();

    for (i, e) in early.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let expected = Position { x: i as f32, y: 0.0 };
        assert_eq!(world.get::<Position>(*e), Some(&expected));
    }
    assert_eq!(world.get::<Position>(far), Some(&Position { x: 100.0, y: 0.0 }));
}

#[test]
fn save_and_restore_through_create_at() {
    let mut world = World::new();
    let a = world.create();
    let mut b = world.create();
    let c = world.create();
    world.add(a, Position { x: 1.0, y: 2.0 }).unwrap();
    world.add(c, Position { x: 3.0, y: 4.0 }).unwrap();
    world.destroy(&mut b);

    let mut bytes = Vec::new();
    write_components(world.storage::<Position>().unwrap(), &mut bytes).unwrap();

    // Rebuild into a fresh world with the recorded ids.
    let mut restored = World::new();
    for (entity, position) in read_components::<Position, _>(&mut bytes.as_slice()).unwrap() {
        let issued = restored.create_at(entity).unwrap();
        assert_eq!(issued, entity);
        restored.add(issued, position).unwrap();
    }

    assert_eq!(restored.get::<Position>(a), Some(&Position { x: 1.0, y: 2.0 }));
    assert_eq!(restored.get::<Position>(c), Some(&Position { x: 3.0, y: 4.0 }));

    let mut visited = Vec::new();
    restored.for_each::<Position>(|entity, _| visited.push(entity));
    assert_eq!(visited, vec![a, c]);
}
