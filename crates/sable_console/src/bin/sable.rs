//! # Sable REPL
//!
//! Line-oriented console over a [`World`]: create and destroy entities,
//! attach position components, and inspect the result.
//!
//! ```text
//! create
//! pos-set 1 2.0 3.5
//! pos-list
//! destroy 1
//! ```

use sable_console::CommandSet;
use sable_core::{Entity, World};
use std::cell::RefCell;
use std::io::BufRead;
use std::rc::Rc;

/// 2D position attached to entities from the console.
#[derive(Debug, Clone, Copy)]
struct Position {
    x: f32,
    y: f32,
}

fn build_commands(world: &Rc<RefCell<World>>) -> CommandSet {
    let mut commands = CommandSet::new();

    commands.bind("create", {
        let world = Rc::clone(world);
        move || {
            let entity = world.borrow_mut().create();
            println!("created entity {entity}");
        }
    });

    commands.bind("destroy", {
        let world = Rc::clone(world);
        move |entity: Entity| {
            let mut handle = entity;
            if world.borrow_mut().destroy(&mut handle) {
                println!("destroyed entity {entity}");
            } else {
                println!("entity {entity} is not alive");
            }
        }
    });

    commands.bind("count", {
        let world = Rc::clone(world);
        move || println!("{} live entities", world.borrow().entity_count())
    });

    commands.bind("echo", |message: String| println!("{message}"));

    commands.bind("pos-set", {
        let world = Rc::clone(world);
        move |entity: Entity, x: f32, y: f32| {
            let mut world = world.borrow_mut();
            // Overwrite in place when present; a second add would be a
            // duplicate, which the store treats as a caller bug.
            if let Some(position) = world.get_mut::<Position>(entity) {
                *position = Position { x, y };
                println!("moved entity {entity} to ({x}, {y})");
            } else {
                match world.add(entity, Position { x, y }) {
                    Ok(_) => println!("placed entity {entity} at ({x}, {y})"),
                    Err(err) => println!("{err}"),
                }
            }
        }
    });

    commands.bind("pos-get", {
        let world = Rc::clone(world);
        move |entity: Entity| match world.borrow().get::<Position>(entity) {
            Some(position) => println!("entity {entity} is at ({}, {})", position.x, position.y),
            None => println!("entity {entity} has no position"),
        }
    });

    commands.bind("pos-del", {
        let world = Rc::clone(world);
        move |entity: Entity| {
            let mut world = world.borrow_mut();
            if world.has::<Position>(entity) {
                world.remove::<Position>(entity);
                println!("removed position from entity {entity}");
            } else {
                println!("entity {entity} has no position");
            }
        }
    });

    commands.bind("pos-list", {
        let world = Rc::clone(world);
        move || {
            let mut world = world.borrow_mut();
            let mut lines = 0u32;
            world.for_each::<Position>(|entity, position| {
                println!("entity {entity}: ({}, {})", position.x, position.y);
                lines += 1;
            });
            if lines == 0 {
                println!("no positions");
            }
        }
    });

    commands
}

fn main() {
    let world = Rc::new(RefCell::new(World::new()));
    let mut commands = build_commands(&world);

    let names: Vec<&str> = {
        let mut names: Vec<&str> = commands.names().collect();
        names.sort_unstable();
        names
    };
    println!("sable console");
    println!("commands: {}", names.join(", "));

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };
        if let Err(err) = commands.dispatch(&line) {
            println!("{err}");
        }
    }
}
