//! # Sable Console
//!
//! Binds textual commands to handlers and drives a
//! [`World`](sable_core::World) from a line-oriented input.
//!
//! The dispatcher knows nothing about entities or components beyond what a
//! parsed argument can represent: handlers are plain callables whose
//! parameters all convert from strings (see [`FromArg`] for the supported
//! set). A line is split on whitespace, with `"`-quoted groups kept as one
//! argument:
//!
//! ```
//! use sable_console::CommandSet;
//!
//! let mut commands = CommandSet::new();
//! commands.bind("add", |a: i64, b: i64| println!("{}", a + b));
//! commands.dispatch("add 2 40").unwrap();
//! ```
//!
//! Every failure mode (unknown command, wrong argument count, unparseable
//! argument, unterminated quote) is a recoverable [`CommandError`] for the
//! caller to report; nothing here aborts.

pub mod args;
pub mod command;
pub mod parse;

pub use args::{ArgError, FromArg};
pub use command::{CommandError, CommandSet, Handler};
pub use parse::{tokenize, ParseError};
