//! # Command Dispatch
//!
//! Maps command names to type-erased handlers. A handler is any `FnMut`
//! of arity 0 to 4 whose parameters all implement
//! [`FromArg`](crate::FromArg); binding erases the signature behind a boxed
//! closure that checks the argument count, converts each token, and invokes.

use crate::args::{ArgError, FromArg};
use crate::parse::{tokenize, ParseError};
use std::collections::HashMap;
use thiserror::Error;

/// Errors from dispatching a command line. All recoverable: the dispatcher
/// reports and carries on, it never aborts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// No handler is bound under the given name.
    #[error("command '{0}' doesn't exist")]
    UnknownCommand(String),

    /// The handler takes a different number of arguments.
    #[error("command expects {expected} argument(s), got {got}")]
    ArityMismatch {
        /// Arity of the bound handler.
        expected: usize,
        /// Number of argument tokens on the line.
        got: usize,
    },

    /// An argument token would not convert to the parameter type.
    #[error("argument {index}: {source}")]
    BadArgument {
        /// 0-based position of the offending argument.
        index: usize,
        /// What failed to parse.
        source: ArgError,
    },

    /// The line itself would not tokenize.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A callable bindable into a [`CommandSet`].
///
/// Implemented for closures and fn pointers of arity 0 to 4 whose parameters
/// all implement [`FromArg`]. `Args` is the parameter tuple; it exists so
/// one callable type can be matched against the right impl.
pub trait Handler<Args> {
    /// Checks arity, converts `args`, and invokes.
    ///
    /// # Errors
    ///
    /// [`CommandError::ArityMismatch`] or [`CommandError::BadArgument`].
    fn call(&mut self, args: &[String]) -> Result<(), CommandError>;
}

macro_rules! impl_handler {
    ($($arg:ident),*) => {
        impl<Func, $($arg: FromArg),*> Handler<($($arg,)*)> for Func
        where
            Func: FnMut($($arg),*),
        {
            #[allow(non_snake_case, unused_variables, unused_mut, unused_assignments)]
            fn call(&mut self, args: &[String]) -> Result<(), CommandError> {
                let expected = 0usize $(+ { let _ = stringify!($arg); 1usize })*;
                if args.len() != expected {
                    return Err(CommandError::ArityMismatch {
                        expected,
                        got: args.len(),
                    });
                }

                let mut index = 0;
                $(
                    let $arg = <$arg as FromArg>::from_arg(&args[index])
                        .map_err(|source| CommandError::BadArgument { index, source })?;
                    index += 1;
                )*

                self($($arg),*);
                Ok(())
            }
        }
    };
}

impl_handler!();
impl_handler!(A);
impl_handler!(A, B);
impl_handler!(A, B, C);
impl_handler!(A, B, C, D);

type BoxedCommand = Box<dyn FnMut(&[String]) -> Result<(), CommandError>>;

/// Name-to-handler table with line dispatch.
#[derive(Default)]
pub struct CommandSet {
    commands: HashMap<String, BoxedCommand>,
}

impl CommandSet {
    /// Creates an empty command set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `handler` under `name`, replacing any previous binding.
    pub fn bind<Args, H>(&mut self, name: impl Into<String>, mut handler: H)
    where
        H: Handler<Args> + 'static,
    {
        let name = name.into();
        tracing::debug!("binding command '{name}'");
        self.commands
            .insert(name, Box::new(move |args| handler.call(args)));
    }

    /// Checks whether a handler is bound under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Bound command names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Tokenizes `line`, looks up the named handler, and invokes it with
    /// the remaining tokens. A blank line is a no-op.
    ///
    /// # Errors
    ///
    /// Any [`CommandError`]; the set itself is left untouched either way.
    pub fn dispatch(&mut self, line: &str) -> Result<(), CommandError> {
        let tokens = tokenize(line)?;
        let Some((name, args)) = tokens.split_first() else {
            return Ok(());
        };

        let Some(command) = self.commands.get_mut(name.as_str()) else {
            return Err(CommandError::UnknownCommand(name.clone()));
        };

        tracing::debug!("dispatching '{name}' with {} argument(s)", args.len());
        command(args)
    }
}

impl std::fmt::Debug for CommandSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.commands.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_dispatch_no_arguments() {
        let hits = Rc::new(Cell::new(0));
        let mut commands = CommandSet::new();
        commands.bind("ping", {
            let hits = Rc::clone(&hits);
            move || hits.set(hits.get() + 1)
        });

        commands.dispatch("ping").unwrap();
        commands.dispatch("  ping  ").unwrap();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_dispatch_converts_arguments() {
        let seen = Rc::new(Cell::new((0u32, 0.0f32)));
        let mut commands = CommandSet::new();
        commands.bind("move", {
            let seen = Rc::clone(&seen);
            move |id: u32, dx: f32| seen.set((id, dx))
        });

        commands.dispatch("move 7 2.5").unwrap();
        assert_eq!(seen.get(), (7, 2.5));
    }

    #[test]
    fn test_quoted_argument_stays_whole() {
        let seen = Rc::new(Cell::new(String::new()));
        let mut commands = CommandSet::new();
        commands.bind("echo", {
            let seen = Rc::clone(&seen);
            move |message: String| seen.set(message)
        });

        commands.dispatch(r#"echo "two words""#).unwrap();
        assert_eq!(seen.take(), "two words");
    }

    #[test]
    fn test_unknown_command() {
        let mut commands = CommandSet::new();
        assert_eq!(
            commands.dispatch("nothing here"),
            Err(CommandError::UnknownCommand("nothing".to_string()))
        );
    }

    #[test]
    fn test_arity_mismatch() {
        let mut commands = CommandSet::new();
        commands.bind("pair", |_: u32, _: u32| {});

        assert_eq!(
            commands.dispatch("pair 1"),
            Err(CommandError::ArityMismatch {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn test_bad_argument_names_position() {
        let mut commands = CommandSet::new();
        commands.bind("pair", |_: u32, _: u32| {});

        let err = commands.dispatch("pair 1 x").unwrap_err();
        assert_eq!(
            err,
            CommandError::BadArgument {
                index: 1,
                source: ArgError {
                    expected: "u32",
                    raw: "x".to_string(),
                },
            }
        );
    }

    #[test]
    fn test_blank_line_is_a_noop() {
        let mut commands = CommandSet::new();
        assert_eq!(commands.dispatch("   "), Ok(()));
    }

    #[test]
    fn test_rebind_replaces() {
        let seen = Rc::new(Cell::new(0));
        let mut commands = CommandSet::new();
        commands.bind("n", {
            let seen = Rc::clone(&seen);
            move || seen.set(1)
        });
        commands.bind("n", {
            let seen = Rc::clone(&seen);
            move || seen.set(2)
        });

        commands.dispatch("n").unwrap();
        assert_eq!(seen.get(), 2);
    }
}
