//! # Argument Conversion
//!
//! Turns a raw string token into a handler parameter. The supported set is
//! fixed and documented here: the integer and float primitives, `bool`,
//! `String`, and [`Entity`]. A handler parameter type outside this set is a
//! compile error at the `bind` call site.

use sable_core::Entity;
use thiserror::Error;

/// A token that would not convert to the expected parameter type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot parse {raw:?} as {expected}")]
pub struct ArgError {
    /// Name of the type the handler expected.
    pub expected: &'static str,
    /// The raw token as given.
    pub raw: String,
}

/// Conversion from a raw string argument to a parameter value.
pub trait FromArg: Sized {
    /// Parses a raw token.
    ///
    /// # Errors
    ///
    /// [`ArgError`] when the token does not represent a value of this type.
    fn from_arg(raw: &str) -> Result<Self, ArgError>;
}

macro_rules! impl_from_arg_via_parse {
    ($($ty:ty),* $(,)?) => {$(
        impl FromArg for $ty {
            fn from_arg(raw: &str) -> Result<Self, ArgError> {
                raw.parse().map_err(|_| ArgError {
                    expected: stringify!($ty),
                    raw: raw.to_string(),
                })
            }
        }
    )*};
}

impl_from_arg_via_parse!(i32, i64, u32, u64, usize, f32, f64, bool);

impl FromArg for String {
    fn from_arg(raw: &str) -> Result<Self, ArgError> {
        Ok(raw.to_string())
    }
}

impl FromArg for Entity {
    fn from_arg(raw: &str) -> Result<Self, ArgError> {
        u32::from_arg(raw)
            .map(Entity::from_raw)
            .map_err(|err| ArgError {
                expected: "entity id",
                raw: err.raw,
            })
    }
}
