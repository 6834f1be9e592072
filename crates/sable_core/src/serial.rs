//! # Binary Records
//!
//! The persistence boundary: a symmetric encode/decode contract over
//! `std::io` streams. The store does not define a file format; it only
//! hands entity-ordered component sequences to whatever sink the caller
//! provides, and rebuilds storages from the same sequence.
//!
//! Framing is fixed little-endian for numbers and length-prefixed UTF-8 for
//! strings. A component type opts into persistence by implementing
//! [`Record`].

use crate::ecs::entity::Entity;
use crate::ecs::storage::Storage;
use std::io::{self, Read, Write};

/// A value with a symmetric binary encoding.
///
/// `decode(encode(x)) == x` for every value a type can hold.
pub trait Record: Sized {
    /// Writes this value to `out`.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the sink.
    fn encode<W: Write>(&self, out: &mut W) -> io::Result<()>;

    /// Reads one value from `input`.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the source; malformed data surfaces as
    /// [`io::ErrorKind::InvalidData`].
    fn decode<R: Read>(input: &mut R) -> io::Result<Self>;
}

macro_rules! impl_record_for_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                fn encode<W: Write>(&self, out: &mut W) -> io::Result<()> {
                    out.write_all(&self.to_le_bytes())
                }

                fn decode<R: Read>(input: &mut R) -> io::Result<Self> {
                    let mut bytes = [0u8; std::mem::size_of::<$ty>()];
                    input.read_exact(&mut bytes)?;
                    Ok(<$ty>::from_le_bytes(bytes))
                }
            }
        )*
    };
}

impl_record_for_number!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl Record for String {
    fn encode<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let len = u32::try_from(self.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "string too long"))?;
        len.encode(out)?;
        out.write_all(self.as_bytes())
    }

    fn decode<R: Read>(input: &mut R) -> io::Result<Self> {
        let len = u32::decode(input)? as usize;
        let mut bytes = vec![0u8; len];
        input.read_exact(&mut bytes)?;
        String::from_utf8(bytes)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "string is not UTF-8"))
    }
}

impl Record for Entity {
    fn encode<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.to_raw().encode(out)
    }

    fn decode<R: Read>(input: &mut R) -> io::Result<Self> {
        Ok(Entity::from_raw(u32::decode(input)?))
    }
}

/// Writes every live `(entity, component)` pair of a storage, ascending
/// entity-id order, prefixed with the pair count.
///
/// # Errors
///
/// Propagates I/O errors from the sink.
pub fn write_components<C: Record, W: Write>(
    storage: &Storage<C>,
    out: &mut W,
) -> io::Result<()> {
    let count = u32::try_from(storage.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "component count overflow"))?;
    count.encode(out)?;
    for (entity, component) in storage.iter() {
        entity.encode(out)?;
        component.encode(out)?;
    }
    Ok(())
}

/// Reads back a sequence written by [`write_components`].
///
/// Restoring into a world goes through [`World::create_at`] so the recorded
/// ids come back verbatim.
///
/// # Errors
///
/// Propagates I/O errors; a recorded null entity id is
/// [`io::ErrorKind::InvalidData`].
///
/// [`World::create_at`]: crate::World::create_at
pub fn read_components<C: Record, R: Read>(input: &mut R) -> io::Result<Vec<(Entity, C)>> {
    let count = u32::decode(input)? as usize;
    let mut pairs = Vec::with_capacity(count);
    for _ in 0..count {
        let entity = Entity::decode(input)?;
        if entity.is_null() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "null entity id in component record",
            ));
        }
        pairs.push((entity, C::decode(input)?));
    }
    Ok(pairs)
}
