//! Encoding half of the codec: the [`Encoder`] engine and the [`Encode`]
//! capability trait.
//!
//! # Wire Format
//!
//! - **Scalars** are written as exactly `size_of` bytes in the encoder's
//!   byte order, with no padding or alignment. `usize` and `isize` always
//!   occupy 8 bytes on the wire for cross-platform stability.
//! - **Booleans** are a single byte, `0` or `1`.
//! - **Characters** are their 32-bit Unicode scalar value.
//! - **Strings and byte strings** are a `u64` length prefix followed by the
//!   raw bytes, with no terminator.
//! - **Tuples, fixed-size arrays, and struct fields** are the concatenation
//!   of their members' encodings, in order, with no framing of their own.
//! - **Sequences, sets, and maps** are a `u64` element count followed by the
//!   elements in iteration order.
//! - **`Option`** is a tag byte (`0` = `None`, `1` = `Some`) followed by the
//!   contained value; **enums** (including `Result`) are a `u32` variant
//!   index followed by the variant's fields.
//!
//! There is no header, version field, or checksum anywhere; the two
//! endpoints of an exchange must agree on types and byte order out-of-band.

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque},
    ffi::{CStr, CString},
    hash::BuildHasher,
    io::Write,
    marker::PhantomData,
    ops::Range,
    rc::Rc,
    sync::Arc,
    time::Duration,
};

use crate::{
    endian::{ByteOrder, NativeEndian},
    error::Result,
};

/// A typed encoder writing values to a byte sink in a fixed wire byte order.
///
/// The byte order `O` is chosen at construction as a type parameter and
/// cannot change for the encoder's lifetime; encoding the same stream with a
/// different order requires a new encoder. The sink is any
/// [`std::io::Write`]; pass `&mut stream` to borrow a stream owned
/// elsewhere.
///
/// Every operation runs to completion or fails with the sink's own error;
/// there is no buffering, retry, or partial-write recovery in the encoder
/// itself.
///
/// # Examples
///
/// ```
/// use binform::{Encoder, LittleEndian};
///
/// let mut encoder = Encoder::<_, LittleEndian>::new(Vec::new());
/// encoder.encode(&0x0102_0304_u32)?;
/// assert_eq!(encoder.into_inner(), [0x04, 0x03, 0x02, 0x01]);
/// # Ok::<(), binform::Error>(())
/// ```
#[derive(Debug)]
pub struct Encoder<W, O = NativeEndian> {
    sink: W,
    _order: PhantomData<O>,
}

impl<W: Write, O: ByteOrder> Encoder<W, O> {
    /// Creates an encoder writing to `sink` in the byte order `O`.
    pub fn new(sink: W) -> Self { Self { sink, _order: PhantomData } }

    /// Consumes the encoder and returns the underlying sink.
    pub fn into_inner(self) -> W { self.sink }

    /// Returns a reference to the underlying sink.
    pub fn sink(&self) -> &W { &self.sink }

    /// Returns a mutable reference to the underlying sink.
    pub fn sink_mut(&mut self) -> &mut W { &mut self.sink }

    /// Encodes any [`Encode`] value.
    pub fn encode<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.encode(self)
    }

    /// Writes a scalar's host-order bytes, normalized to the wire order.
    ///
    /// The normalization happens on the local copy; the caller's value is
    /// never touched.
    fn emit_array<const N: usize>(&mut self, raw: [u8; N]) -> Result<()> {
        self.sink.write_all(&O::normalize(raw))?;
        Ok(())
    }

    /// Writes a `u8`.
    pub fn emit_u8(&mut self, value: u8) -> Result<()> {
        self.emit_array(value.to_ne_bytes())
    }

    /// Writes a `u16` in the wire byte order.
    pub fn emit_u16(&mut self, value: u16) -> Result<()> {
        self.emit_array(value.to_ne_bytes())
    }

    /// Writes a `u32` in the wire byte order.
    pub fn emit_u32(&mut self, value: u32) -> Result<()> {
        self.emit_array(value.to_ne_bytes())
    }

    /// Writes a `u64` in the wire byte order.
    pub fn emit_u64(&mut self, value: u64) -> Result<()> {
        self.emit_array(value.to_ne_bytes())
    }

    /// Writes an `i8`.
    pub fn emit_i8(&mut self, value: i8) -> Result<()> {
        self.emit_array(value.to_ne_bytes())
    }

    /// Writes an `i16` in the wire byte order.
    pub fn emit_i16(&mut self, value: i16) -> Result<()> {
        self.emit_array(value.to_ne_bytes())
    }

    /// Writes an `i32` in the wire byte order.
    pub fn emit_i32(&mut self, value: i32) -> Result<()> {
        self.emit_array(value.to_ne_bytes())
    }

    /// Writes an `i64` in the wire byte order.
    pub fn emit_i64(&mut self, value: i64) -> Result<()> {
        self.emit_array(value.to_ne_bytes())
    }

    /// Writes a `usize` as 8 wire bytes, regardless of the host's pointer
    /// width.
    pub fn emit_usize(&mut self, value: usize) -> Result<()> {
        self.emit_u64(value as u64)
    }

    /// Writes an `isize` as 8 wire bytes, regardless of the host's pointer
    /// width.
    pub fn emit_isize(&mut self, value: isize) -> Result<()> {
        self.emit_i64(value as i64)
    }

    /// Writes an `f32` as its IEEE 754 bit pattern in the wire byte order.
    pub fn emit_f32(&mut self, value: f32) -> Result<()> {
        self.emit_array(value.to_ne_bytes())
    }

    /// Writes an `f64` as its IEEE 754 bit pattern in the wire byte order.
    pub fn emit_f64(&mut self, value: f64) -> Result<()> {
        self.emit_array(value.to_ne_bytes())
    }

    /// Writes a boolean as a single byte, `1` for `true` and `0` for
    /// `false`.
    pub fn emit_bool(&mut self, value: bool) -> Result<()> {
        self.emit_u8(u8::from(value))
    }

    /// Writes a character as its 32-bit Unicode scalar value.
    pub fn emit_char(&mut self, value: char) -> Result<()> {
        self.emit_u32(u32::from(value))
    }

    /// Writes a length prefix as a `u64` in the wire byte order.
    pub fn emit_len(&mut self, len: usize) -> Result<()> {
        self.emit_u64(len as u64)
    }

    /// Writes a string as a length prefix holding the byte count, followed
    /// by the raw UTF-8 bytes with no terminator.
    pub fn emit_str(&mut self, value: &str) -> Result<()> {
        self.emit_len(value.len())?;
        self.write_raw(value.as_bytes())
    }

    /// Writes a byte string as a length prefix followed by the raw bytes.
    pub fn emit_bytes(&mut self, value: &[u8]) -> Result<()> {
        self.emit_len(value.len())?;
        self.write_raw(value)
    }

    /// Writes raw bytes straight through to the sink, with no length prefix
    /// and no byte-order transformation.
    pub fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.sink.write_all(bytes)?;
        Ok(())
    }
}

/// A value that can be written through an [`Encoder`].
///
/// Composite implementations delegate to their members' own `encode`,
/// keeping dispatch fully static: no runtime type information reaches the
/// wire. Hand-written implementations must read fields back in the exact
/// order they were written; the `#[derive(Encode)]` / `#[derive(Decode)]`
/// macros guarantee that symmetry by generating both directions from the one
/// field list.
pub trait Encode {
    /// Writes this value to `encoder`.
    fn encode<W: Write, O: ByteOrder>(
        &self,
        encoder: &mut Encoder<W, O>,
    ) -> Result<()>;
}

// =============================================================================
// Primitive Type Implementations
// =============================================================================

macro_rules! impl_encode_scalar {
    ($($ty:ty => $method:ident),* $(,)?) => {
        $(
            impl Encode for $ty {
                fn encode<W: Write, O: ByteOrder>(
                    &self,
                    encoder: &mut Encoder<W, O>,
                ) -> Result<()> {
                    encoder.$method(*self)
                }
            }
        )*
    };
}

impl_encode_scalar! {
    u8 => emit_u8,
    u16 => emit_u16,
    u32 => emit_u32,
    u64 => emit_u64,
    i8 => emit_i8,
    i16 => emit_i16,
    i32 => emit_i32,
    i64 => emit_i64,
    usize => emit_usize,
    isize => emit_isize,
    f32 => emit_f32,
    f64 => emit_f64,
    bool => emit_bool,
    char => emit_char,
}

impl Encode for str {
    fn encode<W: Write, O: ByteOrder>(
        &self,
        encoder: &mut Encoder<W, O>,
    ) -> Result<()> {
        encoder.emit_str(self)
    }
}

impl Encode for String {
    fn encode<W: Write, O: ByteOrder>(
        &self,
        encoder: &mut Encoder<W, O>,
    ) -> Result<()> {
        encoder.emit_str(self)
    }
}

impl Encode for CStr {
    fn encode<W: Write, O: ByteOrder>(
        &self,
        encoder: &mut Encoder<W, O>,
    ) -> Result<()> {
        // The terminator stays off the wire; the length prefix carries the
        // count instead.
        encoder.emit_bytes(self.to_bytes())
    }
}

impl Encode for CString {
    fn encode<W: Write, O: ByteOrder>(
        &self,
        encoder: &mut Encoder<W, O>,
    ) -> Result<()> {
        self.as_c_str().encode(encoder)
    }
}

impl Encode for () {
    fn encode<W: Write, O: ByteOrder>(
        &self,
        _encoder: &mut Encoder<W, O>,
    ) -> Result<()> {
        Ok(())
    }
}

impl<T> Encode for PhantomData<T> {
    fn encode<W: Write, O: ByteOrder>(
        &self,
        _encoder: &mut Encoder<W, O>,
    ) -> Result<()> {
        Ok(())
    }
}

// =============================================================================
// Tuple Implementations
// =============================================================================

macro_rules! impl_encode_tuple {
    ($($T:ident),+) => {
        impl<$($T: Encode),+> Encode for ($($T,)+) {
            #[allow(non_snake_case)]
            fn encode<W: Write, O: ByteOrder>(
                &self,
                encoder: &mut Encoder<W, O>,
            ) -> Result<()> {
                let ($($T,)+) = self;
                $($T.encode(encoder)?;)+
                Ok(())
            }
        }
    };
}

impl_encode_tuple!(T0);
impl_encode_tuple!(T0, T1);
impl_encode_tuple!(T0, T1, T2);
impl_encode_tuple!(T0, T1, T2, T3);
impl_encode_tuple!(T0, T1, T2, T3, T4);
impl_encode_tuple!(T0, T1, T2, T3, T4, T5);
impl_encode_tuple!(T0, T1, T2, T3, T4, T5, T6);
impl_encode_tuple!(T0, T1, T2, T3, T4, T5, T6, T7);
impl_encode_tuple!(T0, T1, T2, T3, T4, T5, T6, T7, T8);
impl_encode_tuple!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_encode_tuple!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_encode_tuple!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
impl_encode_tuple!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12);
impl_encode_tuple!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13);
impl_encode_tuple!(
    T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13, T14
);
impl_encode_tuple!(
    T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13, T14, T15
);

// =============================================================================
// Array, Slice, and Collection Implementations
// =============================================================================

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode<W: Write, O: ByteOrder>(
        &self,
        encoder: &mut Encoder<W, O>,
    ) -> Result<()> {
        // The element count is part of the type; no length prefix.
        for element in self {
            element.encode(encoder)?;
        }
        Ok(())
    }
}

impl<T: Encode> Encode for [T] {
    fn encode<W: Write, O: ByteOrder>(
        &self,
        encoder: &mut Encoder<W, O>,
    ) -> Result<()> {
        encoder.emit_len(self.len())?;
        for element in self {
            element.encode(encoder)?;
        }
        Ok(())
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode<W: Write, O: ByteOrder>(
        &self,
        encoder: &mut Encoder<W, O>,
    ) -> Result<()> {
        self.as_slice().encode(encoder)
    }
}

impl<T: Encode> Encode for VecDeque<T> {
    fn encode<W: Write, O: ByteOrder>(
        &self,
        encoder: &mut Encoder<W, O>,
    ) -> Result<()> {
        encoder.emit_len(self.len())?;
        for element in self {
            element.encode(encoder)?;
        }
        Ok(())
    }
}

impl<T: Encode> Encode for LinkedList<T> {
    fn encode<W: Write, O: ByteOrder>(
        &self,
        encoder: &mut Encoder<W, O>,
    ) -> Result<()> {
        encoder.emit_len(self.len())?;
        for element in self {
            element.encode(encoder)?;
        }
        Ok(())
    }
}

impl<T: Encode, S: BuildHasher> Encode for HashSet<T, S> {
    fn encode<W: Write, O: ByteOrder>(
        &self,
        encoder: &mut Encoder<W, O>,
    ) -> Result<()> {
        encoder.emit_len(self.len())?;
        for element in self {
            element.encode(encoder)?;
        }
        Ok(())
    }
}

impl<T: Encode> Encode for BTreeSet<T> {
    fn encode<W: Write, O: ByteOrder>(
        &self,
        encoder: &mut Encoder<W, O>,
    ) -> Result<()> {
        encoder.emit_len(self.len())?;
        for element in self {
            element.encode(encoder)?;
        }
        Ok(())
    }
}

impl<K: Encode, V: Encode, S: BuildHasher> Encode for HashMap<K, V, S> {
    fn encode<W: Write, O: ByteOrder>(
        &self,
        encoder: &mut Encoder<W, O>,
    ) -> Result<()> {
        encoder.emit_len(self.len())?;
        for (key, value) in self {
            key.encode(encoder)?;
            value.encode(encoder)?;
        }
        Ok(())
    }
}

impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    fn encode<W: Write, O: ByteOrder>(
        &self,
        encoder: &mut Encoder<W, O>,
    ) -> Result<()> {
        encoder.emit_len(self.len())?;
        for (key, value) in self {
            key.encode(encoder)?;
            value.encode(encoder)?;
        }
        Ok(())
    }
}

// =============================================================================
// Option and Result Implementations
// =============================================================================

impl<T: Encode> Encode for Option<T> {
    fn encode<W: Write, O: ByteOrder>(
        &self,
        encoder: &mut Encoder<W, O>,
    ) -> Result<()> {
        match self {
            Some(value) => {
                encoder.emit_u8(1)?;
                value.encode(encoder)
            }
            None => encoder.emit_u8(0),
        }
    }
}

impl<T: Encode, E: Encode> Encode for std::result::Result<T, E> {
    fn encode<W: Write, O: ByteOrder>(
        &self,
        encoder: &mut Encoder<W, O>,
    ) -> Result<()> {
        match self {
            Ok(value) => {
                encoder.emit_u32(0)?;
                value.encode(encoder)
            }
            Err(error) => {
                encoder.emit_u32(1)?;
                error.encode(encoder)
            }
        }
    }
}

// =============================================================================
// Reference and Smart Pointer Implementations
// =============================================================================

impl<T: Encode + ?Sized> Encode for &T {
    fn encode<W: Write, O: ByteOrder>(
        &self,
        encoder: &mut Encoder<W, O>,
    ) -> Result<()> {
        (**self).encode(encoder)
    }
}

impl<T: Encode + ?Sized> Encode for &mut T {
    fn encode<W: Write, O: ByteOrder>(
        &self,
        encoder: &mut Encoder<W, O>,
    ) -> Result<()> {
        (**self).encode(encoder)
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode<W: Write, O: ByteOrder>(
        &self,
        encoder: &mut Encoder<W, O>,
    ) -> Result<()> {
        (**self).encode(encoder)
    }
}

impl<T: Encode + ?Sized> Encode for Rc<T> {
    fn encode<W: Write, O: ByteOrder>(
        &self,
        encoder: &mut Encoder<W, O>,
    ) -> Result<()> {
        (**self).encode(encoder)
    }
}

impl<T: Encode + ?Sized> Encode for Arc<T> {
    fn encode<W: Write, O: ByteOrder>(
        &self,
        encoder: &mut Encoder<W, O>,
    ) -> Result<()> {
        (**self).encode(encoder)
    }
}

impl<T: Encode + ToOwned + ?Sized> Encode for Cow<'_, T> {
    fn encode<W: Write, O: ByteOrder>(
        &self,
        encoder: &mut Encoder<W, O>,
    ) -> Result<()> {
        (**self).encode(encoder)
    }
}

// =============================================================================
// Additional Standard Library Types
// =============================================================================

impl<T: Encode> Encode for Range<T> {
    fn encode<W: Write, O: ByteOrder>(
        &self,
        encoder: &mut Encoder<W, O>,
    ) -> Result<()> {
        self.start.encode(encoder)?;
        self.end.encode(encoder)
    }
}

impl Encode for Duration {
    fn encode<W: Write, O: ByteOrder>(
        &self,
        encoder: &mut Encoder<W, O>,
    ) -> Result<()> {
        encoder.emit_u64(self.as_secs())?;
        encoder.emit_u32(self.subsec_nanos())
    }
}

#[cfg(test)]
mod test;
