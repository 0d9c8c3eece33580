//! Byte-order policies for the codec engines.
//!
//! A wire byte order is chosen once, as a type parameter of
//! [`Encoder`](crate::ser::Encoder) or [`Decoder`](crate::de::Decoder), and
//! never changes for the engine's lifetime. The two policies are the
//! uninhabited marker types [`LittleEndian`] and [`BigEndian`]; the trait is
//! sealed, so "exactly two byte orders" is a compile-time guarantee rather
//! than a runtime check.
//!
//! Whether a scalar's bytes need reversing is decided by
//! [`ByteOrder::NEEDS_SWAP`], an associated constant comparing the wire order
//! against the host order. The constant folds away under monomorphization, so
//! the matching-order path performs no branching at all.

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::LittleEndian {}
    impl Sealed for super::BigEndian {}
}

/// A byte-order policy for multi-byte scalar values on the wire.
///
/// The supported scalar widths are 1, 2, 4, and 8 bytes; width 1 is trivially
/// a no-op. [`normalize`](Self::normalize) is its own inverse, so the same
/// operation maps host-order bytes to wire order on encode and wire-order
/// bytes back to host order on decode.
pub trait ByteOrder: sealed::Sealed + Copy + std::fmt::Debug + 'static {
    /// `true` when this wire order differs from the host's native order.
    const NEEDS_SWAP: bool;

    /// Converts between the host's byte ordering and this wire ordering by
    /// reversing `raw` when the two differ, and returning it untouched when
    /// they match.
    #[must_use]
    fn normalize<const N: usize>(mut raw: [u8; N]) -> [u8; N] {
        if Self::NEEDS_SWAP {
            raw.reverse();
        }
        raw
    }
}

/// Least-significant byte first on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LittleEndian {}

impl ByteOrder for LittleEndian {
    const NEEDS_SWAP: bool = cfg!(target_endian = "big");
}

/// Most-significant byte first on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BigEndian {}

impl ByteOrder for BigEndian {
    const NEEDS_SWAP: bool = cfg!(target_endian = "little");
}

/// The byte order native to the machine executing this code.
#[cfg(target_endian = "little")]
pub type NativeEndian = LittleEndian;

/// The byte order native to the machine executing this code.
#[cfg(target_endian = "big")]
pub type NativeEndian = BigEndian;
