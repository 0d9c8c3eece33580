//! Typed binary serialization with explicit byte order.
//!
//! This crate converts in-memory values of arbitrary, composable types into
//! a compact byte stream (and back) with a deterministic layout and a wire
//! byte order chosen at compile time. It is aimed at binary persistence and
//! wire transfer where two cooperating endpoints agree on the exchanged
//! types out-of-band. The format carries no tags, field names, versions, or
//! checksums.
//!
//! # Overview
//!
//! Three pieces cooperate:
//!
//! - [`ByteOrder`] with its two policies [`LittleEndian`] and [`BigEndian`]
//!   (and the host-order alias [`NativeEndian`]) normalizes scalar bytes
//!   between host order and wire order at zero cost when the two match.
//! - [`Encoder`] and [`Decoder`] wrap any [`std::io::Write`] /
//!   [`std::io::Read`] and expose the scalar, string, and framing
//!   operations.
//! - [`Encode`](ser::Encode) and [`Decode`](de::Decode) are the capability
//!   traits through which every supported type dispatches, recursively and
//!   statically: primitives, strings, tuples, arrays, sequences, sets,
//!   maps, and user-defined aggregates.
//!
//! # Examples
//!
//! Heterogeneous values round-trip through a tuple:
//!
//! ```
//! use binform::{Decoder, Encoder, LittleEndian};
//!
//! let mut encoder = Encoder::<_, LittleEndian>::new(Vec::new());
//! encoder.encode(&(42u32, String::from("hello"), vec![1u16, 2, 3]))?;
//! let wire = encoder.into_inner();
//!
//! let mut decoder = Decoder::<_, LittleEndian>::new(wire.as_slice());
//! let (number, text, items): (u32, String, Vec<u16>) = decoder.decode()?;
//! assert_eq!(number, 42);
//! assert_eq!(text, "hello");
//! assert_eq!(items, [1, 2, 3]);
//! # Ok::<(), binform::Error>(())
//! ```
//!
//! User-defined aggregates derive both directions from one field list, so
//! the write order and read order can never drift apart:
//!
//! ```
//! use binform::{Decode, Decoder, Encode, Encoder, BigEndian};
//!
//! #[derive(Encode, Decode, Debug, PartialEq)]
//! struct Entry {
//!     id: u64,
//!     label: String,
//! }
//!
//! let entry = Entry { id: 7, label: String::from("seven") };
//!
//! let mut encoder = Encoder::<_, BigEndian>::new(Vec::new());
//! encoder.encode(&entry)?;
//! let wire = encoder.into_inner();
//!
//! let mut decoder = Decoder::<_, BigEndian>::new(wire.as_slice());
//! assert_eq!(decoder.decode::<Entry>()?, entry);
//! # Ok::<(), binform::Error>(())
//! ```
//!
//! # What the Format Does *Not* Do
//!
//! Decoding into a type other than the one encoded is undetectable and
//! silently produces garbage; schema evolution, compression, and encryption
//! are out of scope. Length prefixes are not validated by default; see
//! [`Decoder::with_len_limit`] for opt-in hardening against hostile input.

// Allows the derive macros to refer to this crate as `::binform` from
// within the crate itself.
extern crate self as binform;

pub mod de;
pub mod endian;
pub mod error;
pub mod ser;

pub use binform_derive::{Decode, Encode};
pub use de::{Decode, Decoder};
pub use endian::{BigEndian, ByteOrder, LittleEndian, NativeEndian};
pub use error::{Error, Result};
pub use ser::{Encode, Encoder};

#[doc(hidden)]
pub mod __internal {
    // Re-exports needed by derived code.
    pub use crate::{
        de::{Decode, Decoder},
        endian::ByteOrder,
        error::Error,
        ser::{Encode, Encoder},
    };
}
