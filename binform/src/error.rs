//! Error types shared by the encode and decode paths.

use std::{ffi::NulError, fmt::Display, io, string::FromUtf8Error};

/// Failure raised while encoding to or decoding from a byte stream.
///
/// I/O failures from the underlying sink or source are propagated untouched;
/// the remaining variants describe wire data that cannot be represented as
/// the requested Rust value. The format carries no self-description, so
/// decoding into the wrong type is *not* detectable; bytes that happen to
/// form valid values simply produce wrong values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The underlying sink or source failed to move the requested bytes.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A decoded length prefix exceeds the decoder's configured limit.
    #[error("length {requested} exceeds the configured limit of {limit}")]
    LengthLimitExceeded {
        /// Length carried by the wire data.
        requested: u64,
        /// Limit the decoder was constructed with.
        limit: u64,
    },

    /// A decoded integer does not fit the platform's pointer-sized type.
    #[error("decoded value {0} does not fit a pointer-sized integer")]
    PointerWidthOverflow(i128),

    /// A boolean byte was neither `0` nor `1`.
    #[error("invalid boolean byte {0:#04x}")]
    InvalidBool(u8),

    /// A character field held a value outside the Unicode scalar range.
    #[error("invalid character scalar value {0:#010x}")]
    InvalidChar(u32),

    /// Decoded string data was not valid UTF-8.
    #[error("decoded string is not valid UTF-8")]
    InvalidUtf8(#[from] FromUtf8Error),

    /// Decoded C string data contained an embedded nul byte.
    #[error("decoded C string contains an embedded nul byte")]
    NulByte(#[from] NulError),

    /// An enum discriminant did not name any known variant.
    #[error("unknown variant index {index} for `{type_name}`")]
    UnknownVariant {
        /// Name of the type being decoded.
        type_name: &'static str,
        /// Variant index carried by the wire data.
        index: u32,
    },

    /// Free-form failure raised by a hand-written implementation.
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a custom error from any displayable message.
    ///
    /// The message should not be capitalized and should not end with a
    /// period.
    pub fn custom<T: Display>(msg: T) -> Self { Self::Custom(msg.to_string()) }
}

/// Convenient alias for fallible codec operations.
pub type Result<T> = std::result::Result<T, Error>;
