//! Error types for AEZ operations.

use core::fmt;

/// Result type alias for AEZ operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur during AEZ operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Key too long (maximum 4095 bytes).
    KeyTooLong,

    /// Tag length not representable (`tag_len * 8` must fit in 32 bits).
    TagTooLong,

    /// Ciphertext shorter than the tag length.
    InputTooShort,

    /// Authentication failed during decryption.
    AuthenticationFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::KeyTooLong => write!(f, "key too long (maximum 4095 bytes)"),
            Error::TagTooLong => write!(f, "tag length too large to represent"),
            Error::InputTooShort => write!(f, "ciphertext shorter than the tag length"),
            Error::AuthenticationFailed => write!(f, "authentication failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
