use thiserror::Error;

/// Errors that can occur while reading a single push operation.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum PushdataError {
    /// The push declares more bytes than remain in the buffer, or the cursor
    /// already sits at or past the end of the buffer.
    #[error("truncated push at {at} (needed {needed}, available {available})")]
    Truncated {
        /// Position the read was attempted at.
        at: usize,
        /// Number of bytes the read required.
        needed: usize,
        /// Number of bytes actually left from `at`.
        available: usize,
    },

    /// The byte at a push position is not a push opcode.
    #[error("unexpected opcode {opcode:#04x} at {at}")]
    UnexpectedOpcode {
        /// Position of the offending byte.
        at: usize,
        /// The offending opcode.
        opcode: u8,
    },
}

/// Result of a single push read.
pub type PushdataResult<T> = Result<T, PushdataError>;

/// Errors that can occur while parsing the inside of an inscription envelope.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum EnvelopeParseError {
    /// A tag or value push in the field section could not be read.
    #[error("malformed field: {0}")]
    Field(#[source] PushdataError),

    /// A chunk push in the body section could not be read.
    #[error("malformed body: {0}")]
    Body(#[source] PushdataError),
}

impl EnvelopeParseError {
    /// Returns the underlying push error.
    pub fn pushdata(&self) -> &PushdataError {
        match self {
            Self::Field(e) | Self::Body(e) => e,
        }
    }
}

/// Result of parsing a single envelope.
pub type EnvelopeResult<T> = Result<T, EnvelopeParseError>;

/// Errors that can occur while building inscription envelope scripts.
#[derive(Debug, Error)]
pub enum EnvelopeBuildError {
    /// Failed to convert a payload chunk into `PushBytesBuf`.
    #[error("failed to convert {chunk_size} byte payload chunk to push bytes buffer")]
    PayloadChunkConversion {
        /// Size of the chunk that failed to convert.
        chunk_size: usize,
    },

    /// Failed to convert a field tag or value into `PushBytesBuf`.
    #[error("failed to convert {len} byte field item to push bytes buffer")]
    FieldConversion {
        /// Size of the item that failed to convert.
        len: usize,
    },

    /// Failed to convert a pubkey into `PushBytesBuf`.
    #[error("failed to convert pubkey to push bytes buffer")]
    PubkeyConversion,

    /// Data is too long to be described by any push opcode.
    #[error("{0} bytes cannot be encoded in a single push")]
    PushTooLong(usize),
}
