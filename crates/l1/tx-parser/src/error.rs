use inscript_envelope_fmt::EnvelopeParseError;
use thiserror::Error;

/// Errors while decoding the content of a structurally valid envelope.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The body claims `br` encoding but is not a valid Brotli stream.
    #[error("brotli decompression failed: {0}")]
    Decompression(#[source] std::io::Error),

    /// The decompressed body exceeds the configured limit.
    #[error("decompressed body exceeds {limit} bytes")]
    DecompressedTooLarge {
        /// Configured limit.
        limit: usize,
    },
}

/// Reason a single envelope was dropped as malformed.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The pushes inside the envelope could not be read.
    #[error("parse: {0}")]
    Parse(#[from] EnvelopeParseError),

    /// The content could not be decoded.
    #[error("content: {0}")]
    Content(#[from] ContentError),
}

/// Errors decoding the metadata field.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The bytes are not a well-formed CBOR value.
    #[error("cbor: {0}")]
    Cbor(#[from] ciborium::de::Error<std::io::Error>),
}

/// Errors decoding an inscription id.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum InscriptionIdError {
    /// Binary form must be a 32 byte txid plus up to 4 index bytes.
    #[error("invalid binary inscription id length {0}")]
    InvalidLength(usize),

    /// Binary index bytes must be minimal.
    #[error("inscription id index has trailing zero bytes")]
    TrailingZero,

    /// Text form is missing the `i` between txid and index.
    #[error("missing separator in inscription id")]
    MissingSeparator,

    /// Text form has a malformed txid.
    #[error("invalid txid in inscription id")]
    InvalidTxid,

    /// Text form has a malformed index.
    #[error("invalid index in inscription id: {0}")]
    InvalidIndex(#[from] std::num::ParseIntError),
}

/// Errors turning witness items into bytes.
#[derive(Debug, Error)]
pub enum WitnessDecodeError {
    /// A witness item is not valid hex.
    #[error("witness item {item} is not valid hex: {source}")]
    InvalidHex {
        /// Index of the item within the input's witness.
        item: usize,
        /// Underlying hex error.
        source: hex::FromHexError,
    },
}
