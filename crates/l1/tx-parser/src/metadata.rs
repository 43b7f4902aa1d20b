//! Decoding of the CBOR metadata field.

use crate::error::MetadataError;

/// A decoded metadata value.
///
/// Covers integers, byte and text strings, arrays, maps, tags, floats and the
/// simple values.
pub type MetadataValue = ciborium::Value;

/// Decodes one CBOR value from `bytes`.
///
/// Bytes after the first complete value are ignored.
pub fn decode_metadata(bytes: &[u8]) -> Result<MetadataValue, MetadataError> {
    Ok(ciborium::from_reader(bytes)?)
}
