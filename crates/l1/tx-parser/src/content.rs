//! Turning a raw envelope into an [`Inscription`].

use std::io::Read;

use inscript_envelope_fmt::RawEnvelope;

use crate::{
    config::ParseConfig, error::ContentError, inscription::Inscription, tag::Tag,
};

/// Content encoding value selecting Brotli decompression.
pub const BROTLI_ENCODING: &str = "br";

/// Internal buffer size for the Brotli decoder.
const BROTLI_BUFFER_SIZE: usize = 4096;

/// Decodes bytes as one character per byte.
///
/// Content types are MIME tokens, so this is not a UTF-8 decode.
pub(crate) fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|b| char::from(*b)).collect()
}

/// Decodes the content of an envelope found in input `input`.
///
/// Returns `Ok(None)` if the envelope has no content type, such an envelope is
/// filtered rather than failed.
pub fn decode_envelope(
    envelope: RawEnvelope,
    input: usize,
    config: &ParseConfig,
) -> Result<Option<Inscription>, ContentError> {
    let offset = envelope.offset();
    let (fields, body) = envelope.into_parts();

    let Some(content_type) = Tag::ContentType.first(&fields).map(decode_latin1) else {
        return Ok(None);
    };

    let is_brotli = Tag::ContentEncoding
        .first(&fields)
        .is_some_and(|enc| decode_latin1(enc) == BROTLI_ENCODING);

    let body = if is_brotli {
        decompress_brotli(&body, config.max_decompressed_len())?
    } else {
        body
    };

    Ok(Some(Inscription::new(
        input,
        offset,
        content_type,
        fields,
        body,
    )))
}

/// Decompresses a Brotli stream, failing if the output would exceed `limit`.
pub fn decompress_brotli(compressed: &[u8], limit: usize) -> Result<Vec<u8>, ContentError> {
    let decoder = brotli::Decompressor::new(compressed, BROTLI_BUFFER_SIZE);

    let mut out = Vec::new();
    decoder
        .take((limit as u64).saturating_add(1))
        .read_to_end(&mut out)
        .map_err(ContentError::Decompression)?;

    if out.len() > limit {
        return Err(ContentError::DecompressedTooLarge { limit });
    }

    Ok(out)
}
