use bitcoin::{
    ScriptBuf,
    blockdata::script,
    constants::MAX_SCRIPT_ELEMENT_SIZE,
    opcodes::{
        OP_FALSE,
        all::{OP_CHECKSIG, OP_ENDIF, OP_IF},
    },
    script::PushBytesBuf,
};

use crate::{errors::EnvelopeBuildError, parser::Field, scanner::PROTOCOL_ID};

/// Builds inscription envelopes.
///
/// Produces `OP_FALSE OP_IF <"ord"> <tag> <value> ... OP_0 <body_chunks> OP_ENDIF`.
/// The body separator and body chunks are only emitted if a body was set.  The
/// body is split into chunks of up to [`MAX_SCRIPT_ELEMENT_SIZE`] bytes.
#[derive(Clone, Debug, Default)]
pub struct InscriptionEnvelopeBuilder {
    fields: Vec<Field>,
    body: Option<Vec<u8>>,
}

impl InscriptionEnvelopeBuilder {
    /// Constructs an empty envelope builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field with a raw tag.
    pub fn field(mut self, tag: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        self.fields.push(Field::new(tag, value));
        self
    }

    /// Appends a field with a single byte tag.
    pub fn tagged(self, tag: u8, value: impl Into<Vec<u8>>) -> Self {
        self.field(vec![tag], value)
    }

    /// Sets the body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Builds a standalone script containing just this envelope.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeBuildError`] if a field item or body chunk cannot be
    /// converted to a `PushBytesBuf`.
    pub fn build(&self) -> Result<ScriptBuf, EnvelopeBuildError> {
        Ok(self.push_onto(script::Builder::new())?.into_script())
    }

    /// Extends `builder` with this envelope.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeBuildError`] if a field item or body chunk cannot be
    /// converted to a `PushBytesBuf`.
    pub fn push_onto(
        &self,
        mut builder: script::Builder,
    ) -> Result<script::Builder, EnvelopeBuildError> {
        builder = builder
            .push_opcode(OP_FALSE)
            .push_opcode(OP_IF)
            .push_slice(PROTOCOL_ID);

        for field in &self.fields {
            builder = builder
                .push_slice(field_push(field.tag())?)
                .push_slice(field_push(field.value())?);
        }

        if let Some(body) = &self.body {
            builder = builder.push_opcode(OP_FALSE);
            for chunk in body.chunks(MAX_SCRIPT_ELEMENT_SIZE) {
                let push_bytes = PushBytesBuf::try_from(chunk.to_vec()).map_err(|_| {
                    EnvelopeBuildError::PayloadChunkConversion {
                        chunk_size: chunk.len(),
                    }
                })?;
                builder = builder.push_slice(push_bytes);
            }
        }

        Ok(builder.push_opcode(OP_ENDIF))
    }
}

fn field_push(item: &[u8]) -> Result<PushBytesBuf, EnvelopeBuildError> {
    PushBytesBuf::try_from(item.to_vec())
        .map_err(|_| EnvelopeBuildError::FieldConversion { len: item.len() })
}

/// Builds a reveal script: a pubkey and CHECKSIG followed by envelopes.
///
/// Creates a script with the structure:
/// ```text
/// <pubkey>
/// CHECKSIG
/// <envelope_0>
/// ...
/// <envelope_n>
/// ```
///
/// # Errors
///
/// Returns [`EnvelopeBuildError`] if the pubkey or any envelope item cannot be
/// converted to a `PushBytesBuf`.
pub fn build_reveal_script(
    pubkey: &[u8],
    envelopes: &[InscriptionEnvelopeBuilder],
) -> Result<ScriptBuf, EnvelopeBuildError> {
    let pubkey_bytes = PushBytesBuf::try_from(pubkey.to_vec())
        .map_err(|_| EnvelopeBuildError::PubkeyConversion)?;

    let mut builder = script::Builder::new()
        .push_slice(pubkey_bytes)
        .push_opcode(OP_CHECKSIG);

    for envelope in envelopes {
        builder = envelope.push_onto(builder)?;
    }

    Ok(builder.into_script())
}

#[cfg(test)]
mod tests {
    use bitcoin::blockdata::script::Instruction::PushBytes;

    use super::*;
    use crate::parser::EnvelopeScanner;

    /// Test that validates body chunking behavior for various sizes.
    ///
    /// Every expected vector starts with the `OP_FALSE` of the envelope mark
    /// and the 3 byte protocol id, then the body separator (also `OP_FALSE`).
    #[test]
    fn test_body_chunking() {
        let test_cases = vec![
            (0, vec![0, 3, 0]),
            (1, vec![0, 3, 0, 1]),
            (520, vec![0, 3, 0, 520]),
            (521, vec![0, 3, 0, 520, 1]),
            (1040, vec![0, 3, 0, 520, 520]),
            (2000, vec![0, 3, 0, 520, 520, 520, 440]),
        ];

        for (body_size, expected_pushes) in test_cases {
            let body: Vec<u8> = (0..body_size).map(|i| (i % 256) as u8).collect();

            let script = InscriptionEnvelopeBuilder::new()
                .body(body.clone())
                .build()
                .unwrap_or_else(|_| panic!("Failed to build envelope for {} bytes", body_size));

            let data_pushes: Vec<_> = script
                .instructions()
                .filter_map(|inst| match inst {
                    Ok(PushBytes(data)) => Some(data.len()),
                    _ => None,
                })
                .collect();

            assert_eq!(
                data_pushes, expected_pushes,
                "Body size {}: expected pushes {:?}, got {:?}",
                body_size, expected_pushes, data_pushes
            );

            let (_, env) = EnvelopeScanner::new(script.as_bytes()).next().unwrap();
            assert_eq!(env.unwrap().body(), body.as_slice());
        }
    }

    #[test]
    fn test_fields_roundtrip() {
        let script = InscriptionEnvelopeBuilder::new()
            .tagged(1, "text/plain")
            .field(vec![0xdeu8, 0xad], vec![0u8; 80])
            .tagged(2, Vec::<u8>::new())
            .body("hello")
            .build()
            .unwrap();

        let (offset, env) = EnvelopeScanner::new(script.as_bytes()).next().unwrap();
        let env = env.unwrap();
        assert_eq!(offset, 0);
        assert_eq!(env.fields().len(), 3);
        assert_eq!(env.fields()[0], Field::new(vec![1u8], "text/plain"));
        assert_eq!(env.fields()[1].value().len(), 80);
        assert!(env.fields()[2].value().is_empty());
        assert_eq!(env.body(), b"hello");
    }

    #[test]
    fn test_reveal_script_with_multiple_envelopes() {
        let first = InscriptionEnvelopeBuilder::new().tagged(1, "a/a").body("1");
        let second = InscriptionEnvelopeBuilder::new().tagged(1, "b/b").body("2");
        let script = build_reveal_script(&[0x02; 32], &[first, second]).unwrap();

        let bodies: Vec<Vec<u8>> = EnvelopeScanner::new(script.as_bytes())
            .map(|(_, env)| env.unwrap().body().to_vec())
            .collect();
        assert_eq!(bodies, vec![b"1".to_vec(), b"2".to_vec()]);
    }
}
