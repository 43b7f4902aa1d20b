//! Running the envelope pipeline over a transaction.

use inscript_envelope_fmt::EnvelopeScanner;
use tracing::{debug, trace, warn};

use crate::{
    config::ParseConfig,
    content::decode_envelope,
    error::EnvelopeError,
    inscription::Inscription,
    source::WitnessSource,
};

/// Why a structurally valid envelope did not become an inscription.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FilterReason {
    /// No `content_type` field.
    MissingContentType,
}

/// What became of one envelope candidate.
#[derive(Debug)]
pub enum EnvelopeOutcome {
    /// Decoded successfully.
    Inscribed(Inscription),

    /// Well formed but not an inscription.
    Filtered {
        /// Input index.
        input: usize,
        /// Envelope offset in the input's witness.
        offset: usize,
        /// Reason for dropping it.
        reason: FilterReason,
    },

    /// Could not be decoded.
    Malformed {
        /// Input index.
        input: usize,
        /// Envelope offset in the input's witness.
        offset: usize,
        /// What went wrong.
        error: EnvelopeError,
    },
}

impl EnvelopeOutcome {
    /// Returns the inscription, if this outcome produced one.
    pub fn into_inscription(self) -> Option<Inscription> {
        match self {
            EnvelopeOutcome::Inscribed(insc) => Some(insc),
            _ => None,
        }
    }

    /// Returns the offset of the envelope this outcome is for.
    pub fn offset(&self) -> usize {
        match self {
            EnvelopeOutcome::Inscribed(insc) => insc.offset(),
            EnvelopeOutcome::Filtered { offset, .. } | EnvelopeOutcome::Malformed { offset, .. } => {
                *offset
            }
        }
    }
}

/// Parses every envelope in one input's concatenated witness bytes.
///
/// Outcomes are in the order the envelopes appear.  One bad envelope never
/// affects the others.
pub fn parse_witness(buf: &[u8], input: usize, config: &ParseConfig) -> Vec<EnvelopeOutcome> {
    EnvelopeScanner::new(buf)
        .with_pushnum(config.accept_pushnum())
        .map(|(offset, res)| {
            let decoded = res
                .map_err(EnvelopeError::from)
                .and_then(|raw| decode_envelope(raw, input, config).map_err(EnvelopeError::from));

            match decoded {
                Ok(Some(insc)) => EnvelopeOutcome::Inscribed(insc),
                Ok(None) => {
                    trace!(%input, %offset, "envelope has no content type");
                    EnvelopeOutcome::Filtered {
                        input,
                        offset,
                        reason: FilterReason::MissingContentType,
                    }
                }
                Err(error) => {
                    debug!(%input, %offset, %error, "dropping malformed envelope");
                    EnvelopeOutcome::Malformed {
                        input,
                        offset,
                        error,
                    }
                }
            }
        })
        .collect()
}

impl ParseConfig {
    /// Parses every envelope candidate in a transaction, keeping the outcome
    /// of each one.
    ///
    /// Inputs whose witness cannot be decoded contribute nothing.
    pub fn parse_outcomes(&self, tx: &impl WitnessSource) -> Vec<EnvelopeOutcome> {
        let mut outcomes = Vec::new();
        for (input, buf) in tx.witness_buffers().into_iter().enumerate() {
            match buf {
                Ok(buf) => outcomes.extend(parse_witness(&buf, input, self)),
                Err(err) => warn!(%input, %err, "skipping input with undecodable witness"),
            }
        }
        outcomes
    }

    /// Parses the inscriptions in a transaction, in input order and then in
    /// witness order.
    pub fn parse_inscriptions(&self, tx: &impl WitnessSource) -> Vec<Inscription> {
        self.parse_outcomes(tx)
            .into_iter()
            .filter_map(EnvelopeOutcome::into_inscription)
            .collect()
    }
}

/// Parses the inscriptions in a transaction with the default config.
pub fn parse_inscriptions(tx: &impl WitnessSource) -> Vec<Inscription> {
    ParseConfig::default().parse_inscriptions(tx)
}

#[cfg(test)]
mod tests {
    use inscript_envelope_fmt::{EnvelopeParseError, builder::InscriptionEnvelopeBuilder};
    use proptest::prelude::*;

    use super::*;
    use crate::source::{RawInput, RawTransaction};

    fn script(builder: InscriptionEnvelopeBuilder) -> Vec<u8> {
        builder.build().unwrap().into_bytes()
    }

    fn text(body: &str) -> InscriptionEnvelopeBuilder {
        InscriptionEnvelopeBuilder::new()
            .tagged(1, "text/plain")
            .body(body)
    }

    #[test]
    fn test_outcomes_in_order() {
        let mut buf = script(text("a"));
        buf.extend(script(InscriptionEnvelopeBuilder::new().body("untyped")));
        buf.extend(script(text("b")));

        let outcomes = parse_witness(&buf, 3, &ParseConfig::default());
        assert_eq!(outcomes.len(), 3);
        assert!(matches!(&outcomes[0], EnvelopeOutcome::Inscribed(i) if i.body() == b"a"));
        assert!(matches!(
            outcomes[1],
            EnvelopeOutcome::Filtered {
                input: 3,
                reason: FilterReason::MissingContentType,
                ..
            }
        ));
        assert!(matches!(&outcomes[2], EnvelopeOutcome::Inscribed(i) if i.body() == b"b"));

        let offsets: Vec<usize> = outcomes.iter().map(EnvelopeOutcome::offset).collect();
        assert!(offsets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_truncated_envelope_is_malformed() {
        let mut buf = script(text("ok"));
        // Marker, content type tag, then a push claiming more than is left.
        buf.extend([0x00, 0x63, 0x03, b'o', b'r', b'd', 0x01, 0x01, 0x4c, 0x20, 0xaa]);

        let outcomes = parse_witness(&buf, 0, &ParseConfig::default());
        assert_eq!(outcomes.len(), 2);
        assert!(matches!(outcomes[0], EnvelopeOutcome::Inscribed(_)));
        assert!(matches!(
            outcomes[1],
            EnvelopeOutcome::Malformed {
                error: EnvelopeError::Parse(EnvelopeParseError::Field(_)),
                ..
            }
        ));
    }

    #[test]
    fn test_pushnum_config() {
        let mut buf = vec![0x00, 0x63, 0x03, b'o', b'r', b'd', 0x01, 0x01, 0x01, b'x'];
        // Pointer tag with an OP_5 value.
        buf.extend([0x01, 0x02, 0x55, 0x00, 0x01, b'z', 0x68]);

        let on = parse_witness(&buf, 0, &ParseConfig::default());
        let insc = on.into_iter().next().unwrap().into_inscription().unwrap();
        assert_eq!(insc.pointer(), Some(5));

        let off = parse_witness(&buf, 0, &ParseConfig::default().with_accept_pushnum(false));
        assert!(matches!(off[0], EnvelopeOutcome::Malformed { .. }));
    }

    #[test]
    fn test_bad_input_skipped() {
        let good = hex::encode(script(text("hi")));
        let tx = RawTransaction {
            inputs: vec![
                RawInput::with_witness(["zz".to_owned(), good.clone()]),
                RawInput::with_witness([good]),
            ],
        };
        let found = parse_inscriptions(&tx);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].input(), 1);
    }

    proptest! {
        #[test]
        fn test_never_panics(mut buf in prop::collection::vec(any::<u8>(), 0..512), at in any::<prop::sample::Index>()) {
            // Make sure a marker shows up in a good share of cases.
            let pos = at.index(buf.len() + 1);
            buf.splice(pos..pos, [0x00, 0x63, 0x03, b'o', b'r', b'd']);

            let outcomes = parse_witness(&buf, 0, &ParseConfig::default());
            prop_assert!(!outcomes.is_empty());
            prop_assert!(outcomes.windows(2).all(|w| w[0].offset() < w[1].offset()));

            let again = parse_witness(&buf, 0, &ParseConfig::default());
            prop_assert_eq!(outcomes.len(), again.len());
        }
    }
}
