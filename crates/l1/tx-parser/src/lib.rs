//! Parsing of inscriptions out of transaction witnesses.
//!
//! Every input's witness items are concatenated and scanned for envelopes.
//! Each envelope's fields and body are decoded into an [`Inscription`], with
//! Brotli bodies decompressed up front.  Envelopes that are malformed or carry
//! no content type are dropped without affecting the rest of the transaction.
//!
//! ```
//! use inscript_envelope_fmt::builder::InscriptionEnvelopeBuilder;
//! use inscript_tx_parser::{RawInput, RawTransaction, parse_inscriptions};
//!
//! let script = InscriptionEnvelopeBuilder::new()
//!     .tagged(1, "text/plain")
//!     .body("hi")
//!     .build()
//!     .unwrap();
//! let tx = RawTransaction {
//!     inputs: vec![RawInput::with_witness([hex::encode(script.as_bytes())])],
//! };
//!
//! let found = parse_inscriptions(&tx);
//! assert_eq!(found[0].content_type(), "text/plain");
//! assert_eq!(found[0].content_text(), "hi");
//! ```

/// Parse configuration.
pub mod config;

/// Content decoding for envelopes.
pub mod content;

/// Errors and result types.
pub mod error;

/// Inscription records.
pub mod inscription;

/// Inscription ids.
pub mod inscription_id;

pub mod metadata;

/// Orchestration over whole transactions.
pub mod parser;

pub mod source;
pub mod tag;

mod serde;

pub use config::{DEFAULT_MAX_DECOMPRESSED_LEN, ParseConfig};
pub use error::{ContentError, EnvelopeError, InscriptionIdError, MetadataError, WitnessDecodeError};
pub use inscript_envelope_fmt::Field;
pub use inscription::Inscription;
pub use inscription_id::InscriptionId;
pub use metadata::{MetadataValue, decode_metadata};
pub use parser::{EnvelopeOutcome, FilterReason, parse_inscriptions, parse_witness};
pub use source::{RawInput, RawTransaction, WitnessSource};
pub use tag::Tag;
