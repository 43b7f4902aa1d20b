//! Inscription envelope format utilities.
//!
//! This crate reads and writes the byte-level format of inscription envelopes
//! carried in witness scripts, without interpreting any other script data.
//!
//! # Envelope Structure
//!
//! ```text
//! OP_FALSE OP_IF <"ord"> [<tag> <value>]* [OP_0 <body_chunk>*] OP_ENDIF
//! ```
//!
//! `OP_FALSE OP_IF` makes the enclosed pushes a no-op under script execution.
//! Tags and values are arbitrary pushes, the body is the concatenation of any
//! number of pushes after the `OP_0` separator.  Bodies larger than 520 bytes
//! are therefore split across several pushes.
//!
//! # Examples
//!
//! ```
//! use inscript_envelope_fmt::{EnvelopeScanner, builder::InscriptionEnvelopeBuilder};
//!
//! let script = InscriptionEnvelopeBuilder::new()
//!     .tagged(1, "text/plain")
//!     .body("hi")
//!     .build()
//!     .unwrap();
//!
//! let (_, envelope) = EnvelopeScanner::new(script.as_bytes()).next().unwrap();
//! assert_eq!(envelope.unwrap().body(), b"hi");
//! ```

#[cfg(all(test, not(feature = "serde")))]
use serde_json as _;

/// Inscription envelope script builders.
pub mod builder;

/// Error types for envelope operations.
pub mod errors;

/// Field and body extraction.
pub mod parser;

pub mod pushdata;
pub mod scanner;

#[cfg(feature = "serde")]
mod serde;

pub use errors::{
    EnvelopeBuildError, EnvelopeParseError, EnvelopeResult, PushdataError, PushdataResult,
};
pub use parser::{EnvelopeScanner, Field, RawEnvelope};
pub use pushdata::{PushdataReader, read_pushdata, write_pushdata};
pub use scanner::{ENVELOPE_MARK, MARK_LEN, find_next_mark};
