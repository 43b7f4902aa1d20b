use serde::{Deserialize, Serialize};

/// Default cap on the size of a Brotli-decompressed body (16 MiB).
pub const DEFAULT_MAX_DECOMPRESSED_LEN: usize = 16 * 1024 * 1024;

/// Config for parsing inscriptions out of transactions.
///
/// Every field has a default, so any subset can be given when deserializing.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Bodies that decompress to more than this many bytes are dropped.
    max_decompressed_len: usize,

    /// Read `OP_1NEGATE` and `OP_1..=OP_16` inside envelopes as one byte
    /// pushes.
    accept_pushnum: bool,
}

impl ParseConfig {
    /// Constructs a new instance.
    pub fn new(max_decompressed_len: usize, accept_pushnum: bool) -> Self {
        Self {
            max_decompressed_len,
            accept_pushnum,
        }
    }

    /// Sets the decompressed body size cap.
    pub fn with_max_decompressed_len(mut self, len: usize) -> Self {
        self.max_decompressed_len = len;
        self
    }

    /// Sets whether pushnum opcodes are accepted.
    pub fn with_accept_pushnum(mut self, accept: bool) -> Self {
        self.accept_pushnum = accept;
        self
    }

    /// Gets the decompressed body size cap.
    pub fn max_decompressed_len(&self) -> usize {
        self.max_decompressed_len
    }

    /// Gets whether pushnum opcodes are accepted.
    pub fn accept_pushnum(&self) -> bool {
        self.accept_pushnum
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_decompressed_len: DEFAULT_MAX_DECOMPRESSED_LEN,
            accept_pushnum: true,
        }
    }
}
