use std::fmt;
use std::str;

use bitcoin::{Txid, hashes::Hash};

use crate::error::InscriptionIdError;

/// Length of the txid part of a binary inscription id.
const TXID_LEN: usize = 32;

/// Maximum length of a binary inscription id, txid plus a `u32` index.
const MAX_VALUE_LEN: usize = TXID_LEN + 4;

/// Reference to an inscription: the revealing transaction and the position of
/// the inscription within it.
///
/// The canonical text form is `<txid>i<index>`, e.g.
/// `521f8eccffa4c41a3a7728dd012ea5a4a02feed81f41159231251ecf1e5c79dai0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InscriptionId {
    txid: Txid,
    index: u32,
}

impl InscriptionId {
    /// Creates a new id.
    pub const fn new(txid: Txid, index: u32) -> Self {
        Self { txid, index }
    }

    /// Returns the revealing transaction's id.
    pub const fn txid(&self) -> Txid {
        self.txid
    }

    /// Returns the index of the inscription within the transaction.
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Decodes the binary form used in `parent` and `delegate` fields.
    ///
    /// The value is the 32 txid bytes in internal byte order followed by the
    /// index as little-endian bytes with trailing zero bytes omitted.
    pub fn from_value(value: &[u8]) -> Result<Self, InscriptionIdError> {
        if !(TXID_LEN..=MAX_VALUE_LEN).contains(&value.len()) {
            return Err(InscriptionIdError::InvalidLength(value.len()));
        }

        let (txid, index) = value.split_at(TXID_LEN);
        if index.last() == Some(&0) {
            return Err(InscriptionIdError::TrailingZero);
        }

        let mut txid_bytes = [0; TXID_LEN];
        txid_bytes.copy_from_slice(txid);

        let mut index_bytes = [0; 4];
        index_bytes[..index.len()].copy_from_slice(index);

        Ok(Self {
            txid: Txid::from_byte_array(txid_bytes),
            index: u32::from_le_bytes(index_bytes),
        })
    }

    /// Encodes into the binary field form, the inverse of
    /// [`Self::from_value`].
    pub fn to_value(&self) -> Vec<u8> {
        let mut value = self.txid.to_byte_array().to_vec();
        let index = self.index.to_le_bytes();
        let used = index.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
        value.extend_from_slice(&index[..used]);
        value
    }
}

impl fmt::Display for InscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}i{}", self.txid, self.index)
    }
}

impl str::FromStr for InscriptionId {
    type Err = InscriptionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (txid, index) = s
            .split_once('i')
            .ok_or(InscriptionIdError::MissingSeparator)?;
        let txid = txid
            .parse::<Txid>()
            .map_err(|_| InscriptionIdError::InvalidTxid)?;
        let index = index.parse()?;
        Ok(Self { txid, index })
    }
}
