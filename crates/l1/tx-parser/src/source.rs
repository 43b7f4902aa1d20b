//! Transaction shapes inscriptions can be parsed from.

use bitcoin::Transaction;
use serde::{Deserialize, Serialize};

use crate::error::WitnessDecodeError;

/// Something that yields, per input and in input order, the concatenation of
/// that input's witness items.
pub trait WitnessSource {
    /// Returns one buffer per input.  An input whose witness cannot be turned
    /// into bytes yields an error in its slot.
    fn witness_buffers(&self) -> Vec<Result<Vec<u8>, WitnessDecodeError>>;
}

/// A transaction as found in explorer or RPC JSON, with hex witness items.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    /// Inputs, in order.
    #[serde(alias = "vin")]
    pub inputs: Vec<RawInput>,
}

/// One input of a [`RawTransaction`].
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    /// Hex-encoded witness items, absent for non-segwit inputs.
    #[serde(default, alias = "txinwitness")]
    pub witness: Option<Vec<String>>,
}

impl RawInput {
    /// Creates an input from hex witness items.
    pub fn with_witness<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            witness: Some(items.into_iter().map(Into::into).collect()),
        }
    }

    /// Decodes and concatenates the witness items.
    pub fn witness_bytes(&self) -> Result<Vec<u8>, WitnessDecodeError> {
        let mut buf = Vec::new();
        for (item, hex_item) in self.witness.iter().flatten().enumerate() {
            let bytes = hex::decode(hex_item)
                .map_err(|source| WitnessDecodeError::InvalidHex { item, source })?;
            buf.extend_from_slice(&bytes);
        }
        Ok(buf)
    }
}

impl WitnessSource for RawTransaction {
    fn witness_buffers(&self) -> Vec<Result<Vec<u8>, WitnessDecodeError>> {
        self.inputs.iter().map(RawInput::witness_bytes).collect()
    }
}

impl WitnessSource for Transaction {
    fn witness_buffers(&self) -> Vec<Result<Vec<u8>, WitnessDecodeError>> {
        self.input
            .iter()
            .map(|txin| Ok(txin.witness.iter().flatten().copied().collect()))
            .collect()
    }
}

impl<T: WitnessSource + ?Sized> WitnessSource for &T {
    fn witness_buffers(&self) -> Vec<Result<Vec<u8>, WitnessDecodeError>> {
        (**self).witness_buffers()
    }
}

#[cfg(test)]
mod tests {
    use bitcoin::{
        Amount, OutPoint, ScriptBuf, Sequence, TxIn, TxOut, Witness, absolute::LockTime,
        transaction::Version,
    };

    use super::*;

    #[test]
    fn test_raw_concatenates_items() {
        let tx = RawTransaction {
            inputs: vec![
                RawInput::with_witness(["0102", "", "ff"]),
                RawInput::default(),
            ],
        };
        let bufs: Vec<Vec<u8>> = tx
            .witness_buffers()
            .into_iter()
            .map(Result::unwrap)
            .collect();
        assert_eq!(bufs, vec![vec![1, 2, 0xff], vec![]]);
    }

    #[test]
    fn test_raw_invalid_hex() {
        let input = RawInput::with_witness(["00", "0g"]);
        assert!(matches!(
            input.witness_bytes(),
            Err(WitnessDecodeError::InvalidHex { item: 1, .. })
        ));
        assert!(RawInput::with_witness(["abc"]).witness_bytes().is_err());
    }

    #[test]
    fn test_raw_json_aliases() {
        let tx: RawTransaction =
            serde_json::from_str(r#"{"vin":[{"txinwitness":["aa","bb"]},{}]}"#).unwrap();
        assert_eq!(tx.inputs.len(), 2);
        assert_eq!(tx.inputs[0].witness_bytes().unwrap(), vec![0xaa, 0xbb]);
        assert_eq!(tx.inputs[1].witness, None);
    }

    #[test]
    fn test_bitcoin_transaction() {
        let mut witness = Witness::new();
        witness.push([1u8, 2]);
        witness.push([3u8]);
        let tx = Transaction {
            version: Version::TWO,
            lock_time: LockTime::ZERO,
            input: vec![TxIn {
                previous_output: OutPoint::null(),
                script_sig: ScriptBuf::new(),
                sequence: Sequence::MAX,
                witness,
            }],
            output: vec![TxOut {
                value: Amount::ZERO,
                script_pubkey: ScriptBuf::new(),
            }],
        };
        let bufs = tx.witness_buffers();
        assert_eq!(bufs.len(), 1);
        assert_eq!(bufs[0].as_ref().unwrap(), &vec![1, 2, 3]);
    }
}
