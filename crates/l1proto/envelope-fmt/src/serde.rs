//! Serde support for [`Field`].
//!
//! Human-readable formats get `{"tag": "<hex>", "value": "<hex>"}`, binary
//! formats get a `(tag, value)` tuple.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::parser::Field;

#[derive(Serialize, Deserialize)]
struct HexField {
    #[serde(with = "hex::serde")]
    tag: Vec<u8>,
    #[serde(with = "hex::serde")]
    value: Vec<u8>,
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        if s.is_human_readable() {
            HexField {
                tag: self.tag().to_vec(),
                value: self.value().to_vec(),
            }
            .serialize(s)
        } else {
            (self.tag(), self.value()).serialize(s)
        }
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        if d.is_human_readable() {
            let HexField { tag, value } = HexField::deserialize(d)?;
            Ok(Field::new(tag, value))
        } else {
            let (tag, value) = <(Vec<u8>, Vec<u8>)>::deserialize(d)?;
            Ok(Field::new(tag, value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_readable_roundtrip() {
        let field = Field::new(vec![1u8], "text/plain");
        let json = serde_json::to_string(&field).unwrap();
        assert_eq!(json, r#"{"tag":"01","value":"746578742f706c61696e"}"#);
        let back: Field = serde_json::from_str(&json).unwrap();
        assert_eq!(field, back);
    }

    #[test]
    fn test_human_readable_invalid_hex() {
        let result: Result<Field, _> = serde_json::from_str(r#"{"tag":"0","value":""}"#);
        assert!(result.is_err());
    }
}
