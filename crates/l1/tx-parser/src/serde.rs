use std::str::FromStr;

use serde::de;
use serde::{Deserialize, Serialize};

use crate::InscriptionId;

impl Serialize for InscriptionId {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        if s.is_human_readable() {
            s.collect_str(self)
        } else {
            s.serialize_bytes(&self.to_value())
        }
    }
}

impl<'de> Deserialize<'de> for InscriptionId {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        if d.is_human_readable() {
            struct StrVisitor;

            impl de::Visitor<'_> for StrVisitor {
                type Value = InscriptionId;

                fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "an inscription id of the form <txid>i<index>")
                }

                fn visit_str<E: de::Error>(self, v: &str) -> Result<InscriptionId, E> {
                    InscriptionId::from_str(v).map_err(E::custom)
                }
            }

            d.deserialize_str(StrVisitor)
        } else {
            struct BytesVisitor;

            impl de::Visitor<'_> for BytesVisitor {
                type Value = InscriptionId;

                fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "32 to 36 bytes of inscription id")
                }

                fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<InscriptionId, E> {
                    InscriptionId::from_value(v).map_err(E::custom)
                }
            }

            d.deserialize_bytes(BytesVisitor)
        }
    }
}
