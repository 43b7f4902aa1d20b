use std::borrow::Cow;

use base64::{Engine, engine::general_purpose::STANDARD};
use inscript_envelope_fmt::Field;
use serde::Serialize;
use tracing::debug;

use crate::{
    content::decode_latin1,
    inscription_id::InscriptionId,
    metadata::{MetadataValue, decode_metadata},
    tag::Tag,
};

const UTF8_BOM: [u8; 3] = [0xef, 0xbb, 0xbf];
const UTF16_LE_BOM: [u8; 2] = [0xff, 0xfe];
const UTF16_BE_BOM: [u8; 2] = [0xfe, 0xff];

/// A decoded inscription recovered from one envelope.
///
/// The body is stored after any content encoding has been undone, so every
/// accessor sees the decompressed bytes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Inscription {
    /// Index of the transaction input whose witness carried the envelope.
    input: usize,

    /// Offset of the envelope mark in the input's witness bytes.
    offset: usize,

    content_type: String,

    /// Every field in the order it appeared, including unknown tags.
    fields: Vec<Field>,

    #[serde(with = "hex::serde")]
    body: Vec<u8>,
}

impl Inscription {
    pub(crate) fn new(
        input: usize,
        offset: usize,
        content_type: String,
        fields: Vec<Field>,
        body: Vec<u8>,
    ) -> Self {
        Self {
            input,
            offset,
            content_type,
            fields,
            body,
        }
    }

    /// Index of the transaction input this came from.
    pub fn input(&self) -> usize {
        self.input
    }

    /// Offset of the envelope mark within the input's concatenated witness.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// MIME type of the body.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// All fields, in envelope order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the value of the first field carrying `tag`.
    pub fn field(&self, tag: Tag) -> Option<&[u8]> {
        tag.first(&self.fields)
    }

    /// Decoded body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Consumes the inscription, returning the body.
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// Length of the decoded body.
    pub fn content_length(&self) -> usize {
        self.body.len()
    }

    /// Body as text.
    ///
    /// A UTF-16 byte-order mark selects UTF-16 in that byte order, otherwise
    /// the body is read as UTF-8 with a leading BOM dropped.  Invalid
    /// sequences are replaced, so there is always some text.
    pub fn content_text(&self) -> Cow<'_, str> {
        let body = self.body.as_slice();
        if let Some(rest) = body.strip_prefix(&UTF16_LE_BOM) {
            return Cow::Owned(decode_utf16(rest, u16::from_le_bytes));
        }
        if let Some(rest) = body.strip_prefix(&UTF16_BE_BOM) {
            return Cow::Owned(decode_utf16(rest, u16::from_be_bytes));
        }
        let body = body.strip_prefix(&UTF8_BOM).unwrap_or(body);
        String::from_utf8_lossy(body)
    }

    /// Body as standard padded base64.
    pub fn content_base64(&self) -> String {
        STANDARD.encode(&self.body)
    }

    /// Body as a `data:` URI using the content type.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.content_type, self.content_base64())
    }

    /// Output offset the inscription is bound to.
    ///
    /// The value is a little-endian integer.  It is absent when empty or when
    /// it does not fit in a `u64`.
    pub fn pointer(&self) -> Option<u64> {
        decode_pointer(self.field(Tag::Pointer)?)
    }

    /// First well-formed parent.
    pub fn parent(&self) -> Option<InscriptionId> {
        self.parents().into_iter().next()
    }

    /// Every well-formed parent, in field order.  Malformed values are skipped.
    pub fn parents(&self) -> Vec<InscriptionId> {
        Tag::Parent
            .values(&self.fields)
            .filter_map(|v| InscriptionId::from_value(v).ok())
            .collect()
    }

    /// Inscription whose content this one delegates to.
    pub fn delegate(&self) -> Option<InscriptionId> {
        InscriptionId::from_value(self.field(Tag::Delegate)?).ok()
    }

    /// Concatenated bytes of every metadata field, or `None` if there are none.
    pub fn metadata_raw(&self) -> Option<Vec<u8>> {
        let mut values = Tag::Metadata.values(&self.fields).peekable();
        values.peek()?;
        Some(values.flatten().copied().collect())
    }

    /// Decoded metadata.  Absent if there is none or it fails to decode.
    pub fn metadata(&self) -> Option<MetadataValue> {
        let raw = self.metadata_raw()?;
        match decode_metadata(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                debug!(input = self.input, offset = self.offset, %err, "ignoring undecodable metadata");
                None
            }
        }
    }

    /// Metaprotocol name, lossily decoded as UTF-8.
    pub fn metaprotocol(&self) -> Option<String> {
        self.field(Tag::Metaprotocol)
            .map(|v| String::from_utf8_lossy(v).into_owned())
    }

    /// Content encoding as declared.
    pub fn content_encoding(&self) -> Option<String> {
        self.field(Tag::ContentEncoding).map(decode_latin1)
    }
}

fn decode_pointer(value: &[u8]) -> Option<u64> {
    if value.is_empty() {
        return None;
    }

    let (low, high) = value.split_at(value.len().min(8));
    if high.iter().any(|b| *b != 0) {
        return None;
    }

    let mut buf = [0; 8];
    buf[..low.len()].copy_from_slice(low);
    Some(u64::from_le_bytes(buf))
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let units = bytes.chunks(2).map(|c| match c {
        [a, b] => unit([*a, *b]),
        // Odd trailing byte, force a replacement char.
        _ => 0xdc00,
    });
    char::decode_utf16(units)
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}
