//! Known field tags.
//!
//! Tags are matched against the raw tag bytes of a field, a recognized tag is
//! exactly one byte long.  Anything else is carried along untouched.

use std::fmt;

use inscript_envelope_fmt::Field;

/// Field tags with a defined meaning.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Tag {
    /// MIME type of the body.
    ContentType,
    /// Output offset the inscription is bound to.
    Pointer,
    /// Parent inscription id.
    Parent,
    /// CBOR metadata.
    Metadata,
    /// Name of a metaprotocol the content follows.
    Metaprotocol,
    /// Encoding applied to the body, `br` for Brotli.
    ContentEncoding,
    /// Inscription id whose content this inscription delegates to.
    Delegate,
}

impl Tag {
    /// Every known tag, ordered by tag value.
    pub const ALL: [Tag; 7] = [
        Tag::ContentType,
        Tag::Pointer,
        Tag::Parent,
        Tag::Metadata,
        Tag::Metaprotocol,
        Tag::ContentEncoding,
        Tag::Delegate,
    ];

    /// Returns the tag's byte value.
    pub const fn byte(self) -> u8 {
        match self {
            Tag::ContentType => 1,
            Tag::Pointer => 2,
            Tag::Parent => 3,
            Tag::Metadata => 5,
            Tag::Metaprotocol => 7,
            Tag::ContentEncoding => 9,
            Tag::Delegate => 11,
        }
    }

    /// Returns the field name for this tag.
    pub const fn name(self) -> &'static str {
        match self {
            Tag::ContentType => "content_type",
            Tag::Pointer => "pointer",
            Tag::Parent => "parent",
            Tag::Metadata => "metadata",
            Tag::Metaprotocol => "metaprotocol",
            Tag::ContentEncoding => "content_encoding",
            Tag::Delegate => "delegate",
        }
    }

    /// Looks up a tag from raw field tag bytes.
    pub fn from_bytes(tag: &[u8]) -> Option<Tag> {
        match tag {
            [b] => Tag::ALL.into_iter().find(|t| t.byte() == *b),
            _ => None,
        }
    }

    /// Returns if the field carries this tag.
    pub fn matches(self, field: &Field) -> bool {
        field.tag_u8() == Some(self.byte())
    }

    /// Returns the value of the first field with this tag.
    pub fn first(self, fields: &[Field]) -> Option<&[u8]> {
        fields.iter().find(|f| self.matches(f)).map(Field::value)
    }

    /// Returns the values of every field with this tag, in order.
    pub fn values(self, fields: &[Field]) -> impl Iterator<Item = &[u8]> {
        fields
            .iter()
            .filter(move |f| self.matches(f))
            .map(Field::value)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
