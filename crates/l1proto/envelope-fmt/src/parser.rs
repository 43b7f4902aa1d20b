use crate::{
    errors::{EnvelopeParseError, EnvelopeResult},
    pushdata::{OP_0, OP_ENDIF, PushdataReader},
    scanner::{MARK_LEN, find_next_mark},
};

/// A tag/value pair read from the field section of an envelope.
///
/// Tags are kept as raw bytes, unrecognized tags are preserved as-is.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Field {
    tag: Vec<u8>,
    value: Vec<u8>,
}

impl Field {
    /// Constructs a new field.
    pub fn new(tag: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            tag: tag.into(),
            value: value.into(),
        }
    }

    /// Gets the tag bytes.
    pub fn tag(&self) -> &[u8] {
        &self.tag
    }

    /// Gets the value bytes.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Returns the tag as a number if it is a single byte.
    pub fn tag_u8(&self) -> Option<u8> {
        match self.tag.as_slice() {
            [b] => Some(*b),
            _ => None,
        }
    }
}

/// Fields and body of one envelope, before any content decoding.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawEnvelope {
    offset: usize,
    fields: Vec<Field>,
    body: Vec<u8>,
}

impl RawEnvelope {
    /// Gets the offset of the envelope mark within the scanned buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Gets the fields in the order they appeared.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Gets the concatenated body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Splits into the fields and the body.
    pub fn into_parts(self) -> (Vec<Field>, Vec<u8>) {
        (self.fields, self.body)
    }
}

/// Reads tag/value pairs until the body separator (`OP_0`), an `OP_ENDIF` or
/// the end of the buffer.
///
/// The separator is consumed, an `OP_ENDIF` is left for the body reader.
pub fn extract_fields(reader: &mut PushdataReader<'_>) -> EnvelopeResult<Vec<Field>> {
    let mut fields = Vec::new();

    loop {
        match reader.peek_byte() {
            None | Some(OP_ENDIF) => break,
            Some(OP_0) => {
                reader.read_push().map_err(EnvelopeParseError::Field)?;
                break;
            }
            Some(_) => {
                let tag = reader.read_push().map_err(EnvelopeParseError::Field)?;
                let value = reader.read_push().map_err(EnvelopeParseError::Field)?;
                fields.push(Field::new(tag.into_owned(), value.into_owned()));
            }
        }
    }

    Ok(fields)
}

/// Reads body chunks until `OP_ENDIF` or the end of the buffer and
/// concatenates them in read order.
pub fn assemble_body(reader: &mut PushdataReader<'_>) -> EnvelopeResult<Vec<u8>> {
    let mut body = Vec::new();

    while let Some(op) = reader.peek_byte() {
        if op == OP_ENDIF {
            break;
        }

        let chunk = reader.read_push().map_err(EnvelopeParseError::Body)?;
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}

/// Parses the envelope whose field section starts at `start`, as returned by
/// [`find_next_mark`].
pub fn parse_envelope_at(buf: &[u8], start: usize, pushnum: bool) -> EnvelopeResult<RawEnvelope> {
    let mut reader = PushdataReader::new(buf, start).with_pushnum(pushnum);
    let fields = extract_fields(&mut reader)?;
    let body = assemble_body(&mut reader)?;

    Ok(RawEnvelope {
        offset: start.saturating_sub(MARK_LEN),
        fields,
        body,
    })
}

/// Iterates over every envelope candidate in a buffer.
///
/// Each item is the offset of the candidate's mark and its parse result.  A
/// malformed candidate does not stop the iteration, the scan resumes right
/// after that candidate's mark.
#[derive(Clone, Debug)]
pub struct EnvelopeScanner<'b> {
    buf: &'b [u8],
    from: usize,
    pushnum: bool,
}

impl<'b> EnvelopeScanner<'b> {
    /// Constructs a new scanner starting at the beginning of `buf`.
    pub fn new(buf: &'b [u8]) -> Self {
        Self {
            buf,
            from: 0,
            pushnum: false,
        }
    }

    /// Sets whether pushnum opcodes are read as one byte pushes.
    pub fn with_pushnum(mut self, pushnum: bool) -> Self {
        self.pushnum = pushnum;
        self
    }
}

impl Iterator for EnvelopeScanner<'_> {
    type Item = (usize, EnvelopeResult<RawEnvelope>);

    fn next(&mut self) -> Option<Self::Item> {
        let start = find_next_mark(self.buf, self.from)?;
        self.from = start;
        let res = parse_envelope_at(self.buf, start, self.pushnum);
        Some((start - MARK_LEN, res))
    }
}
