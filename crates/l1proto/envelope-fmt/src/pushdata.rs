//! Reading and writing single script push operations.
//!
//! Inside an envelope the script pushes are only used as a length-prefixed
//! byte string encoding:
//!
//! ```text
//! 0x00          empty push (OP_0)
//! 0x01..=0x4b   the opcode is the length, payload follows
//! 0x4c <u8>     OP_PUSHDATA1, 1 byte length
//! 0x4d <u16le>  OP_PUSHDATA2, 2 byte length
//! 0x4e <u32le>  OP_PUSHDATA4, 4 byte length
//! ```
//!
//! When enabled, `OP_1NEGATE` and `OP_1..=OP_16` are read as one byte pushes
//! of `0x81` and `1..=16`.

use std::borrow::Cow;

use crate::errors::{EnvelopeBuildError, PushdataError, PushdataResult};

/// `OP_0`, also used as the body separator.
pub const OP_0: u8 = 0x00;
/// Largest opcode that directly encodes its push length.
pub const OP_PUSHBYTES_75: u8 = 0x4b;
/// Push with a 1 byte length prefix.
pub const OP_PUSHDATA1: u8 = 0x4c;
/// Push with a 2 byte little-endian length prefix.
pub const OP_PUSHDATA2: u8 = 0x4d;
/// Push with a 4 byte little-endian length prefix.
pub const OP_PUSHDATA4: u8 = 0x4e;
/// Pushes the number -1.
pub const OP_1NEGATE: u8 = 0x4f;
/// Pushes the number 1.
pub const OP_1: u8 = 0x51;
/// Pushes the number 16.
pub const OP_16: u8 = 0x60;
/// Opens a conditional block.
pub const OP_IF: u8 = 0x63;
/// Closes a conditional block, also the end of an envelope.
pub const OP_ENDIF: u8 = 0x68;

/// Cursor over a script buffer that reads one push at a time.
///
/// The cursor only moves on successful reads.  It never reads past the end of
/// the buffer, every declared length is checked before slicing.
#[derive(Clone, Debug)]
pub struct PushdataReader<'b> {
    buf: &'b [u8],
    at: usize,
    pushnum: bool,
}

impl<'b> PushdataReader<'b> {
    /// Constructs a new reader positioned at `at`, not accepting pushnum
    /// opcodes.
    pub fn new(buf: &'b [u8], at: usize) -> Self {
        Self {
            buf,
            at,
            pushnum: false,
        }
    }

    /// Sets whether `OP_1NEGATE` and `OP_1..=OP_16` are read as pushes.
    pub fn with_pushnum(mut self, pushnum: bool) -> Self {
        self.pushnum = pushnum;
        self
    }

    /// Returns the current cursor position.
    pub fn position(&self) -> usize {
        self.at
    }

    /// Returns the byte under the cursor without consuming it.
    pub fn peek_byte(&self) -> Option<u8> {
        self.buf.get(self.at).copied()
    }

    /// Returns if there is nothing left to read.
    pub fn is_exhausted(&self) -> bool {
        self.at >= self.buf.len()
    }

    /// Returns the total number of remaining bytes.
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.at)
    }

    /// Reads one push and advances past it.
    ///
    /// Direct pushes borrow from the underlying buffer, pushnum opcodes produce
    /// an owned single byte.
    pub fn read_push(&mut self) -> PushdataResult<Cow<'b, [u8]>> {
        let at = self.at;
        let opcode = self.slice_at(at, 1)?[0];
        let after_op = at + 1;

        let (data, next) = match opcode {
            OP_0 => (Cow::Borrowed(&self.buf[after_op..after_op]), after_op),
            1..=OP_PUSHBYTES_75 => self.sized_push(after_op, 0, opcode as usize)?,
            OP_PUSHDATA1 => {
                let len = self.slice_at(after_op, 1)?[0] as usize;
                self.sized_push(after_op, 1, len)?
            }
            OP_PUSHDATA2 => {
                let raw = self.slice_at(after_op, 2)?;
                let len = u16::from_le_bytes([raw[0], raw[1]]) as usize;
                self.sized_push(after_op, 2, len)?
            }
            OP_PUSHDATA4 => {
                let raw = self.slice_at(after_op, 4)?;
                let len = u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]) as usize;
                self.sized_push(after_op, 4, len)?
            }
            OP_1NEGATE if self.pushnum => (Cow::Owned(vec![0x81]), after_op),
            OP_1..=OP_16 if self.pushnum => (Cow::Owned(vec![opcode - OP_1 + 1]), after_op),
            _ => return Err(PushdataError::UnexpectedOpcode { at, opcode }),
        };

        self.at = next;
        Ok(data)
    }

    /// Reads a push whose length prefix of `prefix_len` bytes starts at
    /// `prefix_at`, returning the payload and the position after it.
    fn sized_push(
        &self,
        prefix_at: usize,
        prefix_len: usize,
        len: usize,
    ) -> PushdataResult<(Cow<'b, [u8]>, usize)> {
        let data_at = prefix_at + prefix_len;
        let data = self.slice_at(data_at, len)?;
        Ok((Cow::Borrowed(data), data_at + len))
    }

    fn slice_at(&self, at: usize, len: usize) -> PushdataResult<&'b [u8]> {
        let buf = self.buf;
        let available = buf.len().saturating_sub(at);
        if at > buf.len() || len > available {
            return Err(PushdataError::Truncated {
                at,
                needed: len,
                available,
            });
        }
        Ok(&buf[at..at + len])
    }
}

/// Decodes one push at `at`, returning the pushed bytes and the position just
/// past the push.
///
/// Pushnum opcodes are rejected here, see [`PushdataReader::with_pushnum`].
pub fn read_pushdata(buf: &[u8], at: usize) -> PushdataResult<(Cow<'_, [u8]>, usize)> {
    let mut reader = PushdataReader::new(buf, at);
    let data = reader.read_push()?;
    Ok((data, reader.position()))
}

/// Appends a push of `data` to `out` using the smallest opcode class able to
/// describe its length.
///
/// Single bytes are always written as direct pushes, never as pushnums.
pub fn write_pushdata(data: &[u8], out: &mut Vec<u8>) -> Result<(), EnvelopeBuildError> {
    let len = data.len();
    match len {
        0 => out.push(OP_0),
        1..=75 => out.push(len as u8),
        76..=0xff => out.extend_from_slice(&[OP_PUSHDATA1, len as u8]),
        0x100..=0xffff => {
            out.push(OP_PUSHDATA2);
            out.extend_from_slice(&(len as u16).to_le_bytes());
        }
        _ => {
            let len32 = u32::try_from(len).map_err(|_| EnvelopeBuildError::PushTooLong(len))?;
            out.push(OP_PUSHDATA4);
            out.extend_from_slice(&len32.to_le_bytes());
        }
    }
    out.extend_from_slice(data);
    Ok(())
}

/// Returns the number of prefix bytes (opcode and length) [`write_pushdata`]
/// emits for a push of `len` bytes.
pub fn push_prefix_len(len: usize) -> usize {
    match len {
        0..=75 => 1,
        76..=0xff => 2,
        0x100..=0xffff => 3,
        _ => 5,
    }
}
