//! Locating inscription envelopes in raw script bytes.

use crate::pushdata::{OP_0, OP_IF};

/// Protocol identifier pushed right after `OP_FALSE OP_IF`.
pub const PROTOCOL_ID: [u8; 3] = *b"ord";

/// Byte sequence opening an inscription envelope: `OP_FALSE OP_IF <"ord">`.
pub const ENVELOPE_MARK: [u8; 6] = [
    OP_0,
    OP_IF,
    PROTOCOL_ID.len() as u8,
    PROTOCOL_ID[0],
    PROTOCOL_ID[1],
    PROTOCOL_ID[2],
];

/// Length of [`ENVELOPE_MARK`].
pub const MARK_LEN: usize = ENVELOPE_MARK.len();

/// Finds the next envelope mark starting at or after `from`.
///
/// Returns the offset of the first byte after the mark, which is where the
/// field section begins.  Only complete marks match.  The returned offset is
/// always at least `from + MARK_LEN`, so feeding it back in as the next `from`
/// strictly advances the search.
pub fn find_next_mark(buf: &[u8], from: usize) -> Option<usize> {
    let hay = buf.get(from..)?;
    hay.windows(MARK_LEN)
        .position(|w| w == ENVELOPE_MARK)
        .map(|pos| from + pos + MARK_LEN)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_mark_bytes() {
        assert_eq!(ENVELOPE_MARK, [0x00, 0x63, 0x03, b'o', b'r', b'd']);
    }

    #[test]
    fn test_find_at_start() {
        let mut buf = ENVELOPE_MARK.to_vec();
        buf.push(0x51);
        assert_eq!(find_next_mark(&buf, 0), Some(MARK_LEN));
    }

    #[test]
    fn test_find_after_preceding_bytes() {
        let mut buf = vec![0x20; 33];
        buf.push(0xac);
        buf.extend_from_slice(&ENVELOPE_MARK);
        assert_eq!(find_next_mark(&buf, 0), Some(34 + MARK_LEN));
    }

    #[test]
    fn test_find_multiple() {
        let mut buf = ENVELOPE_MARK.to_vec();
        buf.extend_from_slice(&[0x00, 0x68]);
        buf.extend_from_slice(&ENVELOPE_MARK);

        let first = find_next_mark(&buf, 0).unwrap();
        assert_eq!(first, MARK_LEN);
        let second = find_next_mark(&buf, first).unwrap();
        assert_eq!(second, 2 * MARK_LEN + 2);
        assert_eq!(find_next_mark(&buf, second), None);
    }

    #[test]
    fn test_partial_mark_does_not_match() {
        assert_eq!(find_next_mark(&ENVELOPE_MARK[..MARK_LEN - 1], 0), None);
        assert_eq!(find_next_mark(&[0x00, 0x63, 0x03, b'o', b'r', b'x'], 0), None);
        assert_eq!(find_next_mark(&[0x00, 0x63, 0x04, b'o', b'r', b'd', 0], 0), None);
    }

    #[test]
    fn test_from_past_end() {
        assert_eq!(find_next_mark(&ENVELOPE_MARK, 0), Some(MARK_LEN));
        assert_eq!(find_next_mark(&ENVELOPE_MARK, 1), None);
        assert_eq!(find_next_mark(&ENVELOPE_MARK, MARK_LEN), None);
        assert_eq!(find_next_mark(&ENVELOPE_MARK, 100), None);
        assert_eq!(find_next_mark(&[], 0), None);
    }

    proptest! {
        #[test]
        fn proptest_strictly_advances(buf in proptest::collection::vec(prop_oneof![Just(0u8), Just(0x63), Just(0x03), Just(b'o'), Just(b'r'), Just(b'd')], 0..256), from in 0usize..300) {
            if let Some(next) = find_next_mark(&buf, from) {
                prop_assert!(next >= from + MARK_LEN);
                prop_assert!(next <= buf.len());
                prop_assert_eq!(&buf[next - MARK_LEN..next], &ENVELOPE_MARK[..]);
            }
        }
    }
}
