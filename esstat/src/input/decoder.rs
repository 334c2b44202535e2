//! # Key Decoder
//!
//! Turns raw terminal bytes into [`KeyEvent`]s.
//!
//! Arrow keys arrive as three-byte escape sequences (`ESC [ A` and friends) and
//! a terminal read can split one anywhere. The decoder runs a small state
//! machine over each batch:
//!
//! ```text
//! Ground ──ESC──▶ Escape ──'['──▶ Bracket ──A/B/C/D──▶ arrow key
//!   │               │                 └──other──▶ ESC as a plain key, rescan from '['
//!   │               └──other──▶ ESC as a plain key, rescan from there
//!   └──byte──▶ plain key
//! ```
//!
//! Running out of input in `Escape` or `Bracket` is the deferred outcome: the
//! unfinished sequence is kept in the pending buffer and prefixed onto the next
//! batch. Nothing is dropped and decoding never waits for more input.

/// One decoded keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Enter,
}

const ESC: u8 = 0x1b;
const OPEN: u8 = b'[';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ground,
    Escape,
    Bracket,
}

/// Result of scanning from one position.
#[derive(Debug, PartialEq, Eq)]
enum Scan {
    /// A key and how many bytes it consumed.
    Key(KeyEvent, usize),
    /// Input ran out mid-sequence.
    Incomplete,
}

#[derive(Debug, Default, Clone)]
pub struct KeyDecoder {
    pending: Vec<u8>,
}

impl KeyDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a batch, resuming any sequence left over from the previous one.
    pub fn decode(&mut self, bytes: &[u8]) -> Vec<KeyEvent> {
        let mut buf = std::mem::take(&mut self.pending);
        buf.extend_from_slice(bytes);

        let mut events = Vec::with_capacity(buf.len());
        let mut pos = 0;
        while pos < buf.len() {
            match scan(&buf[pos..]) {
                Scan::Key(event, used) => {
                    events.push(event);
                    pos += used;
                }
                Scan::Incomplete => {
                    self.pending = buf.split_off(pos);
                    break;
                }
            }
        }
        events
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Bytes of the unfinished sequence, if any.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }
}

fn scan(input: &[u8]) -> Scan {
    let mut state = State::Ground;
    for (i, &byte) in input.iter().enumerate() {
        state = match (state, byte) {
            (State::Ground, ESC) => State::Escape,
            (State::Ground, _) => return Scan::Key(plain(byte), 1),
            (State::Escape, OPEN) => State::Bracket,
            (State::Escape, _) => return Scan::Key(KeyEvent::Char(char::from(ESC)), 1),
            (State::Bracket, _) => {
                return match arrow(byte) {
                    Some(key) => Scan::Key(key, i + 1),
                    None => Scan::Key(KeyEvent::Char(char::from(ESC)), 1),
                };
            }
        };
    }
    Scan::Incomplete
}

fn arrow(byte: u8) -> Option<KeyEvent> {
    match byte {
        b'A' => Some(KeyEvent::Up),
        b'B' => Some(KeyEvent::Down),
        b'C' => Some(KeyEvent::Right),
        b'D' => Some(KeyEvent::Left),
        _ => None,
    }
}

fn plain(byte: u8) -> KeyEvent {
    match byte {
        b'\r' | b'\n' => KeyEvent::Enter,
        _ => KeyEvent::Char(char::from(byte)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn decode_all(bytes: &[u8]) -> Vec<KeyEvent> {
        KeyDecoder::new().decode(bytes)
    }

    #[test]
    fn test_plain_keys_and_enter() {
        assert_eq!(
            decode_all(b"hQ\r"),
            vec![KeyEvent::Char('h'), KeyEvent::Char('Q'), KeyEvent::Enter]
        );
    }

    #[test]
    fn test_arrow_sequences() {
        assert_eq!(
            decode_all(b"\x1b[A\x1b[B\x1b[C\x1b[D"),
            vec![KeyEvent::Up, KeyEvent::Down, KeyEvent::Right, KeyEvent::Left]
        );
    }

    #[test]
    fn test_unknown_sequence_keeps_every_byte() {
        assert_eq!(
            decode_all(b"\x1b[Zq"),
            vec![
                KeyEvent::Char('\x1b'),
                KeyEvent::Char('['),
                KeyEvent::Char('Z'),
                KeyEvent::Char('q'),
            ]
        );
    }

    #[test]
    fn test_escape_without_bracket_is_plain() {
        assert_eq!(decode_all(b"\x1bx"), vec![KeyEvent::Char('\x1b'), KeyEvent::Char('x')]);
    }

    #[test]
    fn test_lone_escape_is_deferred() {
        let mut decoder = KeyDecoder::new();
        assert_eq!(decoder.decode(b"p\x1b"), vec![KeyEvent::Char('p')]);
        assert_eq!(decoder.pending(), b"\x1b");

        assert_eq!(decoder.decode(b"[B"), vec![KeyEvent::Down]);
        assert!(!decoder.has_pending());
    }

    #[test]
    fn test_sequence_split_after_bracket() {
        let mut decoder = KeyDecoder::new();
        assert!(decoder.decode(b"\x1b[").is_empty());
        assert_eq!(decoder.pending(), b"\x1b[");
        assert!(decoder.decode(b"").is_empty());
        assert_eq!(decoder.decode(b"Ae"), vec![KeyEvent::Up, KeyEvent::Char('e')]);
    }

    #[test]
    fn test_double_escape() {
        let mut decoder = KeyDecoder::new();
        assert_eq!(decoder.decode(b"\x1b\x1b[A"), vec![KeyEvent::Char('\x1b'), KeyEvent::Up]);
        assert!(!decoder.has_pending());
    }

    fn key_bytes() -> impl Strategy<Value = Vec<u8>> {
        let unit = prop_oneof![
            Just(b"\x1b[A".to_vec()),
            Just(b"\x1b[B".to_vec()),
            Just(b"\x1b[C".to_vec()),
            Just(b"\x1b[D".to_vec()),
            Just(b"\x1b[".to_vec()),
            Just(b"\x1b".to_vec()),
            any::<u8>().prop_map(|b| vec![b]),
        ];
        prop::collection::vec(unit, 0..24).prop_map(|units| units.concat())
    }

    proptest! {
        #[test]
        fn test_split_batches_decode_like_one_batch(
            bytes in key_bytes(),
            cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..6),
        ) {
            let mut whole = KeyDecoder::new();
            let expected = whole.decode(&bytes);

            let mut points: Vec<usize> = cuts.iter().map(|c| c.index(bytes.len() + 1)).collect();
            points.sort_unstable();
            let mut split = KeyDecoder::new();
            let mut actual = Vec::new();
            let mut start = 0;
            for point in points.into_iter().chain(std::iter::once(bytes.len())) {
                actual.extend(split.decode(&bytes[start..point]));
                start = point;
            }

            prop_assert_eq!(actual, expected);
            prop_assert_eq!(split.pending(), whole.pending());
        }

        #[test]
        fn test_unrecognized_bracket_sequence_emits_escape_first(x in any::<u8>()) {
            prop_assume!(!matches!(x, b'A'..=b'D' | 0x1b));
            let events = KeyDecoder::new().decode(&[0x1b, b'[', x]);
            prop_assert_eq!(events.len(), 3);
            prop_assert_eq!(events[0], KeyEvent::Char('\x1b'));
            prop_assert_eq!(events[1], KeyEvent::Char('['));
            prop_assert_eq!(events[2], plain(x));
        }
    }
}
