//! End-to-end property tests against both decode surfaces: random token
//! sequences built from a small generator (there is no encoder in this
//! crate to produce arbitrary compressed input from), run through the
//! one-shot decoder, the incremental decoder fed whole, and the incremental
//! decoder fed one byte at a time into a one-byte output buffer.

use lzs_core::{IncrementalDecoder, Status};
use proptest::prelude::*;

enum Token {
    Literal(u8),
    BackRef { offset: u32, length: u32 },
}

struct BitWriter {
    bytes: Vec<u8>,
    cur: u8,
    cur_len: u8,
}

impl BitWriter {
    fn new() -> Self {
        Self {
            bytes: Vec::new(),
            cur: 0,
            cur_len: 0,
        }
    }

    fn push(&mut self, value: u32, width: u8) {
        for i in (0..width).rev() {
            self.cur = (self.cur << 1) | ((value >> i) & 1) as u8;
            self.cur_len += 1;
            if self.cur_len == 8 {
                self.bytes.push(self.cur);
                self.cur = 0;
                self.cur_len = 0;
            }
        }
    }

    fn length_code(&mut self, length: u32) {
        match length {
            2 => self.push(0b00, 2),
            3 => self.push(0b01, 2),
            4 => self.push(0b10, 2),
            5 => self.push(0b1100, 4),
            6 => self.push(0b1101, 4),
            7 => self.push(0b1110, 4),
            n => {
                self.push(0b1111, 4);
                let mut remaining = n - 8;
                while remaining >= 15 {
                    self.push(15, 4);
                    remaining -= 15;
                }
                self.push(remaining, 4);
            }
        }
    }

    fn end_marker(&mut self) {
        self.push(1, 1);
        self.push(1, 1);
        self.push(0, 7);
    }

    fn finish(mut self) -> Vec<u8> {
        if self.cur_len > 0 {
            self.cur <<= 8 - self.cur_len;
            self.bytes.push(self.cur);
        }
        self.bytes
    }
}

/// Encodes `tokens` and simulates the same copy semantics the decoder uses,
/// returning `(encoded bytes including an end marker, expected plaintext)`.
fn encode_with_expected(tokens: &[Token]) -> (Vec<u8>, Vec<u8>) {
    let mut w = BitWriter::new();
    let mut expected = Vec::new();
    for token in tokens {
        match *token {
            Token::Literal(b) => {
                w.push(0, 1);
                w.push(u32::from(b), 8);
                expected.push(b);
            }
            Token::BackRef { offset, length } => {
                w.push(1, 1);
                w.push(1, 1);
                w.push(offset, 7);
                w.length_code(length);
                for _ in 0..length {
                    let pos = expected.len();
                    let byte = if (offset as usize) <= pos {
                        expected[pos - offset as usize]
                    } else {
                        0
                    };
                    expected.push(byte);
                }
            }
        }
    }
    w.end_marker();
    (w.finish(), expected)
}

/// Builds a random, always-valid (non-underflowing) token sequence: every
/// back-reference offset is within the plaintext already produced.
fn arb_tokens() -> impl Strategy<Value = Vec<Token>> {
    // Seed with literals, then interleave a few back-references whose
    // offsets are clamped to stay within what's been written so far.
    (
        proptest::collection::vec(any::<u8>(), 1..12),
        proptest::collection::vec((1u32..=64, 2u32..=40), 0..8),
    )
        .prop_map(|(literals, refs)| {
            let mut tokens: Vec<Token> = literals.into_iter().map(Token::Literal).collect();
            let mut produced = tokens.len();
            for (raw_offset, length) in refs {
                if produced == 0 {
                    continue;
                }
                let offset = raw_offset.min(produced as u32).max(1);
                tokens.push(Token::BackRef { offset, length });
                produced += length as usize;
            }
            tokens
        })
}

proptest! {
    #[test]
    fn oneshot_matches_expected_plaintext(tokens in arb_tokens()) {
        let (encoded, expected) = encode_with_expected(&tokens);
        let mut out = vec![0u8; expected.len() + 16];
        let n = lzs_core::oneshot::decompress_into(&mut out, &encoded);
        prop_assert_eq!(&out[..n], expected.as_slice());
    }

    #[test]
    fn incremental_whole_matches_expected_plaintext(tokens in arb_tokens()) {
        let (encoded, expected) = encode_with_expected(&tokens);
        let mut dec = IncrementalDecoder::new(lzs_core::RECOMMENDED_HISTORY_SIZE).unwrap();
        let (out, status) = dec.decompress_to_vec(&encoded);
        prop_assert_eq!(out, expected);
        prop_assert!(status.contains(Status::END_MARKER));
    }

    /// Fragmentation independence: any partitioning of input bytes and
    /// output capacity produces the same concatenated output as one call.
    #[test]
    fn fragmentation_independence(
        tokens in arb_tokens(),
        input_chunk in 1usize..5,
        output_chunk in 1usize..5,
    ) {
        let (encoded, expected) = encode_with_expected(&tokens);

        let mut whole = IncrementalDecoder::new(lzs_core::RECOMMENDED_HISTORY_SIZE).unwrap();
        let (whole_out, _) = whole.decompress_to_vec(&encoded);
        prop_assert_eq!(&whole_out, &expected);

        let mut frag = IncrementalDecoder::new(lzs_core::RECOMMENDED_HISTORY_SIZE).unwrap();
        let mut produced = Vec::new();
        let mut scratch = vec![0u8; output_chunk];
        let mut pos = 0usize;
        let mut guard = 0;
        loop {
            guard += 1;
            prop_assert!(guard < 100_000, "decoder made no progress");

            let end = (pos + input_chunk).min(encoded.len());
            let (consumed, n, status) = frag.decompress_incremental(&encoded[pos..end], &mut scratch);
            produced.extend_from_slice(&scratch[..n]);
            pos += consumed;

            if status.contains(Status::END_MARKER) {
                break;
            }
            if status.contains(Status::INPUT_FINISHED) && pos >= encoded.len() && consumed == 0 && n == 0 {
                break;
            }
        }
        prop_assert_eq!(produced, expected);
    }

    /// Run expansion: `offset = 1` with a single seed literal must expand
    /// to exactly `length + 1` copies of that byte.
    #[test]
    fn run_expansion_offset_one(seed in any::<u8>(), length in 2u32..120) {
        let tokens = vec![Token::Literal(seed), Token::BackRef { offset: 1, length }];
        let (encoded, expected) = encode_with_expected(&tokens);
        prop_assert_eq!(expected.len(), 1 + length as usize);
        prop_assert!(expected.iter().all(|&b| b == seed));

        let mut dec = IncrementalDecoder::new(lzs_core::RECOMMENDED_HISTORY_SIZE).unwrap();
        let (out, _status) = dec.decompress_to_vec(&encoded);
        prop_assert_eq!(out, expected);
    }
}
