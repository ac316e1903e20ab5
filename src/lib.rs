//! This crate implements the decompressor core for LZS (Lempel-Ziv-Stac), the
//! LZ77-derivative compression scheme defined by ANSI X3.241-1994 and
//! documented in [RFC 1967], [RFC 1974], [RFC 2395] and [RFC 3943]. LZS
//! codes a sliding history window of up to 2047 bytes into a compact
//! variable-length token stream of literal bytes and `(offset, length)`
//! back-references.
//!
//! Two decode surfaces are provided:
//!
//! - [`oneshot`] — decodes a complete compressed buffer into an output
//!   buffer in a single call. History is implicit: a back-reference simply
//!   reads from the output already produced.
//! - [`IncrementalDecoder`] — decodes arbitrary-sized input fragments into
//!   arbitrary-sized output fragments, resuming across calls. History is
//!   kept in an explicit ring buffer owned by the decoder.
//!
//! Compression (the encoder), any file or network I/O, and stream framing
//! are out of scope: this crate is a raw bit-stream decoder, nothing more.
//!
//! [RFC 1967]: https://www.rfc-editor.org/rfc/rfc1967
//! [RFC 1974]: https://www.rfc-editor.org/rfc/rfc1974
//! [RFC 2395]: https://www.rfc-editor.org/rfc/rfc2395
//! [RFC 3943]: https://www.rfc-editor.org/rfc/rfc3943
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]

mod bitqueue;
mod error;
mod incremental;
mod length_table;
pub mod oneshot;
mod status;

pub use error::Error;
pub use incremental::{IncrementalDecoder, MIN_HISTORY_SIZE, RECOMMENDED_HISTORY_SIZE};
pub use status::Status;
