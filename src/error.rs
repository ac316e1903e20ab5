//! Construction-time failure modes.
//!
//! Per-call decode outcomes are reported through [`crate::Status`] flags, not
//! `Result` — a malformed mid-stream bit pattern is defined behavior (see the
//! crate-level docs), not a recoverable error. The only thing that can
//! actually fail in this crate is asking for a history buffer too small to
//! hold the largest representable back-reference offset.

/// Errors returned when constructing a decoder.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested history buffer is smaller than the largest
    /// representable back-reference offset (2047 bytes).
    #[error("history buffer of {provided} bytes is smaller than the minimum of {minimum}")]
    HistoryBufferTooSmall {
        /// The size the caller asked for.
        provided: usize,
        /// The minimum usable size (2047).
        minimum: usize,
    },
}
