//! Status flags returned by the incremental decoder.

bitflags::bitflags! {
    /// The set of conditions the incremental decoder reports after a call
    /// to [`crate::IncrementalDecoder::decompress_incremental`].
    ///
    /// These are not errors: every flag describes a well-defined reason
    /// the decoder stopped making progress for *this* call, and in every
    /// case the caller can resume by supplying more input, more output
    /// space, or both.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Status: u8 {
        /// The bit queue held fewer bits than the current state needs;
        /// supply more input and call again.
        const INPUT_STARVED = 1 << 0;
        /// The bit queue is empty and no input bytes remain; nothing more
        /// can happen without new input.
        const INPUT_FINISHED = 1 << 1;
        /// The output slice had no room left mid-token; drain it and
        /// supply new output space.
        const NO_OUTPUT_BUFFER_SPACE = 1 << 2;
        /// The end-marker token was consumed; the stream is logically
        /// finished as of the next byte boundary.
        const END_MARKER = 1 << 3;
    }
}
