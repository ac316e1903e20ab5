//! The resumable decoder: the same LZS grammar as [`crate::oneshot`], but
//! coded as an explicit state machine whose fields persist across calls, so
//! arbitrarily-sized input fragments can be fed against arbitrarily-sized
//! output fragments without losing a partially-decoded token.

use crate::bitqueue::BitQueue;
use crate::error::Error;
use crate::length_table;
use crate::status::Status;

/// Smallest history buffer that can hold the largest representable
/// back-reference offset.
pub const MIN_HISTORY_SIZE: usize = 2047;

/// Recommended history buffer size.
pub const RECOMMENDED_HISTORY_SIZE: usize = 2048;

/// One state of the token-decode automaton.
///
/// Transitions are written out explicitly rather than relying on the enum's
/// declaration order (unlike the reference C implementation, which advances
/// `COPY_DATA`/`COPY_EXTENDED_DATA` to their successors by incrementing the
/// state ordinal) — ordering coincidences like that are too easy to break
/// silently during a refactor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    GetTokenType,
    GetLiteral,
    GetOffsetType,
    GetOffsetShort,
    GetOffsetLong,
    GetLength,
    CopyData,
    CopyExtendedData,
    GetExtendedLength,
}

impl State {
    /// Minimum bits the queue must hold before this state may run.
    /// `GetLength` is allowed to run with whatever is available because its
    /// own required width depends on a 4-bit peek it performs itself.
    const fn min_bits(self) -> u8 {
        match self {
            State::GetTokenType | State::GetOffsetType => 1,
            State::GetLiteral => 8,
            State::GetOffsetShort => 7,
            State::GetOffsetLong => 11,
            State::GetLength | State::CopyData | State::CopyExtendedData => 0,
            State::GetExtendedLength => 4,
        }
    }
}

enum ControlFlow {
    Continue,
    Stop(Status),
}

/// A resumable LZS decoder with an explicit ring-buffer history.
#[derive(Debug)]
pub struct IncrementalDecoder {
    queue: BitQueue,
    state: State,
    offset: u32,
    length: u32,
    history: Vec<u8>,
    write_idx: usize,
    read_idx: usize,
    /// Bytes written to the ring so far, saturating at `history.len()`.
    /// Not consulted by the copy path (which trusts the caller to have
    /// zero-initialized the ring per the under-history rule) but kept for
    /// callers that want to know whether the window has fully filled.
    history_filled: usize,
    last_status: Status,
}

impl IncrementalDecoder {
    /// Creates a new decoder with a history ring of `history_buffer_size`
    /// bytes, which must be at least [`MIN_HISTORY_SIZE`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::HistoryBufferTooSmall`] if `history_buffer_size` is
    /// too small to address every representable back-reference offset.
    pub fn new(history_buffer_size: usize) -> Result<Self, Error> {
        if history_buffer_size < MIN_HISTORY_SIZE {
            return Err(Error::HistoryBufferTooSmall {
                provided: history_buffer_size,
                minimum: MIN_HISTORY_SIZE,
            });
        }
        Ok(Self {
            queue: BitQueue::new(),
            state: State::GetTokenType,
            offset: 0,
            length: 0,
            history: vec![0u8; history_buffer_size],
            write_idx: 0,
            read_idx: 0,
            history_filled: 0,
            last_status: Status::empty(),
        })
    }

    /// Resets the decoder to its initial state, re-zeroing the history
    /// ring. Equivalent to the reference implementation's `init`.
    pub fn reset(&mut self) {
        self.queue = BitQueue::new();
        self.state = State::GetTokenType;
        self.offset = 0;
        self.length = 0;
        self.history.iter_mut().for_each(|b| *b = 0);
        self.write_idx = 0;
        self.read_idx = 0;
        self.history_filled = 0;
        self.last_status = Status::empty();
    }

    /// The status the most recent call to [`Self::decompress_incremental`]
    /// returned.
    #[must_use]
    pub const fn last_status(&self) -> Status {
        self.last_status
    }

    fn push_history(&mut self, byte: u8) {
        let cap = self.history.len();
        self.history[self.write_idx] = byte;
        self.write_idx = (self.write_idx + 1) % cap;
        if self.history_filled < cap {
            self.history_filled += 1;
        }
    }

    fn begin_copy(&mut self, length: u32) {
        let cap = self.history.len();
        self.length = length;
        self.read_idx = (self.write_idx + cap - (self.offset as usize)) % cap;
    }

    /// Runs the back-reference copy loop for `CopyData`/`CopyExtendedData`
    /// until `length` reaches zero or the output slice is exhausted.
    fn run_copy(&mut self, output: &mut [u8], out_pos: &mut usize, next: State) -> ControlFlow {
        while self.length > 0 {
            if *out_pos >= output.len() {
                return ControlFlow::Stop(Status::NO_OUTPUT_BUFFER_SPACE);
            }
            let byte = self.history[self.read_idx];
            output[*out_pos] = byte;
            *out_pos += 1;
            self.read_idx = (self.read_idx + 1) % self.history.len();
            self.push_history(byte);
            self.length -= 1;
        }
        self.state = next;
        ControlFlow::Continue
    }

    /// Executes exactly one state action.
    fn step(&mut self, output: &mut [u8], out_pos: &mut usize) -> ControlFlow {
        match self.state {
            State::GetTokenType => {
                let bit = self.queue.peek(1);
                self.queue.drop_bits(1);
                self.state = if bit == 0 {
                    State::GetLiteral
                } else {
                    State::GetOffsetType
                };
                ControlFlow::Continue
            }
            State::GetLiteral => {
                if *out_pos >= output.len() {
                    return ControlFlow::Stop(Status::NO_OUTPUT_BUFFER_SPACE);
                }
                let byte = self.queue.peek(8) as u8;
                self.queue.drop_bits(8);
                output[*out_pos] = byte;
                *out_pos += 1;
                self.push_history(byte);
                self.state = State::GetTokenType;
                ControlFlow::Continue
            }
            State::GetOffsetType => {
                let bit = self.queue.peek(1);
                self.queue.drop_bits(1);
                self.state = if bit == 1 {
                    State::GetOffsetShort
                } else {
                    State::GetOffsetLong
                };
                ControlFlow::Continue
            }
            State::GetOffsetShort => {
                let value = self.queue.peek(7);
                self.queue.drop_bits(7);
                if value == 0 {
                    self.queue.align_to_byte();
                    self.state = State::GetTokenType;
                    log::debug!("lzs: end marker consumed, realigned to byte boundary");
                    return ControlFlow::Stop(Status::END_MARKER);
                }
                self.offset = value;
                self.state = State::GetLength;
                ControlFlow::Continue
            }
            State::GetOffsetLong => {
                let value = self.queue.peek(11);
                self.queue.drop_bits(11);
                self.offset = value;
                self.state = State::GetLength;
                ControlFlow::Continue
            }
            State::GetLength => {
                let entry = length_table::lookup(self.queue.peek(4));
                if self.queue.occupancy() < entry.width {
                    log::trace!("lzs: starved decoding length prefix, suspending");
                    return ControlFlow::Stop(Status::INPUT_STARVED);
                }
                self.queue.drop_bits(entry.width);
                self.begin_copy(u32::from(entry.length));
                self.state = if entry.length == 8 {
                    State::CopyExtendedData
                } else {
                    State::CopyData
                };
                ControlFlow::Continue
            }
            State::CopyData => self.run_copy(output, out_pos, State::GetTokenType),
            State::CopyExtendedData => self.run_copy(output, out_pos, State::GetExtendedLength),
            State::GetExtendedLength => {
                let nibble = self.queue.peek(4);
                self.queue.drop_bits(4);
                self.length = nibble;
                self.state = if nibble == 15 {
                    State::CopyExtendedData
                } else {
                    State::CopyData
                };
                ControlFlow::Continue
            }
        }
    }

    /// Consumes as much of `input` as the current state needs and produces
    /// as much decoded output into `output` as fits, resuming wherever the
    /// previous call left off.
    ///
    /// Returns `(bytes consumed from input, bytes written to output,
    /// status)`. The caller advances its own input cursor by the first
    /// element and supplies fresh output starting past the second.
    pub fn decompress_incremental(&mut self, input: &[u8], output: &mut [u8]) -> (usize, usize, Status) {
        let mut in_pos = 0usize;
        let mut out_pos = 0usize;
        let status = loop {
            in_pos += self.queue.refill(&input[in_pos..]);
            if self.queue.occupancy() == 0 {
                break Status::INPUT_FINISHED | Status::INPUT_STARVED;
            }
            if self.queue.occupancy() < self.state.min_bits() {
                break Status::INPUT_STARVED;
            }
            match self.step(output, &mut out_pos) {
                ControlFlow::Continue => continue,
                ControlFlow::Stop(flag) => break flag,
            }
        };
        self.last_status = status;
        (in_pos, out_pos, status)
    }

    /// Drives [`Self::decompress_incremental`] against an internally
    /// managed scratch buffer until the decoder either runs out of input or
    /// reports the end marker, returning everything it produced.
    ///
    /// This is a convenience on top of the normative, allocation-free call
    /// above; it is not part of the wire format.
    pub fn decompress_to_vec(&mut self, mut input: &[u8]) -> (Vec<u8>, Status) {
        let mut out = Vec::new();
        let mut scratch = [0u8; 4096];
        let mut status;
        loop {
            let (consumed, produced, s) = self.decompress_incremental(input, &mut scratch);
            out.extend_from_slice(&scratch[..produced]);
            input = &input[consumed..];
            status = s;
            if status.contains(Status::END_MARKER) {
                break;
            }
            if status.contains(Status::INPUT_FINISHED) && !status.contains(Status::NO_OUTPUT_BUFFER_SPACE)
            {
                break;
            }
            if consumed == 0 && produced == 0 {
                // No forward progress is possible (starved with no new
                // input, or no output space and caller gave us none to
                // drain into) — avoid spinning forever.
                break;
            }
        }
        (out, status)
    }
}
