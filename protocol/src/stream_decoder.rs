//! Incremental zlib decompression with a bounded output buffer.
//!
//! Compressed payloads are decoded through a fixed-capacity buffer that is
//! reused for every chunk, so peak memory stays constant regardless of the
//! decompressed size. Callers receive output through an `emit` callback.

use flate2::{Decompress, FlushDecompress, Status};

use crate::ProtocolError;

/// Outcome of a [`StreamDecoder::decode`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeStatus {
    /// The compressed stream is complete; all output has been emitted.
    Done,
    /// Input was exhausted mid-stream; feed more bytes to continue.
    InputRequired,
}

/// A resumable zlib decoder.
///
/// One decoder handles one compressed stream. Bytes decoded but not yet
/// emitted are kept across [`decode`](Self::decode) calls, so a stream can
/// be fed in arbitrary pieces without losing data. Reuse after `Done` is
/// unsupported.
pub struct StreamDecoder {
    inflate: Decompress,
    buffer: Vec<u8>,
    filled: usize,
}

impl StreamDecoder {
    /// Create a decoder with the given output buffer capacity.
    pub fn new(buffer_size: usize) -> Self {
        assert!(buffer_size > 0, "decoder buffer must be non-empty");
        Self {
            inflate: Decompress::new(true),
            buffer: vec![0u8; buffer_size],
            filled: 0,
        }
    }

    /// Decompress `input`, handing each full buffer (and the final partial
    /// one) to `emit`.
    ///
    /// The slice passed to `emit` is only valid for the duration of the
    /// callback. Empty input is refused rather than treated as a no-op so
    /// that a vanished response body cannot masquerade as a valid stream.
    pub fn decode(
        &mut self,
        input: &[u8],
        mut emit: impl FnMut(&[u8]),
    ) -> Result<DecodeStatus, ProtocolError> {
        if input.is_empty() {
            return Err(ProtocolError::EmptyInput);
        }

        let mut consumed = 0;
        loop {
            let before_in = self.inflate.total_in();
            let before_out = self.inflate.total_out();
            let status = self
                .inflate
                .decompress(
                    &input[consumed..],
                    &mut self.buffer[self.filled..],
                    FlushDecompress::None,
                )
                .map_err(|e| ProtocolError::Decompress(e.to_string()))?;
            consumed += (self.inflate.total_in() - before_in) as usize;
            self.filled += (self.inflate.total_out() - before_out) as usize;

            match status {
                Status::StreamEnd => {
                    if self.filled > 0 {
                        emit(&self.buffer[..self.filled]);
                        self.filled = 0;
                    }
                    return Ok(DecodeStatus::Done);
                }
                Status::Ok | Status::BufError => {
                    if self.filled == self.buffer.len() {
                        emit(&self.buffer[..self.filled]);
                        self.filled = 0;
                        continue;
                    }
                    if consumed == input.len() {
                        return Ok(DecodeStatus::InputRequired);
                    }
                    // Input remains and the buffer has space, yet the
                    // decoder made no progress.
                    if status == Status::BufError {
                        return Err(ProtocolError::Decompress("decoder stalled".into()));
                    }
                }
            }
        }
    }
}
