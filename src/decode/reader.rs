//! LzwReader - Streaming decompression reader
//!
//! Complete 3-byte groups can be decoded as soon as they arrive, since a
//! group always holds two 12-bit codes. Only the bytes left over at end of
//! input need the trailing-field rule.

use super::{CodeReader, DecodeState, IN_BUFF_SIZE};
use crate::common::GROUP_BYTES;
use crate::{DecodeStats, DecoderConfig, Result};
use std::io::{self, Read};

/// Streaming decompression reader implementing Read trait
#[derive(Debug)]
pub struct LzwReader<R: Read> {
    reader: R,
    state: DecodeState,
    in_buff: Vec<u8>,
    /// Input bytes not yet decoded (less than one group between refills)
    pending: Vec<u8>,
    finished: bool,
    /// Message of the error that aborted the stream
    failure: Option<String>,
    output_buffer: Vec<u8>,
    output_pos: usize,
    input_bytes: u64,
    output_bytes: u64,
    twelve_bit_codes: usize,
    trailing_code: Option<u16>,
}

impl<R: Read> LzwReader<R> {
    /// Create a new LzwReader with the default dictionary limits
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, DecoderConfig::default())
    }

    /// Create a new LzwReader with custom dictionary limits
    pub fn with_config(reader: R, config: DecoderConfig) -> Self {
        Self {
            reader,
            state: DecodeState::new(config),
            in_buff: vec![0; IN_BUFF_SIZE],
            pending: Vec::with_capacity(IN_BUFF_SIZE + GROUP_BYTES),
            finished: false,
            failure: None,
            output_buffer: Vec::new(),
            output_pos: 0,
            input_bytes: 0,
            output_bytes: 0,
            twelve_bit_codes: 0,
            trailing_code: None,
        }
    }

    /// Statistics for the data decoded so far
    pub fn stats(&self) -> DecodeStats {
        let mut stats = self.state.stats().clone();
        stats.twelve_bit_codes = self.twelve_bit_codes;
        stats.trailing_code = self.trailing_code;
        stats.finish(self.input_bytes, self.output_bytes);
        stats
    }

    /// Unwrap the underlying reader
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read input until some output is available or the stream ends
    fn expand(&mut self) -> Result<usize> {
        let mut bytes_written = 0;

        while bytes_written == 0 && !self.finished {
            let bytes_read = match self.reader.read(&mut self.in_buff) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };

            if bytes_read == 0 {
                bytes_written += self.decode_tail()?;
                self.finished = true;
                break;
            }

            self.input_bytes += bytes_read as u64;
            self.pending.extend_from_slice(&self.in_buff[..bytes_read]);
            bytes_written += self.decode_groups()?;
        }

        self.output_bytes += bytes_written as u64;
        Ok(bytes_written)
    }

    /// Decode every complete group in `pending`
    fn decode_groups(&mut self) -> Result<usize> {
        let whole = self.pending.len() - self.pending.len() % GROUP_BYTES;
        if whole == 0 {
            return Ok(0);
        }

        let before = self.output_buffer.len();
        for code in CodeReader::new(&self.pending[..whole]) {
            self.state.push_code(code?, &mut self.output_buffer)?;
            self.twelve_bit_codes += 1;
        }
        self.pending.drain(..whole);

        Ok(self.output_buffer.len() - before)
    }

    /// Decode the 0-2 bytes left at end of input
    fn decode_tail(&mut self) -> Result<usize> {
        let before = self.output_buffer.len();
        for code in CodeReader::new(&self.pending) {
            let code = code?;
            self.state.push_code(code, &mut self.output_buffer)?;
            self.trailing_code = Some(code);
        }
        self.pending.clear();

        if self.state.position() > 0 {
            log::debug!(
                "Stream finished after {} codes, {} resets",
                self.state.position(),
                self.state.stats().dictionary_resets
            );
        }

        Ok(self.output_buffer.len() - before)
    }
}

impl<R: Read> Read for LzwReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(message) = &self.failure {
            return Err(io::Error::new(io::ErrorKind::InvalidData, message.clone()));
        }

        if self.output_pos >= self.output_buffer.len() {
            // Everything buffered has been handed out
            self.output_buffer.clear();
            self.output_pos = 0;

            if self.finished {
                return Ok(0);
            }

            match self.expand() {
                Ok(0) => return Ok(0),
                Ok(_) => {}
                Err(e) => {
                    // The whole stream is aborted; partial output is dropped
                    self.finished = true;
                    self.output_buffer.clear();
                    self.pending.clear();
                    self.failure = Some(e.to_string());
                    return Err(io::Error::new(io::ErrorKind::InvalidData, e));
                }
            }
        }

        let available = self.output_buffer.len() - self.output_pos;
        let to_copy = buf.len().min(available);
        buf[..to_copy]
            .copy_from_slice(&self.output_buffer[self.output_pos..self.output_pos + to_copy]);
        self.output_pos += to_copy;

        Ok(to_copy)
    }
}
