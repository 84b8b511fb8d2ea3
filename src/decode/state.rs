//! Dictionary decoder state
//!
//! `DecodeState` consumes codes one at a time, appends each decoded chunk to
//! a caller supplied sink and rebuilds the dictionary whenever it fills up.

use super::dictionary::{Dictionary, Lookup, Span};
use crate::{DecodeStats, DecoderConfig, LzwError, Result};

/// Incremental LZW decoder
#[derive(Debug)]
pub struct DecodeState {
    dictionary: Dictionary,
    /// Output of the current dictionary generation; grown entries point into it
    window: Vec<u8>,
    position: usize,
    stats: DecodeStats,
    /// Code, next index and position of the code that aborted decoding
    failed: Option<(u16, usize, usize)>,
}

impl DecodeState {
    /// Create a decoder with the given dictionary limits
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            dictionary: Dictionary::new(&config),
            window: Vec::new(),
            position: 0,
            stats: DecodeStats::default(),
            failed: None,
        }
    }

    /// Decode one code and append its string to `out`
    ///
    /// On error nothing is appended. Every later call fails with the same
    /// error without touching the dictionary.
    pub fn push_code(&mut self, code: u16, out: &mut Vec<u8>) -> Result<()> {
        if let Some((code, next_index, position)) = self.failed {
            return Err(LzwError::InvalidCode {
                code,
                next_index,
                position,
            });
        }

        if self.position == 0 {
            self.start_generation(code, out)?;
        } else if self.dictionary.is_full() {
            self.reset();
            self.start_generation(code, out)?;
        } else {
            self.continue_generation(code, out)?;
        }

        self.position += 1;
        self.stats.codes_read += 1;
        Ok(())
    }

    /// Next free dictionary index
    pub fn next_index(&self) -> usize {
        self.dictionary.next_index()
    }

    /// Codes consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    /// Statistics gathered so far
    pub fn stats(&self) -> &DecodeStats {
        &self.stats
    }

    /// Consume the state and return its statistics
    pub fn into_stats(self) -> DecodeStats {
        self.stats
    }

    fn reset(&mut self) {
        self.dictionary.reset();
        self.window.clear();
        self.stats.dictionary_resets += 1;
        log::debug!(
            "Dictionary full at code {}, reset #{}",
            self.position,
            self.stats.dictionary_resets
        );
    }

    // First code of a stream or of a fresh dictionary: only base entries exist
    fn start_generation(&mut self, code: u16, out: &mut Vec<u8>) -> Result<()> {
        if !self.dictionary.is_base(code) {
            return Err(self.invalid_code(code));
        }

        let start = self.window.len();
        self.window.push(code as u8);
        out.push(code as u8);
        self.dictionary.stage(Span::new(start, 1));
        Ok(())
    }

    fn continue_generation(&mut self, code: u16, out: &mut Vec<u8>) -> Result<()> {
        let start = self.window.len();

        match self.dictionary.lookup(code) {
            Lookup::Byte(byte) => self.window.push(byte),
            Lookup::Window(entry) => self.window.extend_from_within(entry.range()),
            Lookup::Pending(previous) => {
                // KwK: previous chunk plus its own first byte
                self.window.extend_from_within(previous.range());
                let first = self.window[previous.start];
                self.window.push(first);
                self.stats.kwk_resolutions += 1;
                log::trace!("KwK code {} at position {}", code, self.position);
            }
            Lookup::Missing => return Err(self.invalid_code(code)),
        }

        let chunk = Span::new(start, self.window.len() - start);
        out.extend_from_slice(&self.window[chunk.range()]);

        self.dictionary.confirm();
        self.dictionary.stage(chunk);
        Ok(())
    }

    fn invalid_code(&mut self, code: u16) -> LzwError {
        let next_index = self.dictionary.next_index();
        self.failed = Some((code, next_index, self.position));
        LzwError::InvalidCode {
            code,
            next_index,
            position: self.position,
        }
    }
}
