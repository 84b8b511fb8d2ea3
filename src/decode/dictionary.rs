//! Code to string table
//!
//! Grown entries are stored as spans into the output window of the current
//! dictionary generation. A grown entry is always the previous chunk followed
//! by the first byte of the chunk emitted right after it, and those bytes sit
//! next to each other in the window.

use crate::DecoderConfig;
use std::ops::Range;

/// Location of a decoded string inside the generation window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }

    /// The same span plus the byte that follows it in the window
    fn extended(self) -> Self {
        Self {
            start: self.start,
            len: self.len + 1,
        }
    }
}

/// Result of resolving a code against the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lookup {
    /// Base alphabet entry
    Byte(u8),
    /// Confirmed grown entry
    Window(Span),
    /// The entry under construction (KwK); holds the previous chunk
    Pending(Span),
    /// No such entry
    Missing,
}

#[derive(Debug)]
pub(crate) struct Dictionary {
    init_size: usize,
    max_size: usize,
    grown: Vec<Span>,
    // Entry at `next_index`, staged from the last chunk and confirmed by the next code
    tentative: Option<Span>,
}

impl Dictionary {
    pub fn new(config: &DecoderConfig) -> Self {
        Self {
            init_size: config.dictionary_init_size(),
            max_size: config.max_dictionary_size(),
            grown: Vec::with_capacity(config.grown_capacity()),
            tentative: None,
        }
    }

    pub fn next_index(&self) -> usize {
        self.init_size + self.grown.len()
    }

    pub fn is_full(&self) -> bool {
        self.next_index() >= self.max_size
    }

    /// Whether `code` is valid as the first code of a generation
    pub fn is_base(&self, code: u16) -> bool {
        (code as usize) < self.init_size
    }

    /// Drop every grown and tentative entry
    pub fn reset(&mut self) {
        self.grown.clear();
        self.tentative = None;
    }

    pub fn lookup(&self, code: u16) -> Lookup {
        let code = code as usize;
        let next_index = self.next_index();

        if code < self.init_size {
            Lookup::Byte(code as u8)
        } else if code < next_index {
            Lookup::Window(self.grown[code - self.init_size])
        } else if code == next_index {
            self.tentative.map_or(Lookup::Missing, Lookup::Pending)
        } else {
            Lookup::Missing
        }
    }

    /// Stage the last emitted chunk as the entry at `next_index`
    pub fn stage(&mut self, chunk: Span) {
        self.tentative = Some(chunk);
    }

    /// Confirm the staged entry as the staged chunk plus the byte after it
    ///
    /// Must be called once the following chunk has been written to the
    /// window, so the extra byte is that chunk's first byte. A full table is
    /// reset before any further code reaches it.
    pub fn confirm(&mut self) {
        debug_assert!(!self.is_full(), "confirm on a full dictionary");
        if let Some(chunk) = self.tentative.take() {
            self.grown.push(chunk.extended());
        }
    }
}
