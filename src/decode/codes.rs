//! Code extraction from packed input
//!
//! Every complete 3-byte group holds two 12-bit codes, most significant bit
//! first. When the input length is not a multiple of three, one 16-bit code
//! follows the last group. Bits are read continuously with no padding.

use crate::common::{CODES_PER_GROUP, CODE_BITS, GROUP_BYTES, TRAILING_CODE_BITS};
use crate::{LzwError, Result};
use bitstream_io::{BigEndian, BitRead, BitReader};
use std::fmt;
use std::io::{self, Cursor};

/// Shape of a packed code stream, derived from its length alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeLayout {
    /// Packed input size
    pub input_bytes: usize,
    /// Codes stored in complete 3-byte groups
    pub twelve_bit_codes: usize,
    /// Whether a 16-bit code follows the last group
    pub has_trailing_code: bool,
}

impl CodeLayout {
    /// Compute the layout of an input of `input_bytes` bytes
    pub fn of(input_bytes: usize) -> Self {
        Self {
            input_bytes,
            twelve_bit_codes: (input_bytes / GROUP_BYTES) * CODES_PER_GROUP,
            has_trailing_code: input_bytes % GROUP_BYTES != 0,
        }
    }

    /// Number of codes the layout asks for
    pub fn total_codes(&self) -> usize {
        self.twelve_bit_codes + usize::from(self.has_trailing_code)
    }

    /// Bits available in the input
    pub fn input_bits(&self) -> u64 {
        self.input_bytes as u64 * 8
    }

    /// Bits the layout reads
    pub fn requested_bits(&self) -> u64 {
        let trailing = if self.has_trailing_code {
            TRAILING_CODE_BITS as u64
        } else {
            0
        };
        self.twelve_bit_codes as u64 * CODE_BITS as u64 + trailing
    }

    /// True when the trailing field runs past the end of the input
    ///
    /// This is the case for every length of the form `3k + 1`.
    pub fn is_truncated(&self) -> bool {
        self.requested_bits() > self.input_bits()
    }
}

/// Iterator over the codes of a packed buffer
///
/// Yields `Err(LzwError::TruncatedInput)` once and then stops if the buffer
/// runs out of bits.
pub struct CodeReader<'a> {
    bits: BitReader<Cursor<&'a [u8]>, BigEndian>,
    layout: CodeLayout,
    produced: usize,
    consumed_bits: u64,
    failed: bool,
}

impl fmt::Debug for CodeReader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeReader")
            .field("layout", &self.layout)
            .field("produced", &self.produced)
            .field("consumed_bits", &self.consumed_bits)
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}

impl<'a> CodeReader<'a> {
    /// Create a reader over `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            bits: BitReader::endian(Cursor::new(data), BigEndian),
            layout: CodeLayout::of(data.len()),
            produced: 0,
            consumed_bits: 0,
            failed: false,
        }
    }

    /// Layout of the underlying buffer
    pub fn layout(&self) -> CodeLayout {
        self.layout
    }

    /// Codes returned so far
    pub fn position(&self) -> usize {
        self.produced
    }

    fn read_field(&mut self, width: u32) -> Result<u16> {
        match self.bits.read::<u16>(width) {
            Ok(code) => {
                self.consumed_bits += width as u64;
                Ok(code)
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(LzwError::TruncatedInput {
                needed_bits: width,
                available_bits: self.layout.input_bits() - self.consumed_bits,
            }),
            Err(e) => Err(LzwError::Io(e)),
        }
    }
}

impl Iterator for CodeReader<'_> {
    type Item = Result<u16>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let width = if self.produced < self.layout.twelve_bit_codes {
            CODE_BITS
        } else if self.produced == self.layout.twelve_bit_codes && self.layout.has_trailing_code {
            TRAILING_CODE_BITS
        } else {
            return None;
        };

        let result = self.read_field(width);
        match result {
            Ok(_) => self.produced += 1,
            Err(_) => self.failed = true,
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = self.layout.total_codes() - self.produced;
        (remaining, Some(remaining))
    }
}

/// Read every code from a packed buffer
///
/// Fails with [`LzwError::TruncatedInput`] without returning any codes if the
/// buffer ends inside a field.
pub fn read_codes(data: &[u8]) -> Result<Vec<u16>> {
    CodeReader::new(data).collect()
}
