//! Common types and constants for the 12-bit LZW decoder
//!
//! This module defines the configuration, error type and statistics shared by
//! the code reader, the dictionary decoder and the streaming front-ends.

use std::time::Duration;
use thiserror::Error;

/// Number of single-byte entries in the base dictionary
pub const DICTIONARY_INIT_SIZE: usize = 0x100; // 256 entries

/// Dictionary size at which the table is discarded and rebuilt
pub const MAX_DICTIONARY_SIZE: usize = 0x1000; // 4096 entries

/// Width of an ordinary packed code
pub const CODE_BITS: u32 = 12;

/// Width of the trailing code stored after the last complete 3-byte group
pub const TRAILING_CODE_BITS: u32 = 16;

/// Bytes in one packed group (two 12-bit codes)
pub const GROUP_BYTES: usize = 3;

/// Codes held by one packed group
pub const CODES_PER_GROUP: usize = 2;

/// Largest dictionary a code stream can address (16-bit codes)
pub const MAX_ADDRESSABLE_CODES: usize = 1 << TRAILING_CODE_BITS;

/// Dictionary limits used by the decoder
///
/// The defaults match the common 12-bit LZW layout: a 256 entry byte alphabet
/// and a reset once 4096 entries exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    dictionary_init_size: usize,
    max_dictionary_size: usize,
}

impl DecoderConfig {
    /// Create a validated configuration
    ///
    /// `dictionary_init_size` must be in `1..=256` and `max_dictionary_size`
    /// must be larger than it and no larger than 65536.
    pub fn new(dictionary_init_size: usize, max_dictionary_size: usize) -> Result<Self> {
        if dictionary_init_size == 0 || dictionary_init_size > DICTIONARY_INIT_SIZE {
            return Err(LzwError::InvalidConfig(format!(
                "dictionary_init_size {dictionary_init_size} outside 1..={DICTIONARY_INIT_SIZE}"
            )));
        }
        if max_dictionary_size <= dictionary_init_size {
            return Err(LzwError::InvalidConfig(format!(
                "max_dictionary_size {max_dictionary_size} must exceed dictionary_init_size {dictionary_init_size}"
            )));
        }
        if max_dictionary_size > MAX_ADDRESSABLE_CODES {
            return Err(LzwError::InvalidConfig(format!(
                "max_dictionary_size {max_dictionary_size} exceeds {MAX_ADDRESSABLE_CODES}"
            )));
        }

        Ok(Self {
            dictionary_init_size,
            max_dictionary_size,
        })
    }

    /// Size of the base alphabet
    pub fn dictionary_init_size(&self) -> usize {
        self.dictionary_init_size
    }

    /// Reset threshold
    pub fn max_dictionary_size(&self) -> usize {
        self.max_dictionary_size
    }

    /// Number of entries a single dictionary generation can grow
    pub fn grown_capacity(&self) -> usize {
        self.max_dictionary_size - self.dictionary_init_size
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            dictionary_init_size: DICTIONARY_INIT_SIZE,
            max_dictionary_size: MAX_DICTIONARY_SIZE,
        }
    }
}

/// Error type for LZW decoding
#[derive(Debug, Error)]
pub enum LzwError {
    /// The packed buffer ends in the middle of a code field
    #[error("Truncated input: needed {needed_bits} bits, {available_bits} available")]
    TruncatedInput {
        /// Width of the field being read
        needed_bits: u32,
        /// Bits left in the buffer when the read failed
        available_bits: u64,
    },

    /// A code refers to a dictionary slot that does not exist yet
    #[error("Invalid code {code} at position {position} (next dictionary index is {next_index})")]
    InvalidCode {
        /// The offending code
        code: u16,
        /// Next free dictionary index when the code was read
        next_index: usize,
        /// Index of the code in the stream
        position: usize,
    },

    /// Dictionary limits are out of range
    #[error("Invalid decoder configuration: {0}")]
    InvalidConfig(String),

    /// Decoding did not finish within the allotted time
    #[error("Decoding timed out after {0:?}")]
    Timeout(Duration),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for LZW operations
pub type Result<T> = std::result::Result<T, LzwError>;

/// Statistics collected while decoding one stream
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DecodeStats {
    /// Total codes consumed
    pub codes_read: usize,
    /// Codes read from complete 3-byte groups
    pub twelve_bit_codes: usize,
    /// Value of the 16-bit trailing code, if the stream had one
    pub trailing_code: Option<u16>,
    /// Number of times the dictionary was rebuilt
    pub dictionary_resets: usize,
    /// Codes that referred to the entry under construction
    pub kwk_resolutions: usize,
    /// Packed input size
    pub input_bytes: u64,
    /// Decoded output size
    pub output_bytes: u64,
    /// Packed size divided by decoded size, so 0.25 means the packed stream
    /// is a quarter of the decoded data. Zero when nothing was decoded.
    pub compression_ratio: f64,
}

impl DecodeStats {
    /// Fill in the size-derived fields once decoding has finished
    pub fn finish(&mut self, input_bytes: u64, output_bytes: u64) {
        self.input_bytes = input_bytes;
        self.output_bytes = output_bytes;
        self.compression_ratio = if output_bytes > 0 {
            input_bytes as f64 / output_bytes as f64
        } else {
            0.0
        };
    }
}
