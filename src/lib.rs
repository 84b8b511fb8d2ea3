//! lzw12 - Decoder for fixed-width 12-bit LZW streams
//!
//! This crate decodes the classic "12-bit LZW with reset" format: two codes
//! packed into every three bytes, an optional 16-bit trailing code, a 256
//! entry byte alphabet and a dictionary that is thrown away and rebuilt once
//! it reaches 4096 entries.
//!
//! # Features
//!
//! - One-shot decoding of in-memory buffers
//! - Streaming API via the `Read` trait
//! - Configurable base alphabet and reset threshold
//! - Per-stream statistics (codes, resets, KwK resolutions)
//! - Optional async front-end and concurrent batch decoding (`async` feature)
//!
//! # Example
//!
//! ```no_run
//! use lzw12::{decode_bytes, decode_to_string, DecoderConfig, LzwReader};
//! use std::io::Read;
//!
//! let compressed = std::fs::read("compressedfile1.z")?;
//! let config = DecoderConfig::default();
//!
//! // Raw bytes or text, one character per byte
//! let bytes = decode_bytes(&compressed)?;
//! let text = decode_to_string(&compressed, &config)?;
//!
//! // Or use the streaming API
//! let mut reader = LzwReader::new(std::io::Cursor::new(compressed));
//! let mut output = Vec::new();
//! reader.read_to_end(&mut output)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod common;
pub mod decode;
pub mod error;

// Async modules (only available with async feature)
#[cfg(feature = "async")]
pub mod async_batch;
#[cfg(feature = "async")]
pub mod async_decode;

// Re-export commonly used types
pub use common::{
    DecodeStats, DecoderConfig, LzwError, Result, DICTIONARY_INIT_SIZE, MAX_DICTIONARY_SIZE,
};
pub use decode::{
    decode_codes, decode_to_string, decode_with_stats, read_codes, CodeLayout, CodeReader,
    DecodeState, LzwReader,
};

#[cfg(feature = "async")]
pub use async_batch::AsyncBatchDecoder;
#[cfg(feature = "async")]
pub use async_decode::{decode_async, decode_with_timeout};

/// Decode a packed buffer with the default dictionary limits
///
/// # Arguments
/// * `data` - The packed code stream
///
/// # Returns
/// The decoded bytes. An empty buffer decodes to an empty vector.
pub fn decode_bytes(data: &[u8]) -> Result<Vec<u8>> {
    decode::decode_bytes(data, &DecoderConfig::default())
}

/// Decode a packed buffer with custom dictionary limits
pub fn decode_bytes_with_config(data: &[u8], config: &DecoderConfig) -> Result<Vec<u8>> {
    decode::decode_bytes(data, config)
}
