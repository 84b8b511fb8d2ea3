//! 12-bit LZW decoding
//!
//! Decoding runs in two stages. The code reader unpacks the input into codes,
//! then the dictionary decoder turns the codes into bytes while rebuilding the
//! encoder's table. Both stages are available on their own as well as through
//! the one-shot helpers in this module.

mod codes;
mod dictionary;
mod reader;
mod state;

pub use codes::{read_codes, CodeLayout, CodeReader};
pub use reader::LzwReader;
pub use state::DecodeState;

use crate::{DecodeStats, DecoderConfig, Result};

/// Input buffer size for the streaming reader (multiple of the group size)
pub const IN_BUFF_SIZE: usize = 0xC00;

/// Decode an already unpacked code sequence
///
/// An empty sequence decodes to empty output.
pub fn decode_codes(codes: &[u16], config: &DecoderConfig) -> Result<Vec<u8>> {
    run(codes, config).map(|(output, _)| output)
}

fn run(codes: &[u16], config: &DecoderConfig) -> Result<(Vec<u8>, DecodeState)> {
    let mut state = DecodeState::new(*config);
    let mut output = Vec::with_capacity(codes.len() * 2);
    for &code in codes {
        state.push_code(code, &mut output)?;
    }
    Ok((output, state))
}

/// Decode a packed buffer
pub fn decode_bytes(data: &[u8], config: &DecoderConfig) -> Result<Vec<u8>> {
    decode_with_stats(data, config).map(|(output, _)| output)
}

/// Decode a packed buffer and report what the decoder saw
pub fn decode_with_stats(data: &[u8], config: &DecoderConfig) -> Result<(Vec<u8>, DecodeStats)> {
    let layout = CodeLayout::of(data.len());
    let codes = read_codes(data)?;
    let (output, state) = run(&codes, config)?;

    let mut stats = state.into_stats();
    stats.twelve_bit_codes = layout.twelve_bit_codes;
    if layout.has_trailing_code {
        stats.trailing_code = codes.last().copied();
    }
    stats.finish(data.len() as u64, output.len() as u64);

    log::debug!(
        "Decoded {} codes ({} bytes) into {} bytes, {} resets",
        stats.codes_read,
        stats.input_bytes,
        stats.output_bytes,
        stats.dictionary_resets
    );

    Ok((output, stats))
}

/// Decode a packed buffer into a string, one character per byte
///
/// Each byte becomes the Unicode code point of the same value, so the base
/// alphabet maps onto U+0000..=U+00FF.
pub fn decode_to_string(data: &[u8], config: &DecoderConfig) -> Result<String> {
    let output = decode_bytes(data, config)?;
    Ok(output.into_iter().map(char::from).collect())
}
