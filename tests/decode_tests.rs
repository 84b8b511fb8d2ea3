//! Tests for LZW decoding behaviour
//!
//! These tests cover the dictionary growth rules, the KwK case, the reset
//! boundary and round trips against a reference encoder.

mod common;

use common::{compress, encode, encode_default, lorem, pack};
use lzw12::{
    decode_bytes, decode_codes, decode_to_string, decode_with_stats, DecoderConfig, LzwError,
};

/// Codes 0..=255 in order reproduce the byte alphabet
#[test]
fn test_base_alphabet_fidelity() -> Result<(), Box<dyn std::error::Error>> {
    let codes: Vec<u16> = (0..=255).collect();
    let expected: Vec<u8> = (0..=255).collect();

    let output = decode_codes(&codes, &DecoderConfig::default())?;
    assert_eq!(output, expected);

    // Same result through the packed format (256 codes, no trailing field)
    let packed = pack(&codes);
    assert_eq!(packed.len(), 384);
    assert_eq!(decode_bytes(&packed)?, expected);

    Ok(())
}

/// Code 256 right after 65 refers to the entry under construction
#[test]
fn test_kwk_resolution() -> Result<(), Box<dyn std::error::Error>> {
    let output = decode_codes(&[65, 256], &DecoderConfig::default())?;
    assert_eq!(output, b"AAA");

    // Also resolved mid-stream
    let output = decode_codes(&[66, 65, 257], &DecoderConfig::default())?;
    assert_eq!(output, b"BAAA");

    Ok(())
}

/// Driving next_index to 4096 forces a reset on the following code
#[test]
fn test_reset_boundary() -> Result<(), Box<dyn std::error::Error>> {
    let config = DecoderConfig::default();

    // 3840 codes take next_index from 256 to 4095; code 4095 is then the
    // KwK slot and confirming it brings next_index to 4096.
    let mut codes = vec![0u16; 3840];
    codes.push(4095);

    // After the reset, 65 starts a fresh table and 256 is its KwK slot
    codes.extend_from_slice(&[65, 256]);

    let (output, stats) = decode_with_stats(&pack(&codes), &config)?;

    let mut expected = vec![0u8; 3842];
    expected.extend_from_slice(b"AAA");
    assert_eq!(output, expected);
    assert_eq!(stats.dictionary_resets, 1);
    assert_eq!(stats.kwk_resolutions, 2);
    assert_eq!(stats.trailing_code, Some(256));

    Ok(())
}

/// The first code after a reset must be a base entry
#[test]
fn test_post_reset_code_resolved_against_base_table() {
    let mut codes = vec![0u16; 3841];
    // Valid before the reset, not after it
    codes.push(300);

    let err = decode_codes(&codes, &DecoderConfig::default()).unwrap_err();
    match err {
        LzwError::InvalidCode {
            code,
            next_index,
            position,
        } => {
            assert_eq!(code, 300);
            assert_eq!(next_index, 256);
            assert_eq!(position, 3841);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

/// No reset happens one code early
#[test]
fn test_no_reset_before_table_is_full() -> Result<(), Box<dyn std::error::Error>> {
    // 3840 codes leave next_index at 4095, so 4095 is still addressable
    let mut codes = vec![0u16; 3840];
    codes.push(4095);

    let (_, stats) = decode_with_stats(&pack(&codes), &DecoderConfig::default())?;
    assert_eq!(stats.dictionary_resets, 0);
    assert_eq!(stats.kwk_resolutions, 1);

    Ok(())
}

#[test]
fn test_invalid_codes() {
    let config = DecoderConfig::default();

    // Skips ahead of next_index
    assert!(matches!(
        decode_codes(&[65, 66, 300], &config),
        Err(LzwError::InvalidCode { code: 300, .. })
    ));

    // First code outside the base alphabet
    assert!(matches!(
        decode_codes(&[4000], &config),
        Err(LzwError::InvalidCode { position: 0, .. })
    ));

    // Oversized trailing 16-bit code
    let mut packed = pack(&[65, 66]);
    packed.extend_from_slice(&[0xFF, 0xFF]);
    assert!(matches!(
        decode_bytes(&packed),
        Err(LzwError::InvalidCode { code: 0xFFFF, .. })
    ));
}

#[test]
fn test_truncated_input() {
    assert!(matches!(
        decode_bytes(&[0x04, 0x10, 0x42, 0x43]),
        Err(LzwError::TruncatedInput {
            needed_bits: 16,
            available_bits: 8
        })
    ));
}

#[test]
fn test_empty_input() -> Result<(), Box<dyn std::error::Error>> {
    assert!(decode_bytes(&[])?.is_empty());
    assert_eq!(decode_to_string(&[], &DecoderConfig::default())?, "");
    Ok(())
}

/// Round trip text large enough to fill the dictionary many times over
#[test]
fn test_round_trip_with_resets() -> Result<(), Box<dyn std::error::Error>> {
    let original = lorem(200_000);
    let compressed = compress(&original);

    let (decompressed, stats) = decode_with_stats(&compressed, &DecoderConfig::default())?;
    assert_eq!(original, decompressed);
    assert!(stats.dictionary_resets > 0);

    println!(
        "✓ {} bytes -> {} bytes -> {} bytes, {} resets",
        original.len(),
        compressed.len(),
        decompressed.len(),
        stats.dictionary_resets
    );

    Ok(())
}

#[test]
fn test_round_trip_binary() -> Result<(), Box<dyn std::error::Error>> {
    let original: Vec<u8> = (0..50_000u32).map(|i| ((i * 17 + 11) % 256) as u8).collect();
    assert_eq!(decode_bytes(&compress(&original))?, original);
    Ok(())
}

#[test]
fn test_round_trip_text() -> Result<(), Box<dyn std::error::Error>> {
    let text = "TOBEORNOTTOBEORTOBEORNOT#";
    let compressed = compress(text.as_bytes());
    assert_eq!(decode_to_string(&compressed, &DecoderConfig::default())?, text);
    Ok(())
}

#[test]
fn test_round_trip_latin1_text() -> Result<(), Box<dyn std::error::Error>> {
    let text = "d\u{e9}j\u{e0} vu, d\u{e9}j\u{e0} vu, d\u{e9}j\u{e0} vu";
    let bytes: Vec<u8> = text.chars().map(|c| c as u8).collect();
    let compressed = compress(&bytes);
    assert_eq!(decode_to_string(&compressed, &DecoderConfig::default())?, text);
    Ok(())
}

/// Custom limits behave like the default ones, just with a smaller table
#[test]
fn test_custom_config_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let config = DecoderConfig::new(4, 16)?;
    let original: Vec<u8> = (0..5_000u32).map(|i| ((i * 7 + i / 13) % 4) as u8).collect();

    let codes = encode(&original, 4, 16);
    let (output, stats) = decode_with_stats(&pack(&codes), &config)?;
    assert_eq!(output, original);
    assert!(stats.dictionary_resets > 10);

    Ok(())
}

#[test]
fn test_single_byte_repetition() -> Result<(), Box<dyn std::error::Error>> {
    for size in [1, 2, 3, 10, 100, 10_000, 100_000] {
        let original = vec![b'X'; size];
        let codes = encode_default(&original);
        assert_eq!(decode_codes(&codes, &DecoderConfig::default())?, original);
    }
    Ok(())
}
