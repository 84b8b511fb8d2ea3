//! Shared helpers for integration tests and benches
//!
//! Holds a reference encoder using the same reset policy as the decoder and
//! a packer producing the 12-bit/16-bit byte layout.

#![allow(dead_code)]

use bitstream_io::{BigEndian, BitWrite, BitWriter};
use std::collections::HashMap;

/// Encode `data` into codes with a table of `init_size` single bytes that is
/// rebuilt once it would reach `max_size` entries
pub fn encode(data: &[u8], init_size: usize, max_size: usize) -> Vec<u16> {
    let fresh = || -> HashMap<Vec<u8>, u16> {
        (0..init_size).map(|i| (vec![i as u8], i as u16)).collect()
    };

    let mut table = fresh();
    let mut emitted = 0usize;
    let mut codes = Vec::new();
    let mut current: Vec<u8> = Vec::new();

    for &byte in data {
        let mut extended = current.clone();
        extended.push(byte);
        if table.contains_key(&extended) {
            current = extended;
            continue;
        }

        codes.push(table[&current]);
        emitted += 1;

        // The decoder learns this entry one code later
        let next = init_size + emitted - 1;
        if next < max_size {
            table.insert(extended, next as u16);
        } else {
            table = fresh();
            emitted = 0;
        }
        current = vec![byte];
    }

    if !current.is_empty() {
        codes.push(table[&current]);
    }
    codes
}

/// Encode with the default 256/4096 limits
pub fn encode_default(data: &[u8]) -> Vec<u16> {
    encode(data, 256, 4096)
}

/// Pack codes into bytes: pairs of 12-bit fields, plus one 16-bit field when
/// the count is odd
pub fn pack(codes: &[u16]) -> Vec<u8> {
    let mut output = Vec::new();
    {
        let mut writer = BitWriter::endian(&mut output, BigEndian);
        let pairs = codes.len() / 2 * 2;

        for &code in &codes[..pairs] {
            writer.write(12, u32::from(code)).expect("write to Vec");
        }
        if let Some(&last) = codes.get(pairs) {
            writer.write(16, u32::from(last)).expect("write to Vec");
        }

        writer.byte_align().expect("write to Vec");
    }
    output
}

/// Encode and pack in one step
pub fn compress(data: &[u8]) -> Vec<u8> {
    pack(&encode_default(data))
}

/// Deterministic pseudo-random bytes over a limited alphabet
pub fn generate(size: usize, alphabet: u8, seed: u32) -> Vec<u8> {
    let mut state = seed;
    (0..size)
        .map(|_| {
            state = state.wrapping_mul(1664525).wrapping_add(1013904223);
            ((state >> 16) % alphabet as u32) as u8
        })
        .collect()
}

/// Text that repeats often enough to grow long dictionary entries
pub fn lorem(size: usize) -> Vec<u8> {
    let base = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. ";
    base.iter().copied().cycle().take(size).collect()
}
