// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/veilcore

//! End-to-end tests for the encode pipeline, from secret bytes to a
//! re-encoded stego PNG.

use veil_core::{
    bytes_to_bits, encode_png, encode_rgba, encode_rgba_with, encrypt_payload_with,
    parse_payload, png_io, StegoAlgorithm, StegoError,
};

const SALT: [u8; 16] = [0xA5; 16];
const NONCE: [u8; 12] = [0x5A; 12];

/// A 13x13 RGBA cover with varied bytes (capacity: 169 * 3 = 507 bits).
fn cover_13x13() -> Vec<u8> {
    (0..13 * 13 * 4).map(|i| (i * 31 % 256) as u8).collect()
}

/// Read back the LSBs of the first `count` R/G/B channel bytes in
/// embedding order (pixel ascending, R then G then B, alpha skipped).
fn extract_lsbs(pixels: &[u8], count: usize) -> Vec<u8> {
    let mut bits = Vec::with_capacity(count);
    'outer: for pixel in pixels.chunks_exact(4) {
        for channel in 0..3 {
            if bits.len() == count {
                break 'outer;
            }
            bits.push(pixel[channel] & 1);
        }
    }
    bits
}

#[test]
fn hi_under_pw123_fits_13x13() {
    // The canonical sizing case: "hi" (2 bytes) under AES-256-GCM gives
    // 13 + 16 + 12 + 16 + 2 = 59 payload bytes = 472 bits, against a
    // 507-bit cover.
    let outcome = encode_rgba_with(cover_13x13(), b"hi", "pw123", "AES-256-GCM", SALT, &NONCE)
        .expect("472 bits must fit in 507");

    let d = &outcome.diagnostics;
    assert_eq!(d.payload_bytes, 59);
    assert_eq!(d.payload_bits, 472);
    assert_eq!(d.capacity_bits, 507);
    assert!((d.utilization_percent - 472.0 / 507.0 * 100.0).abs() < 1e-9);

    assert_eq!(outcome.trace.len(), 472);
    for (i, entry) in outcome.trace.iter().enumerate() {
        assert_eq!(entry.bit_index, i);
    }
}

#[test]
fn hi_under_pw123_overflows_12x12() {
    let cover = vec![0u8; 12 * 12 * 4]; // 432-bit capacity < 472
    let result = encode_rgba_with(cover, b"hi", "pw123", "AES-256-GCM", SALT, &NONCE);
    match result {
        Err(StegoError::InsufficientCapacity {
            capacity_bits,
            payload_bits,
        }) => {
            assert_eq!(capacity_bits, 432);
            assert_eq!(payload_bits, 472);
        }
        other => panic!("expected InsufficientCapacity, got {other:?}"),
    }
}

#[test]
fn embedded_bits_match_serialized_payload() {
    let enc = encrypt_payload_with(b"hi", "pw123", StegoAlgorithm::Aes256Gcm, SALT, &NONCE)
        .unwrap();
    let outcome = encode_rgba_with(cover_13x13(), b"hi", "pw123", "AES-256-GCM", SALT, &NONCE)
        .unwrap();

    let expected_bits = bytes_to_bits(&enc.payload);
    let embedded = extract_lsbs(&outcome.pixels, expected_bits.len());
    assert_eq!(embedded, expected_bits);
}

#[test]
fn recovered_payload_parses_and_starts_with_magic() {
    let outcome = encode_rgba_with(cover_13x13(), b"hi", "pw123", "AES-256-GCM", SALT, &NONCE)
        .unwrap();
    let bits = extract_lsbs(&outcome.pixels, outcome.diagnostics.payload_bits);

    // Pack MSB-first bits back into bytes.
    let mut bytes = Vec::with_capacity(bits.len() / 8);
    for chunk in bits.chunks(8) {
        let mut byte = 0u8;
        for (i, &bit) in chunk.iter().enumerate() {
            byte |= bit << (7 - i);
        }
        bytes.push(byte);
    }

    assert_eq!(&bytes[..5], b"STEG1");
    let parsed = parse_payload(&bytes).unwrap();
    assert_eq!(parsed.algorithm_id, 0x01);
    assert_eq!(parsed.salt, &SALT);
    assert_eq!(parsed.nonce, &NONCE);
    assert_eq!(parsed.ciphertext.len(), 2);
}

#[test]
fn untouched_region_survives_byte_for_byte() {
    let cover = cover_13x13();
    let outcome = encode_rgba_with(
        cover.clone(),
        b"hi",
        "pw123",
        "AES-256-GCM",
        SALT,
        &NONCE,
    )
    .unwrap();

    // 472 bits end inside pixel 157 (157 * 3 = 471, so bits 471 lands in
    // pixel 157's R channel). Pixel 158 onward must be untouched.
    let last = outcome.trace.last().unwrap();
    assert_eq!(last.pixel_index, 157);
    assert_eq!(&outcome.pixels[158 * 4..], &cover[158 * 4..]);

    // Alpha bytes are identical everywhere.
    for pixel in 0..169 {
        assert_eq!(outcome.pixels[pixel * 4 + 3], cover[pixel * 4 + 3]);
    }

    // High 7 bits are identical everywhere.
    for (a, b) in outcome.pixels.iter().zip(cover.iter()) {
        assert_eq!(a & 0xFE, b & 0xFE);
    }
}

#[test]
fn chacha20_poly1305_has_the_same_payload_shape() {
    let outcome = encode_rgba_with(
        cover_13x13(),
        b"hi",
        "pw123",
        "ChaCha20-Poly1305",
        SALT,
        &NONCE,
    )
    .unwrap();
    let d = &outcome.diagnostics;
    assert_eq!(d.algorithm_id, 0x02);
    assert_eq!(d.algorithm_name, "ChaCha20-Poly1305");
    // Same nonce/tag lengths as AES-256-GCM, so the same 59-byte payload.
    assert_eq!(d.payload_bytes, 59);
}

#[test]
fn random_path_embeds_successfully() {
    let cover: Vec<u8> = vec![0x80; 64 * 64 * 4];
    let outcome = encode_rgba(cover, b"fresh entropy each call", "pw", "AES-256-GCM").unwrap();
    assert_eq!(
        outcome.trace.len(),
        outcome.diagnostics.payload_bits,
        "one trace entry per embedded bit"
    );
}

#[test]
fn empty_secret_still_carries_tag_and_header() {
    let outcome =
        encode_rgba_with(cover_13x13(), b"", "pw", "AES-256-GCM", SALT, &NONCE).unwrap();
    // 13 header + 16 salt + 12 nonce + 16 tag + 0 ciphertext = 57 bytes.
    assert_eq!(outcome.diagnostics.payload_bytes, 57);
    assert_eq!(outcome.diagnostics.ciphertext_len, 0);
}

#[test]
fn png_roundtrip_preserves_embedded_bits() {
    let width = 32u32;
    let height = 32u32;
    let pixels: Vec<u8> = (0..(width * height * 4) as usize)
        .map(|i| (i * 17 % 256) as u8)
        .collect();
    let cover_png = png_io::encode_rgba(&pixels, width, height).unwrap();

    let out = encode_png(&cover_png, b"hidden in plain sight", "pw123", "AES-256-GCM").unwrap();
    assert_eq!(out.width, width);
    assert_eq!(out.height, height);

    // PNG is lossless: decoding the stego image gives back exactly the
    // mutated pixels, LSBs included.
    let stego = png_io::decode_rgba(&out.png).unwrap();
    let bits = extract_lsbs(&stego.pixels, out.diagnostics.payload_bits);
    let expected: Vec<u8> = out.trace.iter().map(|e| e.lsb_after).collect();
    assert_eq!(bits, expected);
}

#[test]
fn png_cover_too_small_fails_cleanly() {
    let pixels = vec![0u8; 4 * 4 * 4];
    let cover_png = png_io::encode_rgba(&pixels, 4, 4).unwrap();
    let result = encode_png(&cover_png, b"way too much secret data", "pw", "AES-256-GCM");
    assert!(matches!(
        result,
        Err(StegoError::InsufficientCapacity { .. })
    ));
}

#[test]
fn rgb_cover_gets_an_opaque_alpha() {
    // Encode an RGB (no alpha) PNG and make sure the pipeline still works:
    // the decoder expands to RGBA with 0xFF alpha, which is never embedded into.
    let width = 16u32;
    let height = 16u32;
    let rgb: Vec<u8> = (0..(width * height * 3) as usize)
        .map(|i| (i % 256) as u8)
        .collect();

    let mut cover_png = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut cover_png, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&rgb).unwrap();
    }

    let out = encode_png(&cover_png, b"rgb cover", "pw", "ChaCha20-Poly1305").unwrap();
    let stego = png_io::decode_rgba(&out.png).unwrap();
    for pixel in stego.pixels.chunks_exact(4) {
        assert_eq!(pixel[3], 0xFF);
    }
}
