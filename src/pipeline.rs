// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/veilcore

//! Encode pipeline orchestration.
//!
//! One synchronous pass per request:
//!
//! 1. Derive the key (PBKDF2) from password + fresh random salt.
//! 2. Encrypt the secret with the selected AEAD cipher and a fresh nonce.
//! 3. Serialize {algorithm id, salt, nonce, tag, ciphertext} into the
//!    payload container and compute its SHA-256 commitment.
//! 4. Expand the container into a bit stream (MSB first).
//! 5. Check capacity, then embed the bits into the cover pixels' LSBs.
//!
//! Any failure aborts the whole request: the pixel buffer is consumed by
//! value and only ever returned fully embedded or not at all.

use crate::algo::StegoAlgorithm;
use crate::capacity;
use crate::crypto::{self, SALT_LEN};
use crate::embed::{self, EmbedTraceEntry};
use crate::error::StegoError;
use crate::payload;
use crate::png_io;

/// Output of the encryption + framing stages, before embedding.
///
/// Created once per encode call and never mutated afterwards; the embedder
/// only reads `payload`.
#[derive(Debug, Clone)]
pub struct EncryptionResult {
    /// The fully serialized payload container.
    pub payload: Vec<u8>,
    pub algorithm: StegoAlgorithm,
    pub salt: [u8; SALT_LEN],
    pub nonce: Vec<u8>,
    pub tag: Vec<u8>,
    pub ciphertext: Vec<u8>,
    /// SHA-256 of `payload`, lowercase hex.
    pub commitment_hex: String,
}

/// Encrypt and frame a secret with fresh random salt and nonce.
pub fn encrypt_payload(
    secret: &[u8],
    password: &str,
    algorithm: StegoAlgorithm,
) -> Result<EncryptionResult, StegoError> {
    let salt = crypto::random_salt();
    let nonce = crypto::random_nonce(algorithm);
    encrypt_payload_with(secret, password, algorithm, salt, &nonce)
}

/// Encrypt and frame a secret with caller-provided salt and nonce.
///
/// The random-entropy path ([`encrypt_payload`]) delegates here; tests use
/// this directly to get deterministic output.
pub fn encrypt_payload_with(
    secret: &[u8],
    password: &str,
    algorithm: StegoAlgorithm,
    salt: [u8; SALT_LEN],
    nonce: &[u8],
) -> Result<EncryptionResult, StegoError> {
    let key = crypto::derive_key(password, &salt);
    let (ciphertext, tag) = crypto::encrypt(algorithm, secret, &key, nonce)?;
    let payload = payload::build_payload(algorithm.id(), &salt, nonce, &tag, &ciphertext)?;
    let commitment_hex = crypto::commitment_hex(&payload);

    Ok(EncryptionResult {
        payload,
        algorithm,
        salt,
        nonce: nonce.to_vec(),
        tag,
        ciphertext,
        commitment_hex,
    })
}

/// Diagnostic bundle returned to the caller alongside the mutated image.
#[derive(Debug, Clone)]
pub struct EncodeDiagnostics {
    pub algorithm_id: u8,
    pub algorithm_name: &'static str,
    pub payload_bytes: usize,
    pub payload_bits: usize,
    pub capacity_bits: usize,
    /// `payload_bits / capacity_bits`, as a percentage.
    pub utilization_percent: f64,
    pub salt_hex: String,
    pub nonce_hex: String,
    pub tag_hex: String,
    pub ciphertext_len: usize,
    pub commitment_hex: String,
}

/// Result of a successful encode: mutated pixels, full trace, diagnostics.
#[derive(Debug)]
pub struct EncodeOutcome {
    /// The RGBA pixel buffer with the payload embedded.
    pub pixels: Vec<u8>,
    /// One entry per embedded bit, ascending by bit index.
    pub trace: Vec<EmbedTraceEntry>,
    pub diagnostics: EncodeDiagnostics,
}

/// Run the full encode pipeline over a raw RGBA pixel buffer.
///
/// Takes ownership of `pixels` and returns the mutated buffer inside the
/// outcome, so no caller can observe a half-embedded image.
///
/// # Errors
/// - [`StegoError::UnsupportedAlgorithm`] for an unknown `algorithm_name`.
/// - [`StegoError::CipherFailure`] if AEAD encryption fails.
/// - [`StegoError::InvalidPixelBuffer`] if the buffer is not RGBA-shaped.
/// - [`StegoError::InsufficientCapacity`] if the payload does not fit.
pub fn encode_rgba(
    pixels: Vec<u8>,
    secret: &[u8],
    password: &str,
    algorithm_name: &str,
) -> Result<EncodeOutcome, StegoError> {
    let algorithm = StegoAlgorithm::from_name(algorithm_name)?;
    let encrypted = encrypt_payload(secret, password, algorithm)?;
    embed_encrypted(pixels, &encrypted)
}

/// [`encode_rgba`] with caller-provided salt and nonce, for deterministic
/// output. Two calls with identical inputs produce identical pixel buffers
/// and identical traces.
pub fn encode_rgba_with(
    pixels: Vec<u8>,
    secret: &[u8],
    password: &str,
    algorithm_name: &str,
    salt: [u8; SALT_LEN],
    nonce: &[u8],
) -> Result<EncodeOutcome, StegoError> {
    let algorithm = StegoAlgorithm::from_name(algorithm_name)?;
    let encrypted = encrypt_payload_with(secret, password, algorithm, salt, nonce)?;
    embed_encrypted(pixels, &encrypted)
}

/// Embedding half of the pipeline: bit conversion, capacity check, LSB walk,
/// diagnostics assembly.
fn embed_encrypted(
    mut pixels: Vec<u8>,
    encrypted: &EncryptionResult,
) -> Result<EncodeOutcome, StegoError> {
    if pixels.len() % 4 != 0 {
        return Err(StegoError::InvalidPixelBuffer { len: pixels.len() });
    }
    let pixel_count = pixels.len() / 4;

    let bits = payload::bytes_to_bits(&encrypted.payload);
    let capacity_bits = capacity::check_capacity(pixel_count, bits.len())?;

    let trace = embed::embed_bits(&mut pixels, &bits)?;

    let utilization_percent = if capacity_bits == 0 {
        0.0
    } else {
        bits.len() as f64 / capacity_bits as f64 * 100.0
    };

    let diagnostics = EncodeDiagnostics {
        algorithm_id: encrypted.algorithm.id(),
        algorithm_name: encrypted.algorithm.name(),
        payload_bytes: encrypted.payload.len(),
        payload_bits: bits.len(),
        capacity_bits,
        utilization_percent,
        salt_hex: hex::encode(encrypted.salt),
        nonce_hex: hex::encode(&encrypted.nonce),
        tag_hex: hex::encode(&encrypted.tag),
        ciphertext_len: encrypted.ciphertext.len(),
        commitment_hex: encrypted.commitment_hex.clone(),
    };

    Ok(EncodeOutcome {
        pixels,
        trace,
        diagnostics,
    })
}

/// Result of a successful PNG-level encode.
#[derive(Debug)]
pub struct PngEncodeOutcome {
    /// The re-encoded stego PNG.
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub trace: Vec<EmbedTraceEntry>,
    pub diagnostics: EncodeDiagnostics,
}

/// Convenience wrapper: decode a PNG cover image, run the pipeline, and
/// re-encode the mutated pixels as PNG.
///
/// PNG is used because it is lossless; a lossy container would destroy the
/// embedded LSBs on re-encoding.
pub fn encode_png(
    cover_png: &[u8],
    secret: &[u8],
    password: &str,
    algorithm_name: &str,
) -> Result<PngEncodeOutcome, StegoError> {
    let image = png_io::decode_rgba(cover_png)?;
    let (width, height) = (image.width, image.height);

    let outcome = encode_rgba(image.pixels, secret, password, algorithm_name)?;

    let png = png_io::encode_rgba(&outcome.pixels, width, height)?;
    Ok(PngEncodeOutcome {
        png,
        width,
        height,
        trace: outcome.trace,
        diagnostics: outcome.diagnostics,
    })
}
