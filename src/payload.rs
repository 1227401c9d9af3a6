// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/veilcore

//! Payload container construction and parsing.
//!
//! The payload is the binary container that wraps the encryption result
//! before LSB embedding:
//!
//! ```text
//! [5 bytes ] magic "STEG1"
//! [1 byte  ] algorithm id
//! [1 byte  ] salt length
//! [1 byte  ] nonce length
//! [1 byte  ] tag length
//! [4 bytes ] ciphertext length (big-endian u32)
//! [N bytes ] salt
//! [N bytes ] nonce
//! [N bytes ] authentication tag
//! [N bytes ] ciphertext
//! ```
//!
//! Total payload size = 13 + saltLen + nonceLen + tagLen + cipherLen.
//! Salt, nonce, and tag each carry a single-byte length prefix, so the
//! format cannot represent key material longer than 255 bytes.

use crate::error::StegoError;

/// Payload magic: the first 5 bytes of every conforming container.
pub const MAGIC: &[u8; 5] = b"STEG1";

/// Fixed header length: magic(5) + algId(1) + three length bytes + cipherLen(4).
pub const HEADER_LEN: usize = 13;

/// Serialize the encryption result into one flat payload buffer.
///
/// # Errors
/// [`StegoError::FieldTooLong`] if salt, nonce, or tag exceeds 255 bytes,
/// or the ciphertext exceeds the 4-byte length field.
pub fn build_payload(
    algorithm_id: u8,
    salt: &[u8],
    nonce: &[u8],
    tag: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>, StegoError> {
    for (field, bytes) in [("salt", salt), ("nonce", nonce), ("tag", tag)] {
        if bytes.len() > u8::MAX as usize {
            return Err(StegoError::FieldTooLong {
                field,
                len: bytes.len(),
            });
        }
    }
    let cipher_len = u32::try_from(ciphertext.len()).map_err(|_| StegoError::FieldTooLong {
        field: "ciphertext",
        len: ciphertext.len(),
    })?;

    let mut buf =
        Vec::with_capacity(HEADER_LEN + salt.len() + nonce.len() + tag.len() + ciphertext.len());
    buf.extend_from_slice(MAGIC);
    buf.push(algorithm_id);
    buf.push(salt.len() as u8);
    buf.push(nonce.len() as u8);
    buf.push(tag.len() as u8);
    buf.extend_from_slice(&cipher_len.to_be_bytes());
    buf.extend_from_slice(salt);
    buf.extend_from_slice(nonce);
    buf.extend_from_slice(tag);
    buf.extend_from_slice(ciphertext);

    Ok(buf)
}

/// Parsed view of a serialized payload.
///
/// All variable-length fields borrow from the input buffer; parsing never
/// copies.
#[derive(Debug, PartialEq, Eq)]
pub struct ParsedPayload<'a> {
    /// Algorithm wire id (see [`crate::algo`]).
    pub algorithm_id: u8,
    pub salt: &'a [u8],
    pub nonce: &'a [u8],
    pub tag: &'a [u8],
    pub ciphertext: &'a [u8],
}

/// Parse a serialized payload, validating magic and declared lengths.
///
/// The input may be longer than the declared payload (e.g. trailing bits
/// rounded up to a byte boundary); extra bytes are ignored.
///
/// # Errors
/// - [`StegoError::PayloadTooShort`] if `buf` is shorter than the header.
/// - [`StegoError::InvalidMagic`] if the first 5 bytes are not `"STEG1"`.
/// - [`StegoError::TruncatedPayload`] if the declared total exceeds `buf.len()`.
pub fn parse_payload(buf: &[u8]) -> Result<ParsedPayload<'_>, StegoError> {
    if buf.len() < HEADER_LEN {
        return Err(StegoError::PayloadTooShort { len: buf.len() });
    }
    if &buf[..5] != MAGIC {
        return Err(StegoError::InvalidMagic);
    }

    let algorithm_id = buf[5];
    let salt_len = buf[6] as usize;
    let nonce_len = buf[7] as usize;
    let tag_len = buf[8] as usize;
    let cipher_len = u32::from_be_bytes([buf[9], buf[10], buf[11], buf[12]]) as usize;

    let declared = HEADER_LEN + salt_len + nonce_len + tag_len + cipher_len;
    if declared > buf.len() {
        return Err(StegoError::TruncatedPayload {
            declared,
            actual: buf.len(),
        });
    }

    let salt_at = HEADER_LEN;
    let nonce_at = salt_at + salt_len;
    let tag_at = nonce_at + nonce_len;
    let cipher_at = tag_at + tag_len;

    Ok(ParsedPayload {
        algorithm_id,
        salt: &buf[salt_at..nonce_at],
        nonce: &buf[nonce_at..tag_at],
        tag: &buf[tag_at..cipher_at],
        ciphertext: &buf[cipher_at..declared],
    })
}

/// Convert bytes to a bit vector (MSB first within each byte).
///
/// Byte `0b1011_0010` yields bits `1,0,1,1,0,0,1,0` in that order. The
/// result is materialized up front since its length (`8 * bytes.len()`) is
/// what the capacity check runs against.
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for bit_pos in (0..8).rev() {
            bits.push((byte >> bit_pos) & 1);
        }
    }
    bits
}
