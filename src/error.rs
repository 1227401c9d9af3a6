// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/veilcore

//! Error types for the encode pipeline.
//!
//! [`StegoError`] covers all failure modes from algorithm lookup through
//! encryption, payload framing, and LSB embedding. Every error is terminal
//! for the request that produced it: nothing is retried, and no partially
//! mutated image or partial trace is ever returned alongside an error.

use core::fmt;

/// Errors that can occur during steganographic encoding.
#[derive(Debug)]
pub enum StegoError {
    /// The algorithm name is not one of the two recognized values.
    UnsupportedAlgorithm(String),
    /// The AEAD cipher rejected its inputs (bad key/nonce/tag lengths).
    CipherFailure,
    /// The buffer is shorter than the fixed 13-byte payload header.
    PayloadTooShort { len: usize },
    /// The first 5 bytes of the payload are not the `"STEG1"` magic.
    InvalidMagic,
    /// The header declares more bytes than the buffer actually holds.
    TruncatedPayload { declared: usize, actual: usize },
    /// A variable-length payload field exceeds its length-prefix range.
    FieldTooLong { field: &'static str, len: usize },
    /// The payload needs more bits than the cover image's R/G/B channels hold.
    InsufficientCapacity {
        capacity_bits: usize,
        payload_bits: usize,
    },
    /// The pixel buffer length is not a multiple of 4 (RGBA).
    InvalidPixelBuffer { len: usize },
    /// The decoded PNG uses a color type the converter cannot expand.
    UnsupportedColorType,
    /// The cover image could not be parsed as a valid PNG.
    ImageDecode(png::DecodingError),
    /// Re-encoding the mutated pixels to PNG failed.
    ImageEncode(png::EncodingError),
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedAlgorithm(name) => {
                write!(f, "unsupported algorithm: {name:?}")
            }
            Self::CipherFailure => write!(f, "AEAD encryption failed"),
            Self::PayloadTooShort { len } => {
                write!(f, "payload too short: {len} bytes (header needs 13)")
            }
            Self::InvalidMagic => write!(f, "payload magic mismatch (expected \"STEG1\")"),
            Self::TruncatedPayload { declared, actual } => {
                write!(f, "truncated payload: header declares {declared} bytes, buffer has {actual}")
            }
            Self::FieldTooLong { field, len } => {
                write!(f, "payload field {field} is {len} bytes, exceeds length-prefix range")
            }
            Self::InsufficientCapacity {
                capacity_bits,
                payload_bits,
            } => {
                write!(f, "payload needs {payload_bits} bits, cover image holds {capacity_bits}")
            }
            Self::InvalidPixelBuffer { len } => {
                write!(f, "pixel buffer length {len} is not a multiple of 4 (RGBA)")
            }
            Self::UnsupportedColorType => write!(f, "unsupported PNG color type"),
            Self::ImageDecode(e) => write!(f, "invalid PNG: {e}"),
            Self::ImageEncode(e) => write!(f, "PNG encoding failed: {e}"),
        }
    }
}

impl std::error::Error for StegoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageDecode(e) => Some(e),
            Self::ImageEncode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<png::DecodingError> for StegoError {
    fn from(e: png::DecodingError) -> Self {
        Self::ImageDecode(e)
    }
}

impl From<png::EncodingError> for StegoError {
    fn from(e: png::EncodingError) -> Self {
        Self::ImageEncode(e)
    }
}
