// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/veilcore

//! Supported AEAD algorithms and their wire-format parameters.
//!
//! The registry is a closed enum: exactly two algorithms exist, looked up by
//! their exact public name. The one-byte id is written into the payload
//! header, so both values are part of the wire format and must never change.

use crate::error::StegoError;

/// AES-256-GCM wire id.
pub const ALGO_AES_256_GCM: u8 = 0x01;
/// ChaCha20-Poly1305 wire id.
pub const ALGO_CHACHA20_POLY1305: u8 = 0x02;

/// AEAD algorithm selector.
///
/// Both supported ciphers use a 12-byte nonce and a 16-byte authentication
/// tag, but the lengths are surfaced per-algorithm because they are written
/// into the payload header as independent fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StegoAlgorithm {
    Aes256Gcm,
    ChaCha20Poly1305,
}

impl StegoAlgorithm {
    /// Look up an algorithm by its exact public name.
    ///
    /// # Errors
    /// [`StegoError::UnsupportedAlgorithm`] if `name` is neither
    /// `"AES-256-GCM"` nor `"ChaCha20-Poly1305"`.
    pub fn from_name(name: &str) -> Result<Self, StegoError> {
        match name {
            "AES-256-GCM" => Ok(Self::Aes256Gcm),
            "ChaCha20-Poly1305" => Ok(Self::ChaCha20Poly1305),
            _ => Err(StegoError::UnsupportedAlgorithm(name.to_string())),
        }
    }

    /// Look up an algorithm by its wire id (from a parsed payload header).
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            ALGO_AES_256_GCM => Some(Self::Aes256Gcm),
            ALGO_CHACHA20_POLY1305 => Some(Self::ChaCha20Poly1305),
            _ => None,
        }
    }

    /// One-byte id written into the payload header.
    pub fn id(self) -> u8 {
        match self {
            Self::Aes256Gcm => ALGO_AES_256_GCM,
            Self::ChaCha20Poly1305 => ALGO_CHACHA20_POLY1305,
        }
    }

    /// Public name, as accepted by [`StegoAlgorithm::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Aes256Gcm => "AES-256-GCM",
            Self::ChaCha20Poly1305 => "ChaCha20-Poly1305",
        }
    }

    /// Nonce length in bytes required by the cipher.
    pub fn nonce_len(self) -> usize {
        12
    }

    /// Authentication tag length in bytes produced by the cipher.
    pub fn tag_len(self) -> usize {
        16
    }
}
