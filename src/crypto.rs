// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/veilcore

//! Cryptographic primitives for payload encryption.
//!
//! Key derivation is PBKDF2-HMAC-SHA256 with a per-encode random 16-byte
//! salt, 100,000 iterations, and a 32-byte output key. The iteration count,
//! digest, and key length are NOT recorded in the payload wire format -- a
//! decoder must hardcode the same constants, so they are part of the wire
//! contract and must never change without bumping the payload magic.
//!
//! Encryption is AEAD (AES-256-GCM or ChaCha20-Poly1305) with a detached
//! 16-byte authentication tag: the payload framer stores ciphertext and tag
//! as separate fields, so the tag appended by the RustCrypto AEAD API is
//! split off after encryption. Ciphertext length always equals plaintext
//! length for both supported modes.

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit};
use chacha20poly1305::ChaCha20Poly1305;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::algo::StegoAlgorithm;
use crate::error::StegoError;

/// PBKDF2 salt length in bytes.
pub const SALT_LEN: usize = 16;
/// Derived symmetric key length in bytes.
pub const KEY_LEN: usize = 32;
/// PBKDF2 iteration count. Part of the wire contract (see module docs).
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Derive the symmetric encryption key from password + salt.
///
/// Deterministic: identical inputs always produce the identical key, which
/// is what lets a future decoder re-derive the key from the password and the
/// salt stored in the payload.
pub fn derive_key(password: &str, salt: &[u8]) -> Zeroizing<[u8; KEY_LEN]> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut *key);
    key
}

/// Generate a fresh random salt for key derivation.
pub fn random_salt() -> [u8; SALT_LEN] {
    use rand::RngCore;
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

/// Generate a fresh random nonce of the algorithm's required length.
pub fn random_nonce(algorithm: StegoAlgorithm) -> Vec<u8> {
    use rand::RngCore;
    let mut nonce = vec![0u8; algorithm.nonce_len()];
    rand::thread_rng().fill_bytes(&mut nonce);
    nonce
}

/// Encrypt plaintext with the selected AEAD cipher.
///
/// Returns `(ciphertext, tag)` with the 16-byte authentication tag detached
/// from the ciphertext. `ciphertext.len() == plaintext.len()` always.
///
/// # Errors
/// [`StegoError::CipherFailure`] if the nonce length does not match the
/// algorithm's requirement or the underlying cipher rejects its inputs.
pub fn encrypt(
    algorithm: StegoAlgorithm,
    plaintext: &[u8],
    key: &[u8; KEY_LEN],
    nonce: &[u8],
) -> Result<(Vec<u8>, Vec<u8>), StegoError> {
    if nonce.len() != algorithm.nonce_len() {
        return Err(StegoError::CipherFailure);
    }

    let mut ciphertext = match algorithm {
        StegoAlgorithm::Aes256Gcm => {
            let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| StegoError::CipherFailure)?;
            cipher
                .encrypt(aes_gcm::Nonce::from_slice(nonce), plaintext)
                .map_err(|_| StegoError::CipherFailure)?
        }
        StegoAlgorithm::ChaCha20Poly1305 => {
            let cipher =
                ChaCha20Poly1305::new_from_slice(key).map_err(|_| StegoError::CipherFailure)?;
            cipher
                .encrypt(chacha20poly1305::Nonce::from_slice(nonce), plaintext)
                .map_err(|_| StegoError::CipherFailure)?
        }
    };

    // RustCrypto AEADs append the tag; the payload format stores it detached.
    let tag_at = ciphertext.len() - algorithm.tag_len();
    let tag = ciphertext.split_off(tag_at);

    Ok((ciphertext, tag))
}

/// SHA-256 commitment over the fully serialized payload, as lowercase hex.
///
/// Purely derived data for tamper-evidence display; nothing in the pipeline
/// re-verifies it after embedding.
pub fn commitment_hex(payload: &[u8]) -> String {
    hex::encode(Sha256::digest(payload))
}
