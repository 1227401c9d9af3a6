// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/veilcore

//! # veil-core
//!
//! Password-protected LSB steganography encode engine. Encrypts a secret
//! payload under a password (PBKDF2-HMAC-SHA256 + AES-256-GCM or
//! ChaCha20-Poly1305), serializes the result into a self-describing binary
//! container (`"STEG1"` magic), and hides the container in the
//! least-significant bits of a cover image's R/G/B channels -- alpha is
//! never touched. Every bit written is recorded in an audit trace, and the
//! caller gets back a diagnostic bundle (sizes, capacity utilization,
//! salt/nonce/tag hex, SHA-256 payload commitment).
//!
//! The pipeline is synchronous with no shared state: concurrent encode
//! calls are fully independent. Any failure aborts the whole request -- the
//! cover image is never partially mutated.
//!
//! Extraction (decoding) is intentionally not implemented. The container
//! format and the fixed pixel-then-channel embedding order make it fully
//! reversible in principle, but a decoder must also hardcode the PBKDF2
//! parameters (see [`crypto`]), which are not carried in the wire format.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use veil_core::encode_png;
//!
//! let cover = std::fs::read("cover.png").unwrap();
//! let out = encode_png(&cover, b"attack at dawn", "passphrase", "AES-256-GCM").unwrap();
//! std::fs::write("stego.png", &out.png).unwrap();
//! println!("used {:.1}% of capacity", out.diagnostics.utilization_percent);
//! ```

pub mod algo;
pub mod capacity;
pub mod crypto;
pub mod embed;
pub mod error;
pub mod payload;
pub mod pipeline;
pub mod png_io;

pub use algo::StegoAlgorithm;
pub use embed::{embed_bits, Channel, EmbedTraceEntry};
pub use error::StegoError;
pub use payload::{build_payload, bytes_to_bits, parse_payload, ParsedPayload, HEADER_LEN, MAGIC};
pub use pipeline::{
    encode_png, encode_rgba, encode_rgba_with, encrypt_payload, encrypt_payload_with,
    EncodeDiagnostics, EncodeOutcome, EncryptionResult, PngEncodeOutcome,
};
pub use png_io::RgbaImage;
