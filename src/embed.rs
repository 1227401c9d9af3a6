// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/veilcore

//! LSB embedding into raw RGBA pixel data.
//!
//! The embedder walks pixels in ascending index order (row-major) and
//! channels in the fixed order R, G, B, skipping alpha, and overwrites each
//! channel byte's least-significant bit with the next payload bit. The walk
//! stops the moment the last payload bit is written; every byte beyond that
//! point is bit-for-bit identical to the input.
//!
//! The fixed walk order is what makes extraction possible: a decoder needs
//! only the bit count and the image dimensions to reconstruct the mapping
//! from bit index to (pixel, channel).
//!
//! Every bit written is recorded in an [`EmbedTraceEntry`], producing an
//! append-only audit log with exactly one entry per payload bit.

use crate::capacity;
use crate::error::StegoError;

/// Color channel an embedded bit landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    R,
    G,
    B,
}

impl Channel {
    /// Byte offset of the channel within an RGBA pixel.
    pub fn offset(self) -> usize {
        match self {
            Self::R => 0,
            Self::G => 1,
            Self::B => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::R => "R",
            Self::G => "G",
            Self::B => "B",
        }
    }
}

impl core::fmt::Display for Channel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit record for one embedded bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedTraceEntry {
    /// Index into the payload bit stream.
    pub bit_index: usize,
    /// 0-based row-major pixel index.
    pub pixel_index: usize,
    /// Channel whose LSB was overwritten.
    pub channel: Channel,
    /// Channel byte's LSB before the write.
    pub lsb_before: u8,
    /// Channel byte's LSB after the write (the payload bit).
    pub lsb_after: u8,
}

/// Embed payload bits into an RGBA pixel buffer in place.
///
/// Checks capacity before touching any byte; on error the buffer is
/// unmodified. Returns the full trace, one entry per bit in ascending
/// `bit_index` order.
///
/// # Errors
/// - [`StegoError::InvalidPixelBuffer`] if `pixels.len()` is not a multiple of 4.
/// - [`StegoError::InsufficientCapacity`] if `bits` exceeds `pixel_count * 3`.
pub fn embed_bits(pixels: &mut [u8], bits: &[u8]) -> Result<Vec<EmbedTraceEntry>, StegoError> {
    if pixels.len() % 4 != 0 {
        return Err(StegoError::InvalidPixelBuffer { len: pixels.len() });
    }
    let pixel_count = pixels.len() / 4;
    capacity::check_capacity(pixel_count, bits.len())?;

    // Final trace length is known up front.
    let mut trace = Vec::with_capacity(bits.len());

    let mut bit_index = 0;
    'pixels: for pixel_index in 0..pixel_count {
        let base = pixel_index * 4;
        for channel in [Channel::R, Channel::G, Channel::B] {
            if bit_index == bits.len() {
                break 'pixels;
            }
            let byte = &mut pixels[base + channel.offset()];
            let lsb_before = *byte & 1;
            let bit = bits[bit_index] & 1;
            *byte = (*byte & 0xFE) | bit;
            trace.push(EmbedTraceEntry {
                bit_index,
                pixel_index,
                channel,
                lsb_before,
                lsb_after: bit,
            });
            bit_index += 1;
        }
    }

    Ok(trace)
}
