// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/veilcore

//! Cover image capacity check.
//!
//! Each pixel contributes exactly 3 embeddable bits (the LSBs of R, G, and
//! B). The alpha channel is never counted and never touched. The check runs
//! before any pixel is mutated: an oversized payload fails here and the
//! cover image is returned to the caller untouched.

use crate::error::StegoError;

/// Usable channels per RGBA pixel (R, G, B -- never alpha).
pub const CHANNELS_PER_PIXEL: usize = 3;

/// Total embeddable bits for a cover image with `pixel_count` pixels.
pub fn capacity_bits(pixel_count: usize) -> usize {
    pixel_count * CHANNELS_PER_PIXEL
}

/// Pre-flight capacity check.
///
/// Returns the capacity in bits on success so the caller can report
/// utilization without recomputing.
///
/// # Errors
/// [`StegoError::InsufficientCapacity`] carrying both sizes if the payload
/// does not fit.
pub fn check_capacity(pixel_count: usize, payload_bits: usize) -> Result<usize, StegoError> {
    let capacity = capacity_bits(pixel_count);
    if payload_bits > capacity {
        return Err(StegoError::InsufficientCapacity {
            capacity_bits: capacity,
            payload_bits,
        });
    }
    Ok(capacity)
}
