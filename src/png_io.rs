// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/veilcore

//! PNG decode/encode collaborator for the pipeline.
//!
//! The core operates on raw RGBA bytes; this module converts to and from
//! the PNG container. PNG is mandatory here because it is lossless -- a
//! lossy format would not preserve the embedded LSBs.

use crate::error::StegoError;

/// A decoded cover image: RGBA8, 4 bytes per pixel, row-major.
#[derive(Debug, Clone)]
pub struct RgbaImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RgbaImage {
    pub fn pixel_count(&self) -> usize {
        self.pixels.len() / 4
    }
}

/// Decode a PNG into RGBA8 pixels.
///
/// Grayscale, gray-alpha, and RGB inputs are expanded to RGBA with an
/// opaque alpha channel; 16-bit depths are reduced to 8 bits, palettes
/// are expanded.
pub fn decode_rgba(png_bytes: &[u8]) -> Result<RgbaImage, StegoError> {
    let mut decoder = png::Decoder::new(std::io::Cursor::new(png_bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    let pixels = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => {
            let mut out = Vec::with_capacity(buf.len() / 3 * 4);
            for rgb in buf.chunks_exact(3) {
                out.extend_from_slice(rgb);
                out.push(0xFF);
            }
            out
        }
        png::ColorType::GrayscaleAlpha => {
            let mut out = Vec::with_capacity(buf.len() * 2);
            for ga in buf.chunks_exact(2) {
                out.extend_from_slice(&[ga[0], ga[0], ga[0], ga[1]]);
            }
            out
        }
        png::ColorType::Grayscale => {
            let mut out = Vec::with_capacity(buf.len() * 4);
            for &g in &buf {
                out.extend_from_slice(&[g, g, g, 0xFF]);
            }
            out
        }
        // EXPAND turns indexed images into Rgb/Rgba before we see them.
        png::ColorType::Indexed => return Err(StegoError::UnsupportedColorType),
    };

    Ok(RgbaImage {
        width: info.width,
        height: info.height,
        pixels,
    })
}

/// Encode RGBA8 pixels as a PNG.
pub fn encode_rgba(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, StegoError> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(pixels)?;
    }
    Ok(out)
}
