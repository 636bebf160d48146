//! JPEG format support (decode only).
//!
//! RGB, 8/16-bit grayscale and CMYK JPEGs decode to opaque 8-bit RGBA.

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::trace;
use wallfit_core::RgbaImage;

/// Reads a JPEG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<RgbaImage> {
    let file = File::open(path.as_ref())?;
    decode(BufReader::new(file))
}

/// Decodes a JPEG from memory.
pub fn read_from_memory(data: &[u8]) -> IoResult<RgbaImage> {
    decode(data)
}

fn decode<R: Read>(reader: R) -> IoResult<RgbaImage> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    trace!(width, height, format = ?info.pixel_format, "jpeg::decode");

    let rgba: Vec<u8> = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => pixels
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        jpeg_decoder::PixelFormat::L8 => pixels.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        jpeg_decoder::PixelFormat::L16 => pixels
            .chunks_exact(2)
            .flat_map(|l16| {
                // High byte
                let g = l16[0];
                [g, g, g, 255]
            })
            .collect(),
        jpeg_decoder::PixelFormat::CMYK32 => pixels
            .chunks_exact(4)
            .flat_map(|cmyk| {
                // Approximate conversion, ignores any embedded profile
                let k = 1.0 - cmyk[3] as f32 / 255.0;
                let channel = |v: u8| ((1.0 - v as f32 / 255.0) * k * 255.0).round() as u8;
                [channel(cmyk[0]), channel(cmyk[1]), channel(cmyk[2]), 255]
            })
            .collect(),
    };

    Ok(RgbaImage::new(width, height, rgba)?)
}
