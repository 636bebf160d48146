//! PNG format support.
//!
//! Decodes every PNG color type (palette and low bit depths are expanded,
//! 16-bit samples reduced to their high byte) into 8-bit RGBA, and encodes
//! 8-bit RGBA.
//!
//! # Example
//!
//! ```rust,ignore
//! use wallfit_io::png::{read, write};
//!
//! let image = read("input.png")?;
//! write("output.png", &image)?;
//! ```

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Cursor, Seek, Write};
use std::path::Path;
use tracing::trace;
use wallfit_core::RgbaImage;

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<RgbaImage> {
    let file = File::open(path.as_ref())?;
    decode(BufReader::new(file))
}

/// Decodes a PNG from memory.
pub fn read_from_memory(data: &[u8]) -> IoResult<RgbaImage> {
    decode(Cursor::new(data))
}

fn decode<R: BufRead + Seek>(reader: R) -> IoResult<RgbaImage> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    let buf = &buf[..info.buffer_size()];

    trace!(width = info.width, height = info.height, color = ?info.color_type, depth = ?info.bit_depth, "png::decode");

    // Samples of 16-bit images are big-endian; keep the high byte.
    let samples: Vec<u8> = match info.bit_depth {
        png::BitDepth::Eight => buf.to_vec(),
        png::BitDepth::Sixteen => buf.chunks_exact(2).map(|s| s[0]).collect(),
        depth => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "{:?} {:?}",
                info.color_type, depth
            )));
        }
    };

    let rgba: Vec<u8> = match info.color_type {
        png::ColorType::Rgba => samples,
        png::ColorType::Rgb => samples
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::Grayscale => samples.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        png::ColorType::GrayscaleAlpha => samples
            .chunks_exact(2)
            .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
            .collect(),
        color_type => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "{:?} {:?}",
                color_type, info.bit_depth
            )));
        }
    };

    Ok(RgbaImage::new(info.width, info.height, rgba)?)
}

/// Writes an image to a PNG file as 8-bit RGBA.
pub fn write<P: AsRef<Path>>(path: P, image: &RgbaImage) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    encode(BufWriter::new(file), image)
}

/// Encodes an image to PNG bytes.
pub fn write_to_memory(image: &RgbaImage) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    encode(&mut out, image)?;
    Ok(out)
}

fn encode<W: Write>(writer: W, image: &RgbaImage) -> IoResult<()> {
    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(image.data())
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_raw(width: u32, height: u32, color: png::ColorType, depth: png::BitDepth, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(depth);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn test_roundtrip_rgba() {
        let mut data = Vec::with_capacity(16 * 16 * 4);
        for y in 0..16u32 {
            for x in 0..16u32 {
                data.extend_from_slice(&[(x * 16) as u8, (y * 16) as u8, 64, 200]);
            }
        }
        let image = RgbaImage::new(16, 16, data).unwrap();

        let bytes = write_to_memory(&image).unwrap();
        let loaded = read_from_memory(&bytes).unwrap();
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_decode_rgb_adds_opaque_alpha() {
        let bytes = encode_raw(2, 1, png::ColorType::Rgb, png::BitDepth::Eight, &[1, 2, 3, 4, 5, 6]);
        let image = read_from_memory(&bytes).unwrap();
        assert_eq!(image.data(), &[1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn test_decode_gray_alpha() {
        let bytes = encode_raw(1, 1, png::ColorType::GrayscaleAlpha, png::BitDepth::Eight, &[90, 30]);
        let image = read_from_memory(&bytes).unwrap();
        assert_eq!(image.data(), &[90, 90, 90, 30]);
    }

    #[test]
    fn test_decode_sixteen_bit_keeps_high_byte() {
        let bytes = encode_raw(1, 1, png::ColorType::Grayscale, png::BitDepth::Sixteen, &[0xAB, 0xCD]);
        let image = read_from_memory(&bytes).unwrap();
        assert_eq!(image.data(), &[0xAB, 0xAB, 0xAB, 255]);
    }

    #[test]
    fn test_decode_garbage_is_decode_error() {
        let err = read_from_memory(b"definitely not a png").unwrap_err();
        assert!(err.is_decode_error());
    }
}
