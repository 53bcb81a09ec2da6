//! Image encoders for the renderer's byte buffer.
//!
//! The renderer hands over a flat `width * height * 3` RGB buffer whose
//! row 0 is the bottom scanline; both encoders here flip it into the
//! top-down order their file formats expect.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageBuffer, Rgb};
use log::info;
use thiserror::Error;

/// Errors that can occur while encoding an image.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGB")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("unsupported output format '{0}' (use .png or .ppm)")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Write a rendered buffer to disk, picking the format from the file
/// extension.
pub fn write_image(
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<(), OutputError> {
    let path = path.as_ref();

    let expected = width as usize * height as usize * 3;
    if pixels.len() != expected {
        return Err(OutputError::BufferSize {
            width,
            height,
            expected,
            actual: pixels.len(),
        });
    }

    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => write_png(path, width, height, pixels),
        "ppm" => write_ppm(path, width, height, pixels),
        other => Err(OutputError::UnsupportedFormat(other.to_string())),
    }?;

    info!("saved {}x{} image to {}", width, height, path.display());
    Ok(())
}

/// Plain-text PPM (P3), top scanline first.
fn write_ppm(path: &Path, width: u32, height: u32, pixels: &[u8]) -> Result<(), OutputError> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "P3")?;
    writeln!(out, "{} {}", width, height)?;
    writeln!(out, "255")?;

    for row in (0..height).rev() {
        for col in 0..width {
            let i = ((row * width + col) * 3) as usize;
            write!(out, "{} {} {} ", pixels[i], pixels[i + 1], pixels[i + 2])?;
        }
        writeln!(out)?;
    }

    out.flush()?;
    Ok(())
}

/// 8-bit RGB PNG via the image crate.
fn write_png(path: &Path, width: u32, height: u32, pixels: &[u8]) -> Result<(), OutputError> {
    let image = flip_into_image(width, height, pixels);
    image.save(path)?;
    Ok(())
}

/// Reorder the bottom-up buffer into a top-down `RgbImage`.
fn flip_into_image(width: u32, height: u32, pixels: &[u8]) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
    ImageBuffer::from_fn(width, height, |x, y| {
        let row = height - 1 - y;
        let i = ((row * width + x) * 3) as usize;
        Rgb([pixels[i], pixels[i + 1], pixels[i + 2]])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_size_is_validated() {
        let result = write_image("ignored.png", 4, 4, &[0u8; 10]);
        assert!(matches!(
            result,
            Err(OutputError::BufferSize {
                expected: 48,
                actual: 10,
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let result = write_image("image.bmp", 1, 1, &[0u8; 3]);
        assert!(matches!(result, Err(OutputError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_zero_buffer_roundtrips_to_black_png() {
        let (width, height) = (5, 3);
        let buffer = vec![0u8; width as usize * height as usize * 3];

        let path = std::env::temp_dir().join("ember_output_roundtrip.png");
        write_image(&path, width, height, &buffer).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (width, height));
        assert!(decoded.pixels().all(|p| p.0 == [0, 0, 0]));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_png_flips_rows_top_down() {
        // Bottom scanline red, top scanline blue
        let (width, height) = (2u32, 2u32);
        let mut buffer = vec![0u8; 12];
        buffer[0..6].copy_from_slice(&[255, 0, 0, 255, 0, 0]); // buffer row 0 (bottom)
        buffer[6..12].copy_from_slice(&[0, 0, 255, 0, 0, 255]); // buffer row 1 (top)

        let image = flip_into_image(width, height, &buffer);
        // Image row 0 is the top of the picture
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 255]);
        assert_eq!(image.get_pixel(0, 1).0, [255, 0, 0]);
    }

    #[test]
    fn test_ppm_header_and_row_order() {
        let (width, height) = (2u32, 2u32);
        let mut buffer = vec![0u8; 12];
        buffer[0..3].copy_from_slice(&[1, 2, 3]); // bottom-left pixel

        let path = std::env::temp_dir().join("ember_output_header.ppm");
        write_image(&path, width, height, &buffer).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("P3"));
        assert_eq!(lines.next(), Some("2 2"));
        assert_eq!(lines.next(), Some("255"));
        // Top scanline (all zeros) comes first, bottom-left pixel last
        assert_eq!(lines.next().map(str::trim), Some("0 0 0 0 0 0"));
        assert_eq!(lines.next().map(str::trim), Some("1 2 3 0 0 0"));

        std::fs::remove_file(&path).ok();
    }
}
