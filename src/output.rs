//! Image encoders.
//!
//! The primary output format is binary PPM (P6): three newline-terminated
//! header lines (`P6`, `<width> <height>`, `255`) followed by one byte per
//! channel per pixel, RGB, row-major top-to-bottom. PNG and EXR export are
//! also available and selected by file extension.
//!
//! Pixel values are expected in [0, 1]; the 8-bit encoders map each
//! channel to `round(value * 255)`.

use exr::prelude::*;
use image::{ImageBuffer, Rgb};
use log::{info, warn};
use std::fs::File;
use std::io::{BufWriter, Write};

/// f32 RGB image buffer produced by the renderer.
pub type RenderedImage = ImageBuffer<Rgb<f32>, Vec<f32>>;

/// Map a [0, 1] channel value to its 8-bit encoding.
fn channel_byte(value: f32) -> u8 {
    (value * 255.0).round() as u8
}

/// Serialize an image as binary PPM (P6) into a writer.
pub fn write_ppm<W: Write>(image: &RenderedImage, out: &mut W) -> std::io::Result<()> {
    let (width, height) = image.dimensions();

    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for pixel in image.pixels() {
        data.push(channel_byte(pixel[0]));
        data.push(channel_byte(pixel[1]));
        data.push(channel_byte(pixel[2]));
    }

    writeln!(out, "P6")?;
    writeln!(out, "{} {}", width, height)?;
    writeln!(out, "255")?;
    out.write_all(&data)?;
    out.flush()
}

/// Save an image as binary PPM (P6).
pub fn save_image_as_ppm(image: &RenderedImage, output_path: &str) {
    let result = File::create(output_path)
        .and_then(|file| write_ppm(image, &mut BufWriter::new(file)));

    match result {
        Ok(_) => info!("Image saved as {}", output_path),
        Err(e) => warn!("Failed to save image: {}", e),
    }
}

/// Save an image as 8-bit PNG.
///
/// Pixel values are already display-referred [0, 1] colors, so the
/// conversion is the same linear byte mapping the PPM encoder uses.
pub fn save_image_as_png(image: &RenderedImage, output_path: &str) {
    let (width, height) = image.dimensions();
    let u8_image: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_fn(width, height, |x, y| {
        let pixel = image.get_pixel(x, y);
        Rgb([
            channel_byte(pixel[0].clamp(0.0, 1.0)),
            channel_byte(pixel[1].clamp(0.0, 1.0)),
            channel_byte(pixel[2].clamp(0.0, 1.0)),
        ])
    });

    match u8_image.save(output_path) {
        Ok(_) => info!("Image saved as {}", output_path),
        Err(e) => warn!("Failed to save image: {}", e),
    }
}

/// Save an image as EXR with full f32 precision.
pub fn save_image_as_exr(image: &RenderedImage, output_path: &str) {
    let (width, height) = image.dimensions();
    let result = write_rgb_file(output_path, width as usize, height as usize, |x, y| {
        let pixel = image.get_pixel(x as u32, y as u32);
        (pixel[0], pixel[1], pixel[2])
    });

    match result {
        Ok(_) => info!("Image saved as EXR: {}", output_path),
        Err(e) => warn!("Failed to save EXR image: {}", e),
    }
}
