//! Scene model and pixel compositor.
//!
//! A [`Scene`] holds the camera frame, the background color and the ordered
//! primitive list. Rendering casts one ray per pixel and keeps the nearest
//! hit, scanning the primitives linearly.

use glam::{Vec2, Vec3A};
use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;

use crate::primitive::Primitive;
use crate::ray::Ray;

/// Immutable scene description, built once by the decoder.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Output image width in pixels.
    pub width: u32,
    /// Output image height in pixels.
    pub height: u32,
    /// Color returned for rays that hit nothing.
    pub bg_color: Vec3A,

    /// Camera position in world space.
    pub camera_position: Vec3A,
    /// Camera basis vector pointing right. Used as given, never
    /// re-orthonormalized.
    pub camera_right: Vec3A,
    /// Camera basis vector pointing up.
    pub camera_up: Vec3A,
    /// Camera basis vector pointing into the scene.
    pub camera_forward: Vec3A,
    /// Tangent of the half field of view, horizontal and vertical.
    pub tan_fov: Vec2,

    /// Primitives in scene-file order. Order matters only for the
    /// first-wins tie-break on equal hit distances.
    pub primitives: Vec<Primitive>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            bg_color: Vec3A::ZERO,
            camera_position: Vec3A::ZERO,
            camera_right: Vec3A::ZERO,
            camera_up: Vec3A::ZERO,
            camera_forward: Vec3A::ZERO,
            tan_fov: Vec2::ZERO,
            primitives: Vec::new(),
        }
    }
}

impl Scene {
    /// Build the world-space ray through the center of pixel (x, y).
    ///
    /// Pixel coordinates are 0-indexed, x across the width, y down the
    /// height. The direction is left unnormalized; intersection math is
    /// homogeneous in t, so every primitive sees the same parametrization.
    pub fn generate_ray_to_pixel(&self, x: u32, y: u32) -> Ray {
        let xc = self.tan_fov.x * (2.0 * (x as f32 + 0.5) / self.width as f32 - 1.0);
        let yc = self.tan_fov.y * (2.0 * (y as f32 + 0.5) / self.height as f32 - 1.0);

        Ray::new(
            self.camera_position,
            xc * self.camera_right - yc * self.camera_up + self.camera_forward,
        )
    }

    /// Color of pixel (x, y): nearest hit over all primitives, or the
    /// background color when nothing is hit.
    ///
    /// The comparison is strictly-less, so equal hit distances keep the
    /// primitive that appears earliest in the scene.
    pub fn get_pixel_color(&self, x: u32, y: u32) -> Vec3A {
        let ray = self.generate_ray_to_pixel(x, y);

        let mut nearest: Option<(f32, Vec3A)> = None;
        for primitive in &self.primitives {
            let Some((t, color)) = primitive.intersect(&ray) else {
                continue;
            };

            if nearest.map_or(true, |(best_t, _)| t < best_t) {
                nearest = Some((t, color));
            }
        }

        match nearest {
            Some((_, color)) => color,
            None => self.bg_color,
        }
    }

    /// Render the scene into an f32 RGB image buffer.
    ///
    /// Pixels are independent (the scene is read-only, each pixel writes
    /// only its own cell), so the loop runs in parallel with Rayon.
    pub fn render(&self) -> ImageBuffer<Rgb<f32>, Vec<f32>> {
        let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> = ImageBuffer::new(self.width, self.height);

        info!(
            "Rendering {} primitives on {} CPU cores...",
            self.primitives.len(),
            rayon::current_num_threads()
        );
        let render_start = std::time::Instant::now();
        let pb = ProgressBar::new((self.width * self.height) as u64);
        pb.set_style(ProgressStyle::default_bar().template("{bar:40} {pos}/{len} ETA: {eta}").unwrap());

        image.enumerate_pixels_mut().par_bridge().for_each(|(x, y, pixel)| {
            let color = self.get_pixel_color(x, y);
            *pixel = Rgb([color.x, color.y, color.z]);
            pb.inc(1);
        });

        pb.finish();
        info!("Image rendered in {:.2?}", render_start.elapsed());

        image
    }
}
