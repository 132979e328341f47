//! Camera for ray generation.

use glint_core::{CameraSpec, Resolution, MAX_SAMPLES};
use glint_math::{Ray, Vec2, Vec3};

/// Pinhole camera mapping pixels to primary rays.
///
/// The image plane sits at unit distance in front of the eye. Pixel
/// (0, 0) is the top-left corner of the image; rows run downwards.
#[derive(Debug, Clone)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,

    center: Vec3,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
}

impl Camera {
    /// Build the camera basis for a scene camera and output resolution.
    pub fn new(spec: &CameraSpec, resolution: Resolution) -> Self {
        let center = spec.eye;

        // Calculate viewport dimensions
        let theta = spec.fov_degrees.to_radians();
        let viewport_height = 2.0 * (theta / 2.0).tan();
        let viewport_width = viewport_height * resolution.aspect_ratio();

        // Calculate camera basis vectors
        let w = -spec.view_direction();
        let u = spec.up.cross(w).normalize();
        let v = w.cross(u);

        // Calculate viewport vectors
        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        // Calculate pixel delta vectors
        let pixel_delta_u = viewport_u / resolution.width as f32;
        let pixel_delta_v = viewport_v / resolution.height as f32;

        // Calculate upper left pixel location
        let viewport_upper_left = center - w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        Self {
            image_width: resolution.width,
            image_height: resolution.height,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
        }
    }

    /// Ray through pixel (i, j), shifted by `offset` pixels from its center.
    ///
    /// Offsets in [-0.5, 0.5] stay within the pixel.
    pub fn get_ray(&self, i: u32, j: u32, offset: Vec2) -> Ray {
        let pixel_sample = self.pixel00_loc
            + ((i as f32) + offset.x) * self.pixel_delta_u
            + ((j as f32) + offset.y) * self.pixel_delta_v;

        Ray::primary(self.center, pixel_sample - self.center)
    }
}

/// Deterministic n x n stratified offsets within a pixel.
///
/// A single sample lands on the pixel center. `samples_per_axis` is
/// clamped to `1..=MAX_SAMPLES`.
pub fn sample_offsets(samples_per_axis: u32) -> Vec<Vec2> {
    let n = samples_per_axis.clamp(1, MAX_SAMPLES);
    let step = 1.0 / n as f32;
    (0..n)
        .flat_map(|sy| {
            (0..n).map(move |sx| {
                Vec2::new(
                    (sx as f32 + 0.5) * step - 0.5,
                    (sy as f32 + 0.5) * step - 0.5,
                )
            })
        })
        .collect()
}
