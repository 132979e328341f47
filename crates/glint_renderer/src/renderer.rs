//! Image rendering.
//!
//! Casts one or more camera rays per pixel, traces them, and stores the
//! averaged color in an [`ImageBuffer`]. Rows are independent, so the
//! parallel path hands each rayon worker its own row slice of the buffer.

use glint_core::{Color, Resolution, Scene};
use glint_math::{Interval, Vec2};
use rayon::prelude::*;

use crate::camera::{sample_offsets, Camera};
use crate::tracer::Tracer;

/// Render configuration.
///
/// Everything here overrides what the scene file says; `None` means
/// "use the scene's value".
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Trace rows in parallel on the rayon thread pool
    pub parallel: bool,
    /// Output size override (e.g. for quick previews)
    pub resolution: Option<Resolution>,
    /// Bounce limit override
    pub max_depth: Option<u32>,
    /// Samples per pixel axis override
    pub samples: Option<u32>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            resolution: None,
            max_depth: None,
            samples: None,
        }
    }
}

impl RenderConfig {
    /// Render on the calling thread only.
    pub fn serial() -> Self {
        Self {
            parallel: false,
            ..Default::default()
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = Some(resolution);
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = Some(samples);
        self
    }
}

/// Convert a color to 8-bit RGB, clamping each channel to [0, 1].
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let quantize = |c: f32| (Interval::UNIT.clamp(c) * 255.0).round() as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Row-major, top-to-bottom buffer of linear colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::ZERO)
    }

    /// Create a new image buffer filled with one color.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Quantize every pixel to 8-bit RGB.
    pub fn to_rgb8(&self) -> Vec<[u8; 3]> {
        self.pixels.iter().copied().map(color_to_rgb8).collect()
    }

    /// Quantized pixels as a flat `RGBRGB...` byte buffer.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.to_rgb8()).to_vec()
    }
}

/// Render a single pixel, averaging one ray per sub-pixel offset.
pub fn render_pixel(camera: &Camera, tracer: &Tracer, x: u32, y: u32, offsets: &[Vec2]) -> Color {
    let mut pixel_color = Color::ZERO;

    for offset in offsets {
        let ray = camera.get_ray(x, y, *offset);
        pixel_color += tracer.trace(&ray);
    }

    // Average the samples
    pixel_color / offsets.len() as f32
}

/// Render the entire scene to an image buffer.
pub fn render(scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let resolution = config.resolution.unwrap_or_else(|| scene.resolution());
    let camera = Camera::new(scene.camera(), resolution);

    let mut tracer = Tracer::new(scene);
    if let Some(max_depth) = config.max_depth {
        tracer = tracer.with_max_depth(max_depth);
    }

    let samples = config.samples.unwrap_or(scene.settings().samples);
    let offsets = sample_offsets(samples);

    log::info!(
        "Rendering {}x{} ({} pixels), {} rays/pixel, max depth {}, {}",
        resolution.width,
        resolution.height,
        resolution.pixel_count(),
        offsets.len(),
        tracer.max_depth(),
        if config.parallel { "parallel" } else { "serial" }
    );

    let mut image = ImageBuffer::new(resolution.width, resolution.height);
    let row_width = resolution.width as usize;

    let render_row = |(y, row): (usize, &mut [Color])| {
        for (x, pixel) in row.iter_mut().enumerate() {
            *pixel = render_pixel(&camera, &tracer, x as u32, y as u32, &offsets);
        }
    };

    if config.parallel {
        image
            .pixels
            .par_chunks_mut(row_width)
            .enumerate()
            .for_each(render_row);
    } else {
        image
            .pixels
            .chunks_mut(row_width)
            .enumerate()
            .for_each(render_row);
    }

    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::load_scene;

    const SPHERES: &str = "camera 0 1 6  0 0 0  0 1 0  50\n\
                           resolution 32 24\n\
                           ambient_light 0.1 0.1 0.1\n\
                           background 0.1 0.2 0.3\n\
                           material 1 0.2 0.2  0.9 0.2 0.2  0.6 0.6 0.6  30  0.2 0.2 0.2  1\n\
                           sphere -1 0 0 1\n\
                           material 0 0 0  0 0 0  0.5 0.5 0.5  80  0.1 0.1 0.1  1.5\n\
                           sphere 1.2 0 0.5 0.8\n\
                           material 0.5 0.5 0.5  0.6 0.6 0.6  0 0 0  1  0 0 0  1\n\
                           plane 0 -1 0  0 1 0\n\
                           point_light 4 6 6  1 1 1\n\
                           spot_light 0 5 0  0 -1 0  0.5 0.5 0.5  15 35\n";

    #[test]
    fn test_color_to_rgb8() {
        assert_eq!(color_to_rgb8(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb8(Color::ONE), [255, 255, 255]);
        // Clamped, and rounded rather than truncated
        assert_eq!(color_to_rgb8(Color::new(-1.0, 0.5, 2.0)), [0, 128, 255]);
    }

    #[test]
    fn test_image_buffer() {
        let mut image = ImageBuffer::new(3, 2);
        image.set(2, 1, Color::ONE);

        assert_eq!(image.get(2, 1), Color::ONE);
        assert_eq!(image.get(0, 0), Color::ZERO);
        assert_eq!(image.pixels[5], Color::ONE);

        let bytes = image.to_rgb_bytes();
        assert_eq!(bytes.len(), 3 * 2 * 3);
        assert_eq!(&bytes[15..], &[255, 255, 255]);
    }

    #[test]
    fn test_empty_scene_renders_background() {
        let scene = load_scene(
            "camera 0 0 5  0 0 0  0 1 0  60\nresolution 7 5\nbackground 0.25 0.5 1\n",
        )
        .unwrap();
        let image = render(&scene, &RenderConfig::default());

        assert_eq!((image.width, image.height), (7, 5));
        assert!(image
            .pixels
            .iter()
            .all(|&p| p == Color::new(0.25, 0.5, 1.0)));
    }

    #[test]
    fn test_unlit_sphere_is_black_on_background() {
        let scene = load_scene(
            "camera 0 0 5  0 0 0  0 1 0  45\n\
             resolution 9 9\n\
             background 0.2 0.4 0.6\n\
             material 1 1 1  1 1 1  1 1 1  10  0 0 0  1\n\
             sphere 0 0 0 1\n",
        )
        .unwrap();
        let image = render(&scene, &RenderConfig::serial());

        let background = Color::new(0.2, 0.4, 0.6);
        assert_eq!(image.get(4, 4), Color::ZERO);
        assert_eq!(image.get(0, 0), background);
        assert!(image
            .pixels
            .iter()
            .all(|&p| p == Color::ZERO || p == background));
    }

    #[test]
    fn test_serial_render_is_deterministic() {
        let scene = load_scene(SPHERES).unwrap();
        let first = render(&scene, &RenderConfig::serial());
        let second = render(&scene, &RenderConfig::serial());
        assert_eq!(first, second);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let scene = load_scene(SPHERES).unwrap();
        let serial = render(&scene, &RenderConfig::serial()).to_rgb_bytes();
        let parallel = render(&scene, &RenderConfig::default()).to_rgb_bytes();

        assert_eq!(serial.len(), parallel.len());
        for (a, b) in serial.iter().zip(&parallel) {
            assert!(a.abs_diff(*b) <= 1);
        }
    }

    #[test]
    fn test_sphere_silhouette_is_round() {
        let scene = load_scene(
            "camera 0 0 5  0 0 0  0 1 0  45\n\
             resolution 60 30\n\
             ambient_light 1 1 1\n\
             material 1 1 1  0 0 0  0 0 0  1  0 0 0  1\n\
             sphere 0 0 0 1\n",
        )
        .unwrap();
        let image = render(&scene, &RenderConfig::default());
        let covered = |x: u32, y: u32| image.get(x, y).x > 0.5;

        let across = (0..image.width).filter(|&x| covered(x, 15)).count();
        let down = (0..image.height).filter(|&y| covered(30, y)).count();

        assert!(across > 8, "sphere should be visible, got {}", across);
        assert!(
            across.abs_diff(down) <= 1,
            "silhouette {}x{} is stretched",
            across,
            down
        );
    }

    #[test]
    fn test_config_overrides() {
        let scene = load_scene(SPHERES).unwrap();
        let config = RenderConfig::serial()
            .with_resolution(Resolution::new(8, 4).unwrap())
            .with_samples(2)
            .with_max_depth(0);

        let image = render(&scene, &config);
        assert_eq!((image.width, image.height), (8, 4));
        assert_eq!(image.pixels.len(), 32);
    }

    #[test]
    fn test_supersampled_background_is_unchanged() {
        let scene = load_scene(
            "camera 0 0 5  0 0 0  0 1 0  60\nresolution 4 4\nbackground 0.5 0.5 0.5\nsamples 3\n",
        )
        .unwrap();
        let image = render(&scene, &RenderConfig::default());
        for pixel in &image.pixels {
            assert!((*pixel - Color::splat(0.5)).abs().max_element() < 1e-5);
        }
    }
}
