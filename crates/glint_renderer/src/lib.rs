//! Glint renderer - CPU Whitted-style ray tracing
//!
//! Turns a loaded [`glint_core::Scene`] into pixels (ambient, diffuse and
//! specular shading with hard shadows, mirror reflection and refraction),
//! then into a PNG and a base64 string for transport.
//!
//! ```
//! use glint_renderer::{encode_png, render, RenderConfig};
//!
//! let scene = glint_core::load_scene("camera 0 0 5 0 0 0 0 1 0 45\nresolution 4 2\n").unwrap();
//! let image = render(&scene, &RenderConfig::default());
//! let png = encode_png(&image).unwrap();
//! assert_eq!((image.width, image.height), (4, 2));
//! assert!(!png.is_empty());
//! ```

mod api;
mod camera;
mod encode;
mod hittable;
mod light;
mod plane;
mod renderer;
mod sphere;
mod tracer;

pub use api::{render_scene, render_scene_png, RenderError};
pub use camera::{sample_offsets, Camera};
pub use encode::{encode_png, encode_png_rgb8, to_base64, EncodeError, EncodeResult};
pub use hittable::{HitRecord, Hittable};
pub use light::{sample_light, spot_falloff, LightSample};
pub use renderer::{color_to_rgb8, render, render_pixel, ImageBuffer, RenderConfig};
pub use tracer::{Tracer, EPSILON};

/// Re-export common types from glint_core and glint_math
pub use glint_core::{Color, Scene};
pub use glint_math::{Interval, Ray, Vec3};
