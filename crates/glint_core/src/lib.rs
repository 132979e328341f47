//! Glint Core - scene model and scene description format.
//!
//! This crate provides:
//!
//! - **Scene model**: `Scene`, `CameraSpec`, `Material`, `Primitive`, `Light`
//! - **Scene format**: parsing and validation of `.scene` text files
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_scene_file;
//!
//! let scene = load_scene_file("scenes/spheres.scene")?;
//! println!("Loaded {} primitives, {} lights",
//!     scene.primitive_count(),
//!     scene.light_count());
//! ```

pub mod format;
pub mod scene;

// Re-export commonly used types
pub use format::{load_scene, load_scene_file, LoadError, LoadResult, ParseError};
pub use scene::{
    CameraSpec, Color, DirectionalLight, Light, Material, Plane, PointLight, Primitive,
    RenderSettings, Resolution, Scene, Sphere, SpotLight, ValidationError, DEFAULT_MAX_DEPTH,
    MAX_DEPTH_LIMIT, MAX_DIMENSION, MAX_PIXELS, MAX_SAMPLES,
};
