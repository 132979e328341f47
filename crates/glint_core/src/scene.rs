//! Scene model types for Glint.
//!
//! A [`Scene`] is built once by the loader and then only read. Primitives
//! refer to their material by index into the scene's material table, so
//! the table can be shared by any number of primitives.

use glint_math::{Interval, Vec3};
use serde::Serialize;
use thiserror::Error;

/// Color type alias (RGB, components conventionally 0-1 but unbounded)
pub type Color = Vec3;

/// Default bounce limit when a scene has no `max_depth` directive.
pub const DEFAULT_MAX_DEPTH: u32 = 5;

/// Largest accepted `max_depth`. Each bounce is a nested call, so this
/// also bounds the tracer's stack use.
pub const MAX_DEPTH_LIMIT: u32 = 64;

/// Largest accepted image side, in pixels.
pub const MAX_DIMENSION: u32 = 16_384;

/// Largest accepted image area, in pixels.
pub const MAX_PIXELS: usize = 1 << 26;

/// Largest accepted samples per pixel axis.
pub const MAX_SAMPLES: u32 = 16;

/// Valid vertical field of view, in degrees (exclusive).
const FOV_RANGE: Interval = Interval { min: 0.0, max: 180.0 };

/// Valid spot light cone angles, in degrees (inclusive).
const CONE_RANGE: Interval = Interval { min: 0.0, max: 180.0 };

/// Errors raised when a scene element breaks one of its invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("sphere radius must be positive, got {0}")]
    NonPositiveRadius(f32),

    #[error(
        "resolution must be 1..={max_side} per side and at most {max_pixels} pixels, got {width}x{height}",
        max_side = MAX_DIMENSION,
        max_pixels = MAX_PIXELS
    )]
    InvalidResolution { width: u32, height: u32 },

    #[error("field of view must be in (0, 180) degrees, got {0}")]
    FovOutOfRange(f32),

    #[error("degenerate camera: {0}")]
    DegenerateCamera(&'static str),

    #[error("shininess must be non-negative, got {0}")]
    NegativeShininess(f32),

    #[error("index of refraction must be at least 1, got {0}")]
    IorBelowOne(f32),

    #[error("{0} must be a non-zero vector")]
    ZeroVector(&'static str),

    #[error("spot light cone needs 0 <= inner <= outer <= 180 degrees, got {inner}..{outer}")]
    InvalidSpotCone { inner: f32, outer: f32 },

    #[error("samples per axis must be in 1..={max}", max = MAX_SAMPLES)]
    InvalidSamples,

    #[error("max_depth must be at most {max}, got {0}", max = MAX_DEPTH_LIMIT)]
    MaxDepthTooLarge(u32),

    #[error("primitive declared before any material")]
    MaterialNotDeclared,
}

pub type ValidationResult<T> = Result<T, ValidationError>;

fn non_zero(v: Vec3, what: &'static str) -> ValidationResult<Vec3> {
    if v.length_squared() > 1e-12 && v.is_finite() {
        Ok(v.normalize())
    } else {
        Err(ValidationError::ZeroVector(what))
    }
}

/// Pinhole camera placement as written in the scene file.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CameraSpec {
    /// Eye position
    pub eye: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Approximate up vector (re-orthogonalized when rays are generated)
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
}

impl CameraSpec {
    pub fn new(eye: Vec3, target: Vec3, up: Vec3, fov_degrees: f32) -> ValidationResult<Self> {
        if !FOV_RANGE.surrounds(fov_degrees) {
            return Err(ValidationError::FovOutOfRange(fov_degrees));
        }

        let view = target - eye;
        if !view.length_squared().is_finite() {
            return Err(ValidationError::DegenerateCamera(
                "eye and target are too far apart",
            ));
        }
        if view.length_squared() < 1e-12 {
            return Err(ValidationError::DegenerateCamera("eye and target coincide"));
        }
        if !up.length_squared().is_finite() {
            return Err(ValidationError::DegenerateCamera("up vector is too large"));
        }
        if up.length_squared() < 1e-12 {
            return Err(ValidationError::DegenerateCamera("up vector is zero"));
        }
        if view.normalize().cross(up.normalize()).length_squared() < 1e-10 {
            return Err(ValidationError::DegenerateCamera(
                "up vector is parallel to the view direction",
            ));
        }

        Ok(Self {
            eye,
            target,
            up,
            fov_degrees,
        })
    }

    /// Unit vector from the eye toward the target.
    pub fn view_direction(&self) -> Vec3 {
        (self.target - self.eye).normalize()
    }
}

/// Output image size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> ValidationResult<Self> {
        let side = 1..=MAX_DIMENSION;
        if !side.contains(&width)
            || !side.contains(&height)
            || width as usize * height as usize > MAX_PIXELS
        {
            return Err(ValidationError::InvalidResolution { width, height });
        }
        Ok(Self { width, height })
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Phong-style surface description.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Material {
    /// Reflectance under the scene's ambient light
    pub ambient: Color,
    /// Lambertian reflectance
    pub diffuse: Color,
    /// Phong highlight color
    pub specular: Color,
    /// Phong exponent
    pub shininess: f32,
    /// Mirror reflectivity per channel
    pub reflect: Color,
    /// Index of refraction (1.0 = opaque, no transmission)
    pub ior: f32,
}

impl Material {
    pub fn new(
        ambient: Color,
        diffuse: Color,
        specular: Color,
        shininess: f32,
        reflect: Color,
        ior: f32,
    ) -> ValidationResult<Self> {
        if shininess < 0.0 {
            return Err(ValidationError::NegativeShininess(shininess));
        }
        if ior < 1.0 {
            return Err(ValidationError::IorBelowOne(ior));
        }
        Ok(Self {
            ambient,
            diffuse,
            specular,
            shininess,
            reflect,
            ior,
        })
    }

    /// A plain diffuse material with no highlights, mirror or transmission.
    pub fn matte(diffuse: Color) -> Self {
        Self {
            ambient: diffuse,
            diffuse,
            specular: Color::ZERO,
            shininess: 0.0,
            reflect: Color::ZERO,
            ior: 1.0,
        }
    }

    /// True if any reflectivity channel is positive.
    pub fn is_reflective(&self) -> bool {
        self.reflect.max_element() > 0.0
    }

    /// True if light is transmitted (and bent) through the surface.
    pub fn is_refractive(&self) -> bool {
        self.ior > 1.0
    }

    /// Share of light not taken by mirror reflection, per channel.
    pub fn transmission(&self) -> Color {
        (Color::ONE - self.reflect).max(Color::ZERO)
    }
}

/// A sphere primitive.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    /// Index into the scene's material table
    pub material: usize,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, material: usize) -> ValidationResult<Self> {
        // Written this way round so NaN is rejected too
        if !(radius > 0.0) {
            return Err(ValidationError::NonPositiveRadius(radius));
        }
        Ok(Self {
            center,
            radius,
            material,
        })
    }
}

/// An infinite plane through `point` with unit `normal`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
    /// Index into the scene's material table
    pub material: usize,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3, material: usize) -> ValidationResult<Self> {
        Ok(Self {
            point,
            normal: non_zero(normal, "plane normal")?,
            material,
        })
    }
}

/// Renderable geometry.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Sphere(Sphere),
    Plane(Plane),
}

impl Primitive {
    /// Material table index of this primitive.
    pub fn material(&self) -> usize {
        match self {
            Primitive::Sphere(s) => s.material,
            Primitive::Plane(p) => p.material,
        }
    }
}

/// Light radiating equally in all directions from a point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Color,
}

/// Light arriving from infinitely far away along `direction`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DirectionalLight {
    /// Unit direction the light travels in
    pub direction: Vec3,
    pub color: Color,
}

impl DirectionalLight {
    pub fn new(direction: Vec3, color: Color) -> ValidationResult<Self> {
        Ok(Self {
            direction: non_zero(direction, "light direction")?,
            color,
        })
    }
}

/// Point light restricted to a cone, fading out between the inner and
/// outer angles.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SpotLight {
    pub position: Vec3,
    /// Unit axis of the cone
    pub direction: Vec3,
    pub color: Color,
    /// Full-intensity half angle in degrees
    pub inner_angle: f32,
    /// Cut-off half angle in degrees
    pub outer_angle: f32,
}

impl SpotLight {
    pub fn new(
        position: Vec3,
        direction: Vec3,
        color: Color,
        inner_angle: f32,
        outer_angle: f32,
    ) -> ValidationResult<Self> {
        if !(CONE_RANGE.contains(inner_angle)
            && CONE_RANGE.contains(outer_angle)
            && inner_angle <= outer_angle)
        {
            return Err(ValidationError::InvalidSpotCone {
                inner: inner_angle,
                outer: outer_angle,
            });
        }
        Ok(Self {
            position,
            direction: non_zero(direction, "spot light direction")?,
            color,
            inner_angle,
            outer_angle,
        })
    }
}

/// Any light source other than the ambient term.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Light {
    Point(PointLight),
    Directional(DirectionalLight),
    Spot(SpotLight),
}

impl Light {
    pub fn color(&self) -> Color {
        match self {
            Light::Point(l) => l.color,
            Light::Directional(l) => l.color,
            Light::Spot(l) => l.color,
        }
    }
}

/// Quality settings carried by the scene file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RenderSettings {
    /// Maximum reflection/refraction bounces (0 = direct shading only)
    pub max_depth: u32,
    /// Sub-pixel samples per axis (n x n rays per pixel)
    pub samples: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            samples: 1,
        }
    }
}

impl RenderSettings {
    pub fn with_samples(mut self, samples: u32) -> ValidationResult<Self> {
        if !(1..=MAX_SAMPLES).contains(&samples) {
            return Err(ValidationError::InvalidSamples);
        }
        self.samples = samples;
        Ok(self)
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> ValidationResult<Self> {
        if max_depth > MAX_DEPTH_LIMIT {
            return Err(ValidationError::MaxDepthTooLarge(max_depth));
        }
        self.max_depth = max_depth;
        Ok(self)
    }
}

/// A complete, validated scene.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scene {
    camera: CameraSpec,
    resolution: Resolution,
    materials: Vec<Material>,
    primitives: Vec<Primitive>,
    lights: Vec<Light>,
    ambient: Color,
    background: Color,
    settings: RenderSettings,
}

impl Scene {
    /// Create a scene with no geometry, no lights, black ambient and
    /// black background.
    pub fn new(camera: CameraSpec, resolution: Resolution) -> Self {
        Self {
            camera,
            resolution,
            materials: Vec::new(),
            primitives: Vec::new(),
            lights: Vec::new(),
            ambient: Color::ZERO,
            background: Color::ZERO,
            settings: RenderSettings::default(),
        }
    }

    /// Add a material to the scene and return its index.
    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    /// Add a primitive. Its material index must already exist.
    pub fn add_primitive(&mut self, primitive: Primitive) -> ValidationResult<()> {
        if primitive.material() >= self.materials.len() {
            return Err(ValidationError::MaterialNotDeclared);
        }
        self.primitives.push(primitive);
        Ok(())
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn set_ambient(&mut self, color: Color) {
        self.ambient = color;
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn set_settings(&mut self, settings: RenderSettings) {
        self.settings = settings;
    }

    pub fn camera(&self) -> &CameraSpec {
        &self.camera
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Material of a primitive.
    pub fn material(&self, index: usize) -> &Material {
        &self.materials[index]
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn ambient(&self) -> Color {
        self.ambient
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn settings(&self) -> RenderSettings {
        self.settings
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }
}
