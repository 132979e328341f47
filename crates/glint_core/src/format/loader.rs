//! High-level scene loading.
//!
//! Folds parsed statements into a validated [`Scene`]. The only state
//! carried between lines lives in an accumulator local to one load
//! call, so loading is reentrant.

use std::path::Path;

use thiserror::Error;

use crate::format::parser::{parse_scene, ParseError};
use crate::format::types::{Directive, Record, Statement};
use crate::scene::{
    CameraSpec, Color, DirectionalLight, Light, Material, Plane, PointLight, Primitive,
    RenderSettings, Resolution, Scene, Sphere, SpotLight, ValidationError,
};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("line {line}: invalid `{directive}`: {source}")]
    Validation {
        line: usize,
        directive: Directive,
        #[source]
        source: ValidationError,
    },
}

impl LoadError {
    /// True for errors caused by the scene text rather than the environment.
    pub fn is_scene_error(&self) -> bool {
        !matches!(self, LoadError::Io(_))
    }
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Single-pass state while folding statements into a scene.
///
/// Singleton directives overwrite earlier values (last writer wins).
/// `current_material` is the material applied to every primitive declared
/// after it, until the next `material` line.
#[derive(Default)]
struct SceneAccumulator {
    camera: Option<CameraSpec>,
    resolution: Option<Resolution>,
    materials: Vec<Material>,
    current_material: Option<usize>,
    primitives: Vec<(usize, Directive, Primitive)>,
    lights: Vec<Light>,
    ambient: Color,
    background: Color,
    settings: RenderSettings,
}

impl SceneAccumulator {
    fn apply(&mut self, statement: Statement) -> LoadResult<()> {
        let Statement { line, record } = statement;
        let directive = record.directive();
        let invalid = |source: ValidationError| LoadError::Validation {
            line,
            directive,
            source,
        };

        match record {
            Record::Camera {
                eye,
                target,
                up,
                fov,
            } => {
                self.camera = Some(CameraSpec::new(eye, target, up, fov).map_err(invalid)?);
            }
            Record::Resolution { width, height } => {
                self.resolution = Some(Resolution::new(width, height).map_err(invalid)?);
            }
            Record::Material {
                ambient,
                diffuse,
                specular,
                shininess,
                reflect,
                ior,
            } => {
                let material = Material::new(ambient, diffuse, specular, shininess, reflect, ior)
                    .map_err(invalid)?;
                self.materials.push(material);
                self.current_material = Some(self.materials.len() - 1);
            }
            Record::Sphere { center, radius } => {
                let material = self
                    .current_material
                    .ok_or_else(|| invalid(ValidationError::MaterialNotDeclared))?;
                let sphere = Sphere::new(center, radius, material).map_err(invalid)?;
                self.primitives
                    .push((line, directive, Primitive::Sphere(sphere)));
            }
            Record::Plane { point, normal } => {
                let material = self
                    .current_material
                    .ok_or_else(|| invalid(ValidationError::MaterialNotDeclared))?;
                let plane = Plane::new(point, normal, material).map_err(invalid)?;
                self.primitives
                    .push((line, directive, Primitive::Plane(plane)));
            }
            Record::PointLight { position, color } => {
                self.lights.push(Light::Point(PointLight { position, color }));
            }
            Record::DirectionalLight { direction, color } => {
                let light = DirectionalLight::new(direction, color).map_err(invalid)?;
                self.lights.push(Light::Directional(light));
            }
            Record::SpotLight {
                position,
                direction,
                color,
                inner,
                outer,
            } => {
                let light =
                    SpotLight::new(position, direction, color, inner, outer).map_err(invalid)?;
                self.lights.push(Light::Spot(light));
            }
            Record::AmbientLight(color) => self.ambient = color,
            Record::Background(color) => self.background = color,
            Record::MaxDepth(depth) => {
                self.settings = self.settings.with_max_depth(depth).map_err(invalid)?;
            }
            Record::Samples(samples) => {
                self.settings = self.settings.with_samples(samples).map_err(invalid)?;
            }
        }

        Ok(())
    }

    fn finish(self) -> LoadResult<Scene> {
        let camera = self
            .camera
            .ok_or(ParseError::MissingDirective(Directive::Camera))?;
        let resolution = self
            .resolution
            .ok_or(ParseError::MissingDirective(Directive::Resolution))?;

        let mut scene = Scene::new(camera, resolution);
        for material in self.materials {
            scene.add_material(material);
        }
        for (line, directive, primitive) in self.primitives {
            scene
                .add_primitive(primitive)
                .map_err(|source| LoadError::Validation {
                    line,
                    directive,
                    source,
                })?;
        }
        for light in self.lights {
            scene.add_light(light);
        }
        scene.set_ambient(self.ambient);
        scene.set_background(self.background);
        scene.set_settings(self.settings);

        Ok(scene)
    }
}

/// Parse and validate scene text.
///
/// # Example
///
/// ```
/// use glint_core::load_scene;
///
/// let scene = load_scene("camera 0 0 5 0 0 0 0 1 0 45\nresolution 4 4\n").unwrap();
/// assert_eq!(scene.primitive_count(), 0);
/// ```
pub fn load_scene(content: &str) -> LoadResult<Scene> {
    let statements = parse_scene(content)?;

    let mut accumulator = SceneAccumulator::default();
    for statement in statements {
        accumulator.apply(statement)?;
    }
    let scene = accumulator.finish()?;

    log::info!(
        "Loaded scene: {}x{}, {} primitives, {} lights, {} materials",
        scene.resolution().width,
        scene.resolution().height,
        scene.primitive_count(),
        scene.light_count(),
        scene.material_count()
    );

    Ok(scene)
}

/// Read a scene file from disk and load it.
pub fn load_scene_file<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let path = path.as_ref();
    log::info!("Loading scene from {:?}", path);
    let content = std::fs::read_to_string(path)?;
    load_scene(&content)
}
