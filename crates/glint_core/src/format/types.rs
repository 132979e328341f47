//! Record types produced by the scene parser.
//!
//! These mirror the text format one-to-one: a [`Statement`] is one
//! directive line with its numbers already converted. Nothing here is
//! validated beyond "the numbers parsed"; the loader turns statements into
//! scene model types and checks their invariants.

use std::fmt;

use glint_math::Vec3;

/// The keyword at the start of a scene file line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    Camera,
    Resolution,
    Material,
    Sphere,
    Plane,
    PointLight,
    DirectionalLight,
    SpotLight,
    AmbientLight,
    Background,
    MaxDepth,
    Samples,
}

impl Directive {
    /// Every directive the parser understands.
    pub const ALL: [Directive; 12] = [
        Directive::Camera,
        Directive::Resolution,
        Directive::Material,
        Directive::Sphere,
        Directive::Plane,
        Directive::PointLight,
        Directive::DirectionalLight,
        Directive::SpotLight,
        Directive::AmbientLight,
        Directive::Background,
        Directive::MaxDepth,
        Directive::Samples,
    ];

    /// Keyword as written in scene files.
    pub fn keyword(self) -> &'static str {
        match self {
            Directive::Camera => "camera",
            Directive::Resolution => "resolution",
            Directive::Material => "material",
            Directive::Sphere => "sphere",
            Directive::Plane => "plane",
            Directive::PointLight => "point_light",
            Directive::DirectionalLight => "directional_light",
            Directive::SpotLight => "spot_light",
            Directive::AmbientLight => "ambient_light",
            Directive::Background => "background",
            Directive::MaxDepth => "max_depth",
            Directive::Samples => "samples",
        }
    }

    /// Look up a directive by keyword (case-sensitive).
    pub fn from_keyword(keyword: &str) -> Option<Directive> {
        Self::ALL.into_iter().find(|d| d.keyword() == keyword)
    }

    /// Number of numeric fields that follow the keyword.
    pub fn arity(self) -> usize {
        match self {
            Directive::Camera => 10,
            Directive::Resolution => 2,
            Directive::Material => 14,
            Directive::Sphere => 4,
            Directive::Plane => 6,
            Directive::PointLight => 6,
            Directive::DirectionalLight => 6,
            Directive::SpotLight => 11,
            Directive::AmbientLight => 3,
            Directive::Background => 3,
            Directive::MaxDepth => 1,
            Directive::Samples => 1,
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A parsed directive with typed fields.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Camera {
        eye: Vec3,
        target: Vec3,
        up: Vec3,
        fov: f32,
    },
    Resolution {
        width: u32,
        height: u32,
    },
    Material {
        ambient: Vec3,
        diffuse: Vec3,
        specular: Vec3,
        shininess: f32,
        reflect: Vec3,
        ior: f32,
    },
    Sphere {
        center: Vec3,
        radius: f32,
    },
    Plane {
        point: Vec3,
        normal: Vec3,
    },
    PointLight {
        position: Vec3,
        color: Vec3,
    },
    DirectionalLight {
        direction: Vec3,
        color: Vec3,
    },
    SpotLight {
        position: Vec3,
        direction: Vec3,
        color: Vec3,
        inner: f32,
        outer: f32,
    },
    AmbientLight(Vec3),
    Background(Vec3),
    MaxDepth(u32),
    Samples(u32),
}

impl Record {
    /// The directive this record was parsed from.
    pub fn directive(&self) -> Directive {
        match self {
            Record::Camera { .. } => Directive::Camera,
            Record::Resolution { .. } => Directive::Resolution,
            Record::Material { .. } => Directive::Material,
            Record::Sphere { .. } => Directive::Sphere,
            Record::Plane { .. } => Directive::Plane,
            Record::PointLight { .. } => Directive::PointLight,
            Record::DirectionalLight { .. } => Directive::DirectionalLight,
            Record::SpotLight { .. } => Directive::SpotLight,
            Record::AmbientLight(_) => Directive::AmbientLight,
            Record::Background(_) => Directive::Background,
            Record::MaxDepth(_) => Directive::MaxDepth,
            Record::Samples(_) => Directive::Samples,
        }
    }
}

/// One directive line of a scene file.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// 1-based line number in the source text
    pub line: usize,
    pub record: Record,
}
