//! Scene description parser.
//!
//! The format is line-oriented. Each line is either blank, a comment
//! (first non-space character is `#`), or a directive keyword followed by
//! whitespace-separated numbers:
//!
//! - `camera ex ey ez tx ty tz ux uy uz fov`
//! - `resolution width height`
//! - `material ar ag ab dr dg db sr sg sb shininess rr rg rb ior`
//! - `sphere cx cy cz radius`
//! - `plane px py pz nx ny nz`
//! - `point_light px py pz r g b`
//! - `directional_light dx dy dz r g b`
//! - `spot_light px py pz dx dy dz r g b inner outer`
//! - `ambient_light r g b`
//! - `background r g b`
//! - `max_depth n`
//! - `samples n`
//!
//! The parser only checks the shape of each line. Cross-line rules
//! (required directives, current material) live in the loader.

use glint_math::Vec3;
use thiserror::Error;

use super::types::{Directive, Record, Statement};

/// Errors that can occur while parsing scene text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("line {line}: unknown directive `{keyword}`")]
    UnknownDirective { line: usize, keyword: String },

    #[error("line {line}: `{directive}` expects {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        directive: Directive,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: `{directive}` field `{token}` is not a finite number")]
    InvalidNumber {
        line: usize,
        directive: Directive,
        token: String,
    },

    #[error("line {line}: `{directive}` field `{token}` is not a non-negative integer")]
    InvalidInteger {
        line: usize,
        directive: Directive,
        token: String,
    },

    #[error("missing required `{0}` directive")]
    MissingDirective(Directive),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Cursor over the numeric fields of one directive line.
struct Fields<'a> {
    line: usize,
    directive: Directive,
    tokens: std::slice::Iter<'a, &'a str>,
}

impl<'a> Fields<'a> {
    fn next_token(&mut self) -> &'a str {
        // Field count is checked before any field is read
        self.tokens.next().copied().unwrap_or("")
    }

    fn scalar(&mut self) -> ParseResult<f32> {
        let token = self.next_token();
        match token.parse::<f32>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(ParseError::InvalidNumber {
                line: self.line,
                directive: self.directive,
                token: token.to_string(),
            }),
        }
    }

    fn vec3(&mut self) -> ParseResult<Vec3> {
        Ok(Vec3::new(self.scalar()?, self.scalar()?, self.scalar()?))
    }

    /// Integers may be written as `640` or `640.0`.
    fn integer(&mut self) -> ParseResult<u32> {
        let token = self.next_token();
        let invalid = || ParseError::InvalidInteger {
            line: self.line,
            directive: self.directive,
            token: token.to_string(),
        };

        if let Ok(value) = token.parse::<u32>() {
            return Ok(value);
        }
        match token.parse::<f64>() {
            Ok(value) if value.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&value) => {
                Ok(value as u32)
            }
            Ok(_) => Err(invalid()),
            Err(_) => Err(ParseError::InvalidNumber {
                line: self.line,
                directive: self.directive,
                token: token.to_string(),
            }),
        }
    }
}

/// Scene text parser.
///
/// Borrows the source text for the duration of [`SceneParser::parse`] only;
/// statements own all of their data.
pub struct SceneParser<'a> {
    content: &'a str,
}

impl<'a> SceneParser<'a> {
    /// Create a new parser over scene text.
    pub fn new(content: &'a str) -> Self {
        Self { content }
    }

    /// Parse every directive line, failing on the first malformed one.
    pub fn parse(&self) -> ParseResult<Vec<Statement>> {
        let mut statements = Vec::new();

        for (index, raw) in self.content.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let statement = Self::parse_line(line, trimmed)?;
            log::debug!("line {}: {}", line, statement.record.directive());
            statements.push(statement);
        }

        Ok(statements)
    }

    /// Parse a single non-blank, non-comment line.
    fn parse_line(line: usize, text: &str) -> ParseResult<Statement> {
        let mut words = text.split_whitespace();
        let keyword = words.next().unwrap_or("");
        let directive =
            Directive::from_keyword(keyword).ok_or_else(|| ParseError::UnknownDirective {
                line,
                keyword: keyword.to_string(),
            })?;

        let tokens: Vec<&str> = words.collect();
        if tokens.len() != directive.arity() {
            return Err(ParseError::FieldCount {
                line,
                directive,
                expected: directive.arity(),
                found: tokens.len(),
            });
        }

        let mut f = Fields {
            line,
            directive,
            tokens: tokens.iter(),
        };

        let record = match directive {
            Directive::Camera => Record::Camera {
                eye: f.vec3()?,
                target: f.vec3()?,
                up: f.vec3()?,
                fov: f.scalar()?,
            },
            Directive::Resolution => Record::Resolution {
                width: f.integer()?,
                height: f.integer()?,
            },
            Directive::Material => Record::Material {
                ambient: f.vec3()?,
                diffuse: f.vec3()?,
                specular: f.vec3()?,
                shininess: f.scalar()?,
                reflect: f.vec3()?,
                ior: f.scalar()?,
            },
            Directive::Sphere => Record::Sphere {
                center: f.vec3()?,
                radius: f.scalar()?,
            },
            Directive::Plane => Record::Plane {
                point: f.vec3()?,
                normal: f.vec3()?,
            },
            Directive::PointLight => Record::PointLight {
                position: f.vec3()?,
                color: f.vec3()?,
            },
            Directive::DirectionalLight => Record::DirectionalLight {
                direction: f.vec3()?,
                color: f.vec3()?,
            },
            Directive::SpotLight => Record::SpotLight {
                position: f.vec3()?,
                direction: f.vec3()?,
                color: f.vec3()?,
                inner: f.scalar()?,
                outer: f.scalar()?,
            },
            Directive::AmbientLight => Record::AmbientLight(f.vec3()?),
            Directive::Background => Record::Background(f.vec3()?),
            Directive::MaxDepth => Record::MaxDepth(f.integer()?),
            Directive::Samples => Record::Samples(f.integer()?),
        };

        Ok(Statement { line, record })
    }
}

/// Parse scene text into a list of statements.
pub fn parse_scene(content: &str) -> ParseResult<Vec<Statement>> {
    SceneParser::new(content).parse()
}
