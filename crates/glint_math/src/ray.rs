use crate::Vec3;

/// A ray in 3D space with origin, unit direction, and bounce depth.
///
/// Camera rays start at depth 0; every reflected or refracted ray spawned
/// from a hit is one level deeper. The depth travels with the ray so the
/// recursion bound does not depend on the call stack.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub depth: u32,
}

impl Ray {
    /// Create a new ray. The direction is normalized.
    pub fn new(origin: Vec3, direction: Vec3, depth: u32) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            depth,
        }
    }

    /// Create a primary (depth 0) ray.
    pub fn primary(origin: Vec3, direction: Vec3) -> Self {
        Self::new(origin, direction, 0)
    }

    /// Spawn a secondary ray one bounce deeper than this one.
    pub fn bounce(&self, origin: Vec3, direction: Vec3) -> Self {
        Self::new(origin, direction, self.depth + 1)
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
