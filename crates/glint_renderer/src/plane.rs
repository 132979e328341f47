//! Ray/plane intersection.

use crate::hittable::{HitRecord, Hittable};
use glint_core::Plane;
use glint_math::{Interval, Ray};

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let denom = ray.direction.dot(self.normal);
        if denom.abs() < 1e-8 {
            // Parallel to the plane
            return None;
        }

        let t = (self.point - ray.origin).dot(self.normal) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        Some(HitRecord::new(ray, t, self.normal, self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::Vec3;

    fn floor() -> Plane {
        Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y, 0).unwrap()
    }

    #[test]
    fn test_plane_hit_from_above() {
        let ray = Ray::primary(Vec3::ZERO, Vec3::NEG_Y);
        let rec = floor().hit(&ray, Interval::beyond(0.001)).unwrap();

        assert!((rec.t - 1.0).abs() < 1e-6);
        assert_eq!(rec.normal, Vec3::Y);
        assert!(rec.front_face);
    }

    #[test]
    fn test_plane_hit_from_below() {
        let ray = Ray::primary(Vec3::new(0.0, -3.0, 0.0), Vec3::Y);
        let rec = floor().hit(&ray, Interval::beyond(0.001)).unwrap();

        assert!((rec.t - 2.0).abs() < 1e-6);
        assert_eq!(rec.normal, Vec3::NEG_Y);
        assert!(!rec.front_face);
    }

    #[test]
    fn test_plane_parallel_and_behind() {
        let parallel = Ray::primary(Vec3::ZERO, Vec3::X);
        assert!(floor().hit(&parallel, Interval::beyond(0.001)).is_none());

        let away = Ray::primary(Vec3::ZERO, Vec3::Y);
        assert!(floor().hit(&away, Interval::beyond(0.001)).is_none());
    }
}
