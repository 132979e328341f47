// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// Reflect `v` about the unit normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with unit normal `n`
/// (facing against `uv`) using the ratio of refractive indices.
///
/// Returns `None` on total internal reflection.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Option<Vec3> {
    let cos_theta = (-uv).dot(n).min(1.0);
    let sin2_theta = (1.0 - cos_theta * cos_theta).max(0.0);
    if etai_over_etat * etai_over_etat * sin2_theta > 1.0 {
        return None;
    }
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    Some(r_out_perp + r_out_parallel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        let c = a + b;
        assert_eq!(c, Vec3::new(5.0, 7.0, 9.0));
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        let r = reflect(v, Vec3::Y);
        assert_eq!(r, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_straight_through() {
        // Head-on rays are not bent
        let d = Vec3::new(0.0, -1.0, 0.0);
        let r = refract(d, Vec3::Y, 1.0 / 1.5).unwrap();
        assert!((r - d).length() < 1e-5);
    }

    #[test]
    fn test_refract_bends_toward_normal() {
        let d = Vec3::new(1.0, -1.0, 0.0).normalize();
        let r = refract(d, Vec3::Y, 1.0 / 1.5).unwrap();

        // Snell: sin(theta_t) = sin(theta_i) / 1.5
        let sin_i = d.x;
        assert!((r.x - sin_i / 1.5).abs() < 1e-5);
        assert!((r.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_refract_total_internal_reflection() {
        // Leaving glass at a grazing angle
        let d = Vec3::new(0.9, -0.1, 0.0).normalize();
        assert!(refract(d, Vec3::Y, 1.5).is_none());
    }
}
