//! Whitted-style recursive shading.
//!
//! Local illumination is Phong (ambient, Lambertian diffuse, specular
//! highlight) with hard shadows. Mirror reflection and Snell refraction
//! spawn secondary rays until the ray depth reaches the scene's
//! `max_depth`.

use glint_core::{Color, Light, Material, Scene, MAX_DEPTH_LIMIT};
use glint_math::{reflect, refract, Interval, Ray, Vec3};

use crate::hittable::{HitRecord, Hittable};
use crate::light::{sample_light, LightSample};

/// Minimum hit distance, and the offset applied to secondary ray origins
/// to keep them off the surface they start from.
pub const EPSILON: f32 = 1e-3;

/// Schlick's approximation for reflectance
fn reflectance(cosine: f32, eta: f32) -> f32 {
    let r0 = ((1.0 - eta) / (1.0 + eta)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Traces rays against a loaded scene.
///
/// Borrows the scene immutably, so one tracer can be shared across
/// rendering threads.
pub struct Tracer<'s> {
    scene: &'s Scene,
    max_depth: u32,
}

impl<'s> Tracer<'s> {
    /// Create a tracer using the scene's own bounce limit.
    pub fn new(scene: &'s Scene) -> Self {
        Self {
            scene,
            max_depth: 0,
        }
        .with_max_depth(scene.settings().max_depth)
    }

    /// Override the bounce limit, capped at [`MAX_DEPTH_LIMIT`].
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth.min(MAX_DEPTH_LIMIT);
        self
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Color seen along `ray`.
    pub fn trace(&self, ray: &Ray) -> Color {
        match self
            .scene
            .primitives()
            .hit(ray, Interval::beyond(EPSILON))
        {
            Some(rec) => self.shade(ray, &rec),
            None => self.scene.background(),
        }
    }

    fn shade(&self, ray: &Ray, rec: &HitRecord) -> Color {
        let material = self.scene.material(rec.material);

        let mut color = material.ambient * self.scene.ambient();
        for light in self.scene.lights() {
            color += self.direct(ray, rec, material, light);
        }

        if ray.depth >= self.max_depth {
            return color;
        }

        if material.is_reflective() {
            let reflected = ray.bounce(
                rec.p + rec.normal * EPSILON,
                reflect(ray.direction, rec.normal),
            );
            color += material.reflect * self.trace(&reflected);
        }

        if material.is_refractive() {
            color += self.transmitted(ray, rec, material);
        }

        color
    }

    /// Diffuse and specular contribution of one light.
    fn direct(&self, ray: &Ray, rec: &HitRecord, material: &Material, light: &Light) -> Color {
        let Some(LightSample {
            direction,
            distance,
            color,
        }) = sample_light(light, rec.p)
        else {
            return Color::ZERO;
        };

        let n_dot_l = rec.normal.dot(direction);
        if n_dot_l <= 0.0 {
            return Color::ZERO;
        }

        let visibility = self.shadow_transmittance(rec.p + rec.normal * EPSILON, direction, distance);
        if visibility == Color::ZERO {
            return Color::ZERO;
        }

        let diffuse = material.diffuse * n_dot_l;

        let r = reflect(-direction, rec.normal);
        let r_dot_v = r.dot(-ray.direction).max(0.0);
        let specular = material.specular * r_dot_v.powf(material.shininess);

        (diffuse + specular) * color * visibility
    }

    /// Fraction of light that survives the trip from `origin` to a light
    /// `distance` away. Opaque occluders block it; refractive ones let
    /// through their transmission.
    fn shadow_transmittance(&self, origin: Vec3, direction: Vec3, distance: f32) -> Color {
        let shadow_ray = Ray::primary(origin, direction);
        let range = Interval::new(EPSILON, distance);

        let mut transmittance = Color::ONE;
        for primitive in self.scene.primitives() {
            if primitive.hit(&shadow_ray, range).is_none() {
                continue;
            }
            let occluder = self.scene.material(primitive.material());
            if !occluder.is_refractive() {
                return Color::ZERO;
            }
            transmittance *= occluder.transmission();
        }

        transmittance
    }

    /// Light refracted through the surface, or internally reflected when
    /// refraction is impossible.
    fn transmitted(&self, ray: &Ray, rec: &HitRecord, material: &Material) -> Color {
        let weight = material.transmission();
        if weight == Color::ZERO {
            return Color::ZERO;
        }

        let eta = if rec.front_face {
            1.0 / material.ior
        } else {
            material.ior
        };

        match refract(ray.direction, rec.normal, eta) {
            Some(direction) => {
                let cos_theta = (-ray.direction).dot(rec.normal).min(1.0);
                let refracted = ray.bounce(rec.p - rec.normal * EPSILON, direction);
                weight * (1.0 - reflectance(cos_theta, eta)) * self.trace(&refracted)
            }
            None => {
                log::trace!("total internal reflection at depth {}", ray.depth);
                let reflected = ray.bounce(
                    rec.p + rec.normal * EPSILON,
                    reflect(ray.direction, rec.normal),
                );
                weight * self.trace(&reflected)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::load_scene;

    const HEADER: &str = "camera 0 0 5  0 0 0  0 1 0  45\nresolution 4 4\n";

    fn scene(body: &str) -> Scene {
        load_scene(&format!("{}{}", HEADER, body)).unwrap()
    }

    fn assert_color_near(actual: Color, expected: Color) {
        assert!(
            (actual - expected).abs().max_element() < 1e-4,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    fn toward_origin() -> Ray {
        Ray::primary(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z)
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = scene("background 0.2 0.4 0.6\n");
        let color = Tracer::new(&scene).trace(&toward_origin());
        assert_eq!(color, Color::new(0.2, 0.4, 0.6));
    }

    #[test]
    fn test_unlit_sphere_is_black() {
        let scene = scene(
            "background 1 1 1\n\
             material 1 1 1  1 1 1  1 1 1  10  0 0 0  1\n\
             sphere 0 0 0 1\n",
        );
        let color = Tracer::new(&scene).trace(&toward_origin());
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_ambient_term() {
        let scene = scene(
            "ambient_light 0.5 0.5 0.5\n\
             material 0.2 0.4 0.8  0 0 0  0 0 0  1  0 0 0  1\n\
             sphere 0 0 0 1\n",
        );
        let color = Tracer::new(&scene).trace(&toward_origin());
        assert_color_near(color, Color::new(0.1, 0.2, 0.4));
    }

    #[test]
    fn test_diffuse_facing_light() {
        let scene = scene(
            "material 0 0 0  0.5 0.5 0.5  0 0 0  1  0 0 0  1\n\
             sphere 0 0 0 1\n\
             point_light 0 0 10  2 2 2\n",
        );
        // n.l = 1 and the light is an unclamped intensity
        let color = Tracer::new(&scene).trace(&toward_origin());
        assert_color_near(color, Color::ONE);
    }

    #[test]
    fn test_light_behind_surface_contributes_nothing() {
        let scene = scene(
            "material 0 0 0  1 1 1  1 1 1  10  0 0 0  1\n\
             sphere 0 0 0 1\n\
             point_light 0 0 -10  1 1 1\n",
        );
        let color = Tracer::new(&scene).trace(&toward_origin());
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_specular_highlight() {
        let scene = scene(
            "material 0 0 0  0 0 0  1 1 1  50  0 0 0  1\n\
             sphere 0 0 0 1\n\
             point_light 0 0 10  1 1 1\n",
        );
        // Light, eye and normal are aligned, so r.v = 1
        let color = Tracer::new(&scene).trace(&toward_origin());
        assert_color_near(color, Color::ONE);
    }

    const LIT: &str = "ambient_light 0.5 0.5 0.5\n\
                       material 0.2 0.2 0.2  0.8 0.8 0.8  0.5 0.5 0.5  10  0 0 0  1\n\
                       sphere 0 0 0 1\n\
                       point_light 10 0 10  1 1 1\n";

    #[test]
    fn test_shadow_zeroes_direct_light() {
        let lit = scene(LIT);
        let lit_color = Tracer::new(&lit).trace(&toward_origin());
        assert!(lit_color.min_element() > 0.1 + 1e-3);

        // Occluder on the segment between (0, 0, 1) and the light
        let shadowed = scene(&format!("{}sphere 5 0 5.5 1\n", LIT));
        let shadowed_color = Tracer::new(&shadowed).trace(&toward_origin());
        assert_color_near(shadowed_color, Color::splat(0.1));
    }

    #[test]
    fn test_clear_glass_does_not_cast_shadow() {
        let lit = scene(LIT);
        let glass = scene(&format!(
            "{}material 0 0 0  0 0 0  0 0 0  0  0 0 0  1.5\nsphere 5 0 5.5 1\n",
            LIT
        ));

        let expected = Tracer::new(&lit).trace(&toward_origin());
        let actual = Tracer::new(&glass).trace(&toward_origin());
        assert_color_near(actual, expected);
    }

    #[test]
    fn test_tinted_glass_casts_partial_shadow() {
        let lit = scene(LIT);
        let tinted = scene(&format!(
            "{}material 0 0 0  0 0 0  0 0 0  0  0.25 0.25 0.25  1.5\nsphere 5 0 5.5 1\n",
            LIT
        ));

        // At (0, 0, 1): n.l = 9 / sqrt(181), diffuse 0.8 * 0.66896 = 0.53517,
        // specular 0.5 * 0.66896^10 = 0.00897. The glass passes 1 - 0.25.
        let expected = 0.1 + 0.75 * (0.53517 + 0.00897);
        let color = Tracer::new(&tinted).trace(&toward_origin());
        assert!((color - Color::splat(expected)).abs().max_element() < 1e-3);

        let unshadowed = Tracer::new(&lit).trace(&toward_origin());
        assert_color_near(color, Color::splat(0.1) + (unshadowed - Color::splat(0.1)) * 0.75);
    }

    #[test]
    fn test_max_depth_zero_disables_reflection() {
        let body = |reflect: &str, depth: u32| {
            format!(
                "background 0.2 0.4 0.6\n\
                 max_depth {}\n\
                 material 0.1 0.1 0.1  0.5 0.5 0.5  0 0 0  1  {}  1\n\
                 sphere 0 0 0 1\n\
                 point_light 0 5 5  1 1 1\n",
                depth, reflect
            )
        };

        let mirror = scene(&body("1 1 1", 0));
        let matte = scene(&body("0 0 0", 0));
        let mirror_color = Tracer::new(&mirror).trace(&toward_origin());
        let matte_color = Tracer::new(&matte).trace(&toward_origin());
        assert_eq!(mirror_color, matte_color);

        // One bounce straight back out picks up the background
        let mirror = scene(&body("1 1 1", 1));
        let bounced = Tracer::new(&mirror).trace(&toward_origin());
        assert_color_near(bounced, matte_color + Color::new(0.2, 0.4, 0.6));
    }

    #[test]
    fn test_with_max_depth_overrides_scene() {
        let scene = scene("max_depth 7\n");
        assert_eq!(Tracer::new(&scene).max_depth(), 7);
        assert_eq!(Tracer::new(&scene).with_max_depth(2).max_depth(), 2);
        assert_eq!(
            Tracer::new(&scene).with_max_depth(1_000_000).max_depth(),
            MAX_DEPTH_LIMIT
        );
    }

    #[test]
    fn test_facing_mirrors_stop_at_depth_limit() {
        // Two parallel mirrors with the eye between them
        let scene = load_scene(
            "camera 0 0 0  0 0 -1  0 1 0  10\n\
             resolution 1 1\n\
             max_depth 64\n\
             background 1 1 1\n\
             material 0.01 0.01 0.01  0 0 0  0 0 0  0  1 1 1  1\n\
             plane 0 0 -1  0 0 1\n\
             plane 0 0 1  0 0 -1\n\
             ambient_light 1 1 1\n",
        )
        .unwrap();

        // Every bounce adds the ambient term and the ray never escapes
        let color = Tracer::new(&scene)
            .with_max_depth(u32::MAX)
            .trace(&Ray::primary(Vec3::ZERO, Vec3::NEG_Z));
        assert_color_near(color, Color::splat(0.01 * (MAX_DEPTH_LIMIT + 1) as f32));
    }

    #[test]
    fn test_reflective_glass_splits_energy() {
        let scene = scene(
            "background 1 1 1\n\
             material 0 0 0  0 0 0  0 0 0  0  0.3 0.3 0.3  1.5\n\
             sphere 0 0 0 1\n",
        );

        // Entry: 0.3 mirrored straight back to the background, plus
        // (1 - 0.3) * (1 - 0.04) refracted inward. Exit: the internal
        // mirror ray runs out of depth, the refracted ray again keeps
        // 0.7 * 0.96 and reaches the background.
        let through = 0.7 * 0.96;
        let color = Tracer::new(&scene).with_max_depth(2).trace(&toward_origin());
        assert_color_near(color, Color::splat(0.3 + through * through));
    }

    #[test]
    fn test_refraction_through_sphere() {
        let glass = "background 1 1 1\n\
                     material 0 0 0  0 0 0  0 0 0  0  0 0 0  1.5\n\
                     sphere 0 0 0 1\n";
        let scene = scene(glass);

        // Head-on through both surfaces, losing Schlick's r0 = 0.04 at each
        let color = Tracer::new(&scene).with_max_depth(2).trace(&toward_origin());
        assert_color_near(color, Color::splat(0.96 * 0.96));

        // Not enough depth to leave the sphere again
        let color = Tracer::new(&scene).with_max_depth(1).trace(&toward_origin());
        assert_color_near(color, Color::ZERO);
    }

    #[test]
    fn test_total_internal_reflection() {
        let scene = scene(
            "ambient_light 1 1 1\n\
             material 0.1 0.1 0.1  0 0 0  0 0 0  0  0 0 0  1.5\n\
             sphere 0 0 0 1\n",
        );

        // Steep enough inside the sphere that every bounce reflects
        // internally; each hit adds its ambient term.
        let ray = Ray::primary(Vec3::new(0.0, 0.9, 0.0), Vec3::Z);
        let color = Tracer::new(&scene).with_max_depth(2).trace(&ray);
        assert_color_near(color, Color::splat(0.3));
    }

    #[test]
    fn test_directional_light_ignores_distance() {
        let scene = scene(
            "material 0 0 0  1 1 1  0 0 0  1  0 0 0  1\n\
             plane 0 0 0  0 1 0\n\
             directional_light 0 -1 0  1 1 1\n",
        );
        let tracer = Tracer::new(&scene);

        let near = tracer.trace(&Ray::primary(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y));
        let far = tracer.trace(&Ray::primary(Vec3::new(500.0, 5.0, -500.0), Vec3::NEG_Y));
        assert_color_near(near, Color::ONE);
        assert_color_near(far, near);
    }

    #[test]
    fn test_spot_light_cone() {
        let scene = scene(
            "material 0 0 0  1 1 1  0 0 0  1  0 0 0  1\n\
             plane 0 0 0  0 1 0\n\
             spot_light 0 10 0  0 -1 0  1 1 1  10 30\n",
        );
        let tracer = Tracer::new(&scene);

        let center = tracer.trace(&Ray::primary(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y));
        assert_color_near(center, Color::ONE);

        // 45 degrees off the cone axis
        let outside = tracer.trace(&Ray::primary(Vec3::new(10.0, 5.0, 0.0), Vec3::NEG_Y));
        assert_eq!(outside, Color::ZERO);
    }
}
