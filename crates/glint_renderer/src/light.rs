//! Light sampling for direct illumination.
//!
//! Light colors are unclamped intensities. There is no distance
//! attenuation; spot lights fade only with angle.

use glint_core::{Color, Light, SpotLight};
use glint_math::Vec3;

/// Illumination arriving at a surface point from one light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSample {
    /// Unit vector from the point toward the light
    pub direction: Vec3,
    /// Distance to the light (infinite for directional lights)
    pub distance: f32,
    /// Incoming color after cone falloff
    pub color: Color,
}

/// Sample `light` as seen from `point`.
///
/// Returns `None` when the light cannot reach the point at all (outside a
/// spot cone, or sitting exactly on the point).
pub fn sample_light(light: &Light, point: Vec3) -> Option<LightSample> {
    match light {
        Light::Point(l) => toward(l.position, point, l.color),
        Light::Directional(l) => Some(LightSample {
            direction: -l.direction,
            distance: f32::INFINITY,
            color: l.color,
        }),
        Light::Spot(l) => {
            let falloff = spot_falloff(l, point);
            if falloff <= 0.0 {
                return None;
            }
            toward(l.position, point, l.color * falloff)
        }
    }
}

fn toward(position: Vec3, point: Vec3, color: Color) -> Option<LightSample> {
    let to_light = position - point;
    let distance = to_light.length();
    if distance <= f32::EPSILON {
        return None;
    }
    Some(LightSample {
        direction: to_light / distance,
        distance,
        color,
    })
}

/// 1 inside the inner cone, 0 outside the outer cone, linear in between.
pub fn spot_falloff(light: &SpotLight, point: Vec3) -> f32 {
    let to_point = point - light.position;
    if to_point.length_squared() <= f32::EPSILON {
        return 0.0;
    }

    let cos_angle = light.direction.dot(to_point.normalize()).clamp(-1.0, 1.0);
    let angle = cos_angle.acos().to_degrees();

    if angle <= light.inner_angle {
        1.0
    } else if angle >= light.outer_angle {
        0.0
    } else {
        (light.outer_angle - angle) / (light.outer_angle - light.inner_angle)
    }
}
