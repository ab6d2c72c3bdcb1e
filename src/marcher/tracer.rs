//! Sphere tracing.
//!
//! A ray is advanced by the field value at its origin until the value drops
//! below `epsilon`. The field is assumed to be Lipschitz-1, so each step is
//! safe; fields that are not get cut off by `max_steps`. A non-finite field
//! value ends the march as [`Outcome::Exhausted`] without shading.

use crate::marcher::{Renderable, Shader};
use crate::math::{abs, Color, Ray};

pub const EPS: f32 = 1e-4;
pub const BACKGROUND_DISTANCE: f32 = 1000.;
pub const MAX_STEPS: u32 = 128;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarchSettings {
    pub epsilon: f32,
    /// Rays whose origin gets this far from the world origin hit the sky.
    pub background_distance: f32,
    pub max_steps: u32,
}

impl Default for MarchSettings {
    fn default() -> Self {
        MarchSettings {
            epsilon: EPS,
            background_distance: BACKGROUND_DISTANCE,
            max_steps: MAX_STEPS,
        }
    }
}

pub enum Outcome<'a> {
    Hit {
        ray: Ray,
        shader: &'a dyn Shader,
        steps: u32,
    },
    Escaped {
        ray: Ray,
        steps: u32,
    },
    Exhausted {
        ray: Ray,
    },
}

pub fn march<'a>(object: &'a dyn Renderable, mut ray: Ray, settings: &MarchSettings) -> Outcome<'a> {
    let (mut distance, mut shader) = object.sdf(&ray.x);
    let mut steps = 0;
    while distance.is_nan() || distance.abs() > settings.epsilon {
        if steps >= settings.max_steps || !distance.is_finite() {
            return Outcome::Exhausted { ray };
        }
        ray.x = ray.at(distance);
        steps += 1;
        (distance, shader) = object.sdf(&ray.x);
        if abs(&ray.x) >= settings.background_distance {
            return Outcome::Escaped { ray, steps };
        }
    }
    Outcome::Hit { ray, shader, steps }
}

pub fn background(ray: &Ray) -> Color {
    let y = ray.d.y;
    if y < 0. {
        Color::new(0.1, 0.4, 0.1, 1.)
    } else {
        Color::new(2. * y, 4. * y, 1., 1.)
    }
}

pub fn trace_with(object: &dyn Renderable, ray: Ray, settings: &MarchSettings) -> Color {
    match march(object, ray, settings) {
        Outcome::Hit { ray, shader, .. } => shader.shade(&ray, object),
        Outcome::Escaped { ray, .. } | Outcome::Exhausted { ray } => background(&ray),
    }
}

pub fn trace(object: &dyn Renderable, ray: Ray) -> Color {
    trace_with(object, ray, &MarchSettings::default())
}
