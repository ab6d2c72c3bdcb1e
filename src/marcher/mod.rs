use crate::math::{v, V3, O};
use std::sync::Arc;

pub mod ops;
pub mod primitives;
pub mod shader;
pub mod tracer;
pub mod transforms;

pub use ops::{intersection_all, union_all, Intersection, Subtraction, Union};
pub use primitives::{Cube, Plane, Sphere, Torus};
pub use shader::{ConstantColor, Lambertian, Shader};
pub use tracer::{march, trace, trace_with, MarchSettings, Outcome};
pub use transforms::{RotationX, RotationY, Translation};

/// Shared handle to a node of the scene graph. One node may have many parents.
pub type Node = Arc<dyn Renderable>;

/// Distance to the nearest surface together with that surface's shader.
pub type Sample<'a> = (f32, &'a dyn Shader);

const NORMAL_STEP: f32 = 0.001;

/// A signed distance field: negative inside, positive outside.
///
/// Evaluation never mutates, so a tree can be traced from many threads at
/// once. The only mutators are the explicit setters on the transform nodes,
/// which need `&mut` access.
pub trait Renderable: Send + Sync {
    fn sdf(&self, x: &V3) -> Sample<'_>;

    fn distance(&self, x: &V3) -> f32 {
        self.sdf(x).0
    }

    /// Central difference gradient of the field, normalized.
    fn normal(&self, x: &V3) -> V3 {
        let h = NORMAL_STEP;
        let dx = self.distance(&v(x.x + h, x.y, x.z)) - self.distance(&v(x.x - h, x.y, x.z));
        let dy = self.distance(&v(x.x, x.y + h, x.z)) - self.distance(&v(x.x, x.y - h, x.z));
        let dz = self.distance(&v(x.x, x.y, x.z + h)) - self.distance(&v(x.x, x.y, x.z - h));
        crate::math::normalize(&v(dx, dy, dz))
    }

    /// Direction towards the light and its color.
    fn sample_directional_light(&self) -> (V3, V3) {
        (v(-1., 1., 1.), v(1., 1., 1.))
    }

    fn center(&self) -> V3 {
        O
    }
}

impl<T: Renderable + ?Sized> Renderable for Arc<T> {
    fn sdf(&self, x: &V3) -> Sample<'_> {
        (**self).sdf(x)
    }

    fn distance(&self, x: &V3) -> f32 {
        (**self).distance(x)
    }

    fn normal(&self, x: &V3) -> V3 {
        (**self).normal(x)
    }

    fn sample_directional_light(&self) -> (V3, V3) {
        (**self).sample_directional_light()
    }

    fn center(&self) -> V3 {
        (**self).center()
    }
}
