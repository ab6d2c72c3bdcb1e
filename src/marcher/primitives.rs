use crate::marcher::{Renderable, Sample, Shader};
use crate::math::{abs, dot, sub, try_normalize, v, V3};
use crate::SdfError;
use std::sync::Arc;

pub struct Sphere {
    pub radius: f32,
    pub shader: Arc<dyn Shader>,
}

/// Axis aligned cube centered on the origin. `a` is the full edge length.
pub struct Cube {
    pub a: f32,
    pub shader: Arc<dyn Shader>,
}

pub struct Torus {
    axis: V3,
    pub big_radius: f32,
    pub small_radius: f32,
    pub shader: Arc<dyn Shader>,
}

/// Half space below the plane through the origin with the given normal.
pub struct Plane {
    axis: V3,
    pub shader: Arc<dyn Shader>,
}

impl Sphere {
    pub fn new(radius: f32, shader: Arc<dyn Shader>) -> Self {
        Sphere { radius, shader }
    }
}

impl Cube {
    pub fn new(a: f32, shader: Arc<dyn Shader>) -> Self {
        Cube { a, shader }
    }
}

fn unit_axis(axis: V3) -> Result<V3, SdfError> {
    try_normalize(&axis).ok_or(SdfError::DegenerateAxis(axis))
}

impl Torus {
    pub fn new(
        axis: V3,
        big_radius: f32,
        small_radius: f32,
        shader: Arc<dyn Shader>,
    ) -> Result<Self, SdfError> {
        Ok(Torus {
            axis: unit_axis(axis)?,
            big_radius,
            small_radius,
            shader,
        })
    }

    pub fn axis(&self) -> V3 {
        self.axis
    }
}

impl Plane {
    pub fn new(axis: V3, shader: Arc<dyn Shader>) -> Result<Self, SdfError> {
        Ok(Plane {
            axis: unit_axis(axis)?,
            shader,
        })
    }

    pub fn axis(&self) -> V3 {
        self.axis
    }
}

impl Renderable for Sphere {
    fn sdf(&self, x: &V3) -> Sample<'_> {
        (abs(x) - self.radius, self.shader.as_ref())
    }
}

impl Renderable for Cube {
    fn sdf(&self, x: &V3) -> Sample<'_> {
        let h = self.a / 2.;
        let d = v(x.x.abs() - h, x.y.abs() - h, x.z.abs() - h);
        let inner = d.x.max(d.y).max(d.z).min(0.);
        let outer = abs(&v(d.x.max(0.), d.y.max(0.), d.z.max(0.)));
        (inner + outer, self.shader.as_ref())
    }
}

impl Renderable for Torus {
    fn sdf(&self, x: &V3) -> Sample<'_> {
        let height = dot(x, &self.axis);
        let plane_proj = sub(x, &(height * self.axis));
        let ring = abs(&plane_proj) - self.big_radius;
        (
            (ring * ring + height * height).sqrt() - self.small_radius,
            self.shader.as_ref(),
        )
    }
}

impl Renderable for Plane {
    fn sdf(&self, x: &V3) -> Sample<'_> {
        (dot(x, &self.axis), self.shader.as_ref())
    }
}
