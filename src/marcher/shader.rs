use crate::marcher::Renderable;
use crate::math::{dot, hadamard, Color, Ray};

pub trait Shader: Send + Sync {
    /// Color of the surface `ray` converged on. `object` is the whole traced
    /// scene, so normals see every transform above the hit primitive.
    fn shade(&self, ray: &Ray, object: &dyn Renderable) -> Color;
}

/// Flat color, handy for debugging silhouettes.
#[derive(Clone, Copy, Debug)]
pub struct ConstantColor {
    pub color: Color,
}

impl ConstantColor {
    pub fn new(color: Color) -> Self {
        ConstantColor { color }
    }
}

impl Shader for ConstantColor {
    fn shade(&self, _ray: &Ray, _object: &dyn Renderable) -> Color {
        self.color
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Lambertian {
    pub color: Color,
}

impl Lambertian {
    pub fn new(color: Color) -> Self {
        Lambertian { color }
    }
}

impl Shader for Lambertian {
    fn shade(&self, ray: &Ray, object: &dyn Renderable) -> Color {
        let (light_dir, light_color) = object.sample_directional_light();
        let normal = object.normal(&ray.x);
        let diffuse = dot(&normal, &light_dir).clamp(0., 1.);
        let rgb = diffuse * hadamard(&self.color.rgb(), &light_color);
        Color::new(rgb.x, rgb.y, rgb.z, self.color.a)
    }
}
