use crate::SdfError;
use std::ops;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct V3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// RGBA color. Alpha is only used for blending, everything else treats it as opaque.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color { r, g, b, a }
    }

    pub fn rgb(&self) -> V3 {
        v(self.r, self.g, self.b)
    }

    pub fn to_rgb8(&self) -> [u8; 3] {
        // float -> int casts saturate, NaN becomes 0
        [
            (self.r * 255.) as u8,
            (self.g * 255.) as u8,
            (self.b * 255.) as u8,
        ]
    }
}

pub fn alpha_blend(c1: Color, c2: Color) -> Color {
    let k = 1. - c2.a;
    Color {
        r: k * c1.r + c2.a * c2.r,
        g: k * c1.g + c2.a * c2.g,
        b: k * c1.b + c2.a * c2.b,
        a: k * c1.a + c2.a * c2.a,
    }
}

/// A half line. `d` is always unit length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub(crate) x: V3,
    pub(crate) d: V3,
}

/// `x / |x|`, or `None` when `x` has no usable length.
pub fn try_normalize(x: &V3) -> Option<V3> {
    let len = abs(x);
    if len > 0. && len.is_finite() {
        Some(mul(1. / len, x))
    } else {
        None
    }
}

impl Ray {
    pub fn new(origin: V3, direction: V3) -> Result<Ray, SdfError> {
        let d = try_normalize(&direction).ok_or(SdfError::DegenerateDirection(direction))?;
        Ok(Ray { x: origin, d })
    }

    pub fn origin(&self) -> V3 {
        self.x
    }

    pub fn direction(&self) -> V3 {
        self.d
    }

    pub fn at(&self, t: f32) -> V3 {
        self.x + t * self.d
    }
}

pub fn sub(x: &V3, y: &V3) -> V3 {
    V3 {
        x: x.x - y.x,
        y: x.y - y.y,
        z: x.z - y.z,
    }
}

pub fn abs2(x: &V3) -> f32 {
    x.x * x.x + x.y * x.y + x.z * x.z
}

pub fn abs(x: &V3) -> f32 {
    abs2(x).sqrt()
}
pub fn v(x: f32, y: f32, z: f32) -> V3 {
    V3 { x, y, z }
}
pub fn mul(scalar: f32, x: &V3) -> V3 {
    V3 {
        x: x.x * scalar,
        y: x.y * scalar,
        z: x.z * scalar,
    }
}

pub fn add(x: &V3, y: &V3) -> V3 {
    V3 {
        x: x.x + y.x,
        y: x.y + y.y,
        z: x.z + y.z,
    }
}

/// Componentwise product.
pub fn hadamard(x: &V3, y: &V3) -> V3 {
    v(x.x * y.x, x.y * y.y, x.z * y.z)
}

pub fn dist(x: &V3, y: &V3) -> f32 {
    abs(&sub(x, y))
}

pub fn normalize(x: &V3) -> V3 {
    mul(1. / abs(x), x)
}

pub fn dot(x: &V3, y: &V3) -> f32 {
    x.x * y.x + x.y * y.y + x.z * y.z
}

impl ops::Add<V3> for V3 {
    type Output = V3;

    fn add(self, rhs: V3) -> V3 {
        add(&self, &rhs)
    }
}

impl ops::Sub<V3> for V3 {
    type Output = V3;

    fn sub(self, rhs: V3) -> V3 {
        sub(&self, &rhs)
    }
}

impl ops::Neg for V3 {
    type Output = V3;

    fn neg(self) -> V3 {
        mul(-1., &self)
    }
}

impl ops::Mul<V3> for f32 {
    type Output = V3;

    fn mul(self, rhs: V3) -> Self::Output {
        mul(self, &rhs)
    }
}

pub const B2: V3 = V3 {
    x: 0.,
    y: 1.,
    z: 0.,
};

pub const O: V3 = V3 {
    x: 0.,
    y: 0.,
    z: 0.,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_direction_is_normalized() {
        let r = Ray::new(O, v(0., 3., -4.)).unwrap();
        assert!((abs(&r.d) - 1.).abs() < 1e-6);
        assert!((r.d.y - 0.6).abs() < 1e-6);
        assert!((r.d.z + 0.8).abs() < 1e-6);
    }

    #[test]
    fn ray_rejects_zero_direction() {
        assert!(matches!(
            Ray::new(B2, O),
            Err(SdfError::DegenerateDirection(_))
        ));
        assert!(Ray::new(O, v(f32::NAN, 0., 1.)).is_err());
        assert!(Ray::new(O, v(f32::INFINITY, 0., 0.)).is_err());
    }

    #[test]
    fn try_normalize_rejects_zero_length() {
        assert_eq!(try_normalize(&O), None);
        assert_eq!(try_normalize(&v(0., 0., -2.)), Some(v(0., 0., -1.)));
    }

    #[test]
    fn alpha_blend_weights_by_top_alpha() {
        let bottom = Color::new(1., 0., 0., 1.);
        let top = Color::new(0., 0., 1., 0.25);
        let c = alpha_blend(bottom, top);
        assert!((c.r - 0.75).abs() < 1e-6);
        assert!((c.b - 0.25).abs() < 1e-6);
        assert_eq!(alpha_blend(bottom, Color::new(0., 1., 0., 1.)).g, 1.);
    }

    #[test]
    fn rgb8_saturates() {
        assert_eq!(Color::new(2., -1., 0.5, 1.).to_rgb8(), [255, 0, 127]);
        assert_eq!(Color::new(f32::NAN, 1., 0., 1.).to_rgb8(), [0, 255, 0]);
    }
}
