use crate::math::{v, Ray, O};
use crate::SdfError;

/// Pinhole camera at the origin looking down -z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectiveCamera {
    focal_length: f32,
    sensor_width: f32,
    sensor_height: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        PerspectiveCamera {
            focal_length: 50.,
            sensor_width: 32.,
            sensor_height: 18.,
        }
    }
}

impl PerspectiveCamera {
    pub fn new(focal_length: f32, sensor_width: f32, sensor_height: f32) -> Result<Self, SdfError> {
        if !(focal_length > 0.) || !focal_length.is_finite() {
            return Err(SdfError::InvalidCamera("focal length must be positive"));
        }
        if !(sensor_width > 0. && sensor_height > 0.)
            || !(sensor_width.is_finite() && sensor_height.is_finite())
        {
            return Err(SdfError::InvalidCamera("sensor extents must be positive"));
        }
        Ok(PerspectiveCamera {
            focal_length,
            sensor_width,
            sensor_height,
        })
    }

    /// Ray through the normalized sensor coordinate `(x, y)`, both in `0..1`
    /// with `y` growing downwards.
    pub fn project(&self, x: f32, y: f32) -> Ray {
        let d = v(
            (x - 0.5) * self.sensor_width,
            -(y - 0.5) * self.sensor_height,
            -self.focal_length,
        );
        // non-finite sensor coordinates fall back to the view axis
        Ray::new(O, d).unwrap_or(Ray {
            x: O,
            d: v(0., 0., -1.),
        })
    }

    /// Ray through the center of pixel `(px, py)` of a `width` x `height` surface.
    pub fn pixel_ray(&self, px: u32, py: u32, width: u32, height: u32) -> Ray {
        self.project(
            (px as f32 + 0.5) / width as f32,
            (py as f32 + 0.5) / height as f32,
        )
    }
}
