use crate::marcher::{Node, Renderable, Sample};
use crate::math::{v, V3};

/// Moves `object` by `offset`. The offset can be changed between frames.
pub struct Translation<O = Node> {
    pub object: O,
    offset: V3,
}

impl<O: Renderable> Translation<O> {
    pub fn new(object: O, offset: V3) -> Self {
        Translation { object, offset }
    }

    pub fn offset(&self) -> V3 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: V3) {
        self.offset = offset;
    }
}

impl<O: Renderable> Renderable for Translation<O> {
    fn sdf(&self, x: &V3) -> Sample<'_> {
        self.object.sdf(&(*x - self.offset))
    }

    fn center(&self) -> V3 {
        self.object.center() + self.offset
    }
}

// sin/cos of the angle, cached so evaluation is only multiply-adds
#[derive(Clone, Copy, Debug)]
struct Angle {
    rotation: f32,
    sin: f32,
    cos: f32,
}

impl Angle {
    fn new(rotation: f32) -> Self {
        Angle {
            rotation,
            sin: rotation.sin(),
            cos: rotation.cos(),
        }
    }
}

/// Rotation about the x axis.
pub struct RotationX<O = Node> {
    pub object: O,
    angle: Angle,
}

/// Rotation about the y axis.
pub struct RotationY<O = Node> {
    pub object: O,
    angle: Angle,
}

impl<O: Renderable> RotationX<O> {
    pub fn new(object: O, rotation: f32) -> Self {
        RotationX {
            object,
            angle: Angle::new(rotation),
        }
    }

    pub fn rotation(&self) -> f32 {
        self.angle.rotation
    }

    pub fn update(&mut self, rotation: f32) {
        self.angle = Angle::new(rotation);
    }
}

impl<O: Renderable> RotationY<O> {
    pub fn new(object: O, rotation: f32) -> Self {
        RotationY {
            object,
            angle: Angle::new(rotation),
        }
    }

    pub fn rotation(&self) -> f32 {
        self.angle.rotation
    }

    pub fn update(&mut self, rotation: f32) {
        self.angle = Angle::new(rotation);
    }
}

impl<O: Renderable> Renderable for RotationX<O> {
    fn sdf(&self, x: &V3) -> Sample<'_> {
        let Angle { sin, cos, .. } = self.angle;
        self.object
            .sdf(&v(x.x, cos * x.y - sin * x.z, sin * x.y + cos * x.z))
    }

    fn center(&self) -> V3 {
        self.object.center()
    }
}

impl<O: Renderable> Renderable for RotationY<O> {
    fn sdf(&self, x: &V3) -> Sample<'_> {
        let Angle { sin, cos, .. } = self.angle;
        self.object
            .sdf(&v(cos * x.x - sin * x.z, x.y, sin * x.x + cos * x.z))
    }

    fn center(&self) -> V3 {
        self.object.center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marcher::{ConstantColor, Cube, Sphere};
    use crate::math::{Color, O};
    use rand::{thread_rng, Rng};
    use std::sync::Arc;

    fn cube() -> Node {
        Arc::new(Cube::new(
            1.,
            Arc::new(ConstantColor::new(Color::new(0., 0., 1., 1.))),
        ))
    }

    fn random_point(rng: &mut impl Rng) -> V3 {
        v(
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
        )
    }

    #[test]
    fn translation_shifts_evaluation_point() {
        let mut rng = thread_rng();
        for _ in 0..100 {
            let t = random_point(&mut rng);
            let p = random_point(&mut rng);
            let moved = Translation::new(cube(), t);
            assert_eq!(moved.distance(&p), cube().distance(&(p - t)));
        }
    }

    #[test]
    fn translation_center_and_retarget() {
        let mut moved = Translation::new(cube(), v(1., 0., 0.));
        assert_eq!(moved.center(), v(1., 0., 0.));
        moved.set_offset(v(0., 0., -4.));
        assert_eq!(moved.offset(), v(0., 0., -4.));
        assert!((moved.distance(&v(0., 0., -4.)) + 0.5).abs() < 1e-6);
    }

    #[test]
    fn rotation_y_is_angle_additive() {
        let offset: Node = Arc::new(Translation::new(cube(), v(2., 0.5, -1.)));
        let (a, b) = (0.4, 1.1);
        let twice = RotationY::new(RotationY::new(offset.clone(), a), b);
        let once = RotationY::new(offset.clone(), a + b);
        let mut rng = thread_rng();
        for _ in 0..100 {
            let p = random_point(&mut rng);
            assert!((twice.distance(&p) - once.distance(&p)).abs() < 1e-4);
        }
        // an off-center cube is not rotation invariant
        let p = v(2., 0.5, -1.);
        assert!((RotationY::new(offset.clone(), 1.).distance(&p) - offset.distance(&p)).abs() > 0.1);
    }

    #[test]
    fn rotation_x_is_angle_additive() {
        let offset: Node = Arc::new(Translation::new(cube(), v(0., 2., 1.)));
        let twice = RotationX::new(RotationX::new(offset.clone(), -0.3), 0.9);
        let once = RotationX::new(offset, 0.6);
        let mut rng = thread_rng();
        for _ in 0..100 {
            let p = random_point(&mut rng);
            assert!((twice.distance(&p) - once.distance(&p)).abs() < 1e-4);
        }
    }

    #[test]
    fn rotation_update_recomputes_cache() {
        let offset: Node = Arc::new(Translation::new(cube(), v(0., 0., -3.)));
        let mut r = RotationX::new(offset.clone(), 0.);
        r.update(0.7);
        assert_eq!(r.rotation(), 0.7);
        let fresh = RotationX::new(offset, 0.7);
        let p = v(0.2, 1., -2.);
        assert_eq!(r.distance(&p), fresh.distance(&p));
    }

    #[test]
    fn rotation_keeps_center_and_sphere_field() {
        let s: Node = Arc::new(Sphere::new(
            1.,
            Arc::new(ConstantColor::new(Color::new(1., 0., 0., 1.))),
        ));
        let moved = Translation::new(s.clone(), v(0., 3., 0.));
        assert_eq!(RotationY::new(moved, 2.).center(), v(0., 3., 0.));
        let r = RotationX::new(s.clone(), 1.3);
        let p = v(1., 2., 3.);
        assert!((r.distance(&p) - s.distance(&p)).abs() < 1e-5);
        assert_eq!(RotationX::new(s, 0.5).center(), O);
    }
}
