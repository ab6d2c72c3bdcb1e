use crate::controls::Pose;
use crate::marcher::{Node, Renderable, RotationX, RotationY, Translation};

/// The live transform nodes wrapped around a static scene.
///
/// The tracer's camera never leaves the origin; flying around is done by
/// moving the world the other way. Translation is applied to the scene
/// first, then yaw about y, then pitch about x.
pub struct CameraRig {
    root: RotationX<RotationY<Translation>>,
}

impl CameraRig {
    pub fn new(scene: Node, pose: &Pose) -> Self {
        let translation = Translation::new(scene, pose.position);
        let yaw = RotationY::new(translation, pose.yaw);
        CameraRig {
            root: RotationX::new(yaw, pose.pitch),
        }
    }

    /// Retargets the rig. Taking `&mut self` means no frame can be tracing
    /// through the rig while it changes.
    pub fn update(&mut self, pose: &Pose) {
        self.root.object.object.set_offset(pose.position);
        self.root.object.update(pose.yaw);
        self.root.update(pose.pitch);
    }

    pub fn pose(&self) -> Pose {
        Pose {
            position: self.root.object.object.offset(),
            yaw: self.root.object.rotation(),
            pitch: self.root.rotation(),
        }
    }

    pub fn scene(&self) -> &Node {
        &self.root.object.object.object
    }

    pub fn object(&self) -> &dyn Renderable {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marcher::{Cube, Lambertian};
    use crate::math::{v, Color};
    use std::sync::Arc;

    fn scene() -> Node {
        let cube: Node = Arc::new(Cube::new(
            1.,
            Arc::new(Lambertian::new(Color::new(0.1, 0.1, 0.9, 1.))),
        ));
        Arc::new(Translation::new(cube, v(1.8, 0., -10.)))
    }

    #[test]
    fn update_matches_freshly_built_rig() {
        let pose = Pose {
            position: v(0.5, -1., 2.),
            yaw: 0.3,
            pitch: -0.2,
        };
        let mut rig = CameraRig::new(scene(), &Pose::default());
        rig.update(&pose);
        assert_eq!(rig.pose(), pose);
        let fresh = CameraRig::new(rig.scene().clone(), &pose);
        for p in [v(0., 0., -5.), v(1., 2., -9.), v(-3., 0.5, 1.)] {
            assert_eq!(rig.object().distance(&p), fresh.object().distance(&p));
        }
    }

    #[test]
    fn rest_pose_is_identity() {
        let rig = CameraRig::new(scene(), &Pose::default());
        let p = v(1.8, 0.2, -9.7);
        assert_eq!(rig.object().distance(&p), rig.scene().distance(&p));
    }

    #[test]
    fn yaw_is_applied_before_pitch() {
        let pose = Pose {
            position: v(0., 0., 0.),
            yaw: 0.6,
            pitch: 0.4,
        };
        let rig = CameraRig::new(scene(), &pose);
        let by_hand = RotationX::new(RotationY::new(scene(), 0.6), 0.4);
        let p = v(0.3, 0.7, -4.);
        assert!((rig.object().distance(&p) - by_hand.distance(&p)).abs() < 1e-6);
    }
}
