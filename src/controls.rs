//! State shared between the input side and the renderer.
//!
//! Both sides get an `Arc<Controls>`; nothing here is process global.

use crate::math::{v, V3};
use log::{debug, info};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::thread;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    pub position: V3,
    pub yaw: f32,
    pub pitch: f32,
}

#[derive(Debug, Default)]
struct AtomicF32(AtomicU32);

impl AtomicF32 {
    fn new(value: f32) -> Self {
        AtomicF32(AtomicU32::new(value.to_bits()))
    }

    fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed)
    }
}

/// Camera pose written by the input side and read once per frame.
///
/// Components are stored independently. A reader racing a writer may see a
/// mix of two poses, which shows up as a one frame glitch at worst.
#[derive(Debug, Default)]
pub struct SharedPose {
    position: [AtomicF32; 3],
    rotation: [AtomicF32; 2],
}

impl SharedPose {
    pub fn new(pose: Pose) -> Self {
        let p = pose.position;
        SharedPose {
            position: [AtomicF32::new(p.x), AtomicF32::new(p.y), AtomicF32::new(p.z)],
            rotation: [AtomicF32::new(pose.pitch), AtomicF32::new(pose.yaw)],
        }
    }

    pub fn load(&self) -> Pose {
        let [x, y, z] = &self.position;
        let [pitch, yaw] = &self.rotation;
        Pose {
            position: v(x.load(), y.load(), z.load()),
            yaw: yaw.load(),
            pitch: pitch.load(),
        }
    }

    pub fn store(&self, pose: &Pose) {
        let [x, y, z] = &self.position;
        x.store(pose.position.x);
        y.store(pose.position.y);
        z.store(pose.position.z);
        let [pitch, yaw] = &self.rotation;
        pitch.store(pose.pitch);
        yaw.store(pose.yaw);
    }
}

/// Two phase shutdown flag.
///
/// The input side calls [`Shutdown::request_and_wait`]; renderers check
/// [`Shutdown::is_requested`] once per frame and, once they have all
/// stopped, the frame loop calls [`Shutdown::acknowledge`] which clears the
/// flag and lets the requester go.
#[derive(Debug, Default)]
pub struct Shutdown {
    requested: AtomicBool,
}

impl Shutdown {
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    pub fn request(&self) {
        debug!("Quitting...");
        self.requested.store(true, Ordering::Release);
    }

    pub fn request_and_wait(&self) {
        self.request();
        while self.is_requested() {
            thread::yield_now();
        }
    }

    pub fn acknowledge(&self) {
        self.requested.store(false, Ordering::Release);
    }
}

#[derive(Debug, Default)]
pub struct Controls {
    pub pose: SharedPose,
    pub shutdown: Shutdown,
    ready: AtomicBool,
}

impl Controls {
    pub fn new(pose: Pose) -> Self {
        Controls {
            pose: SharedPose::new(pose),
            shutdown: Shutdown::default(),
            ready: AtomicBool::new(false),
        }
    }

    /// Signals that the output surface exists and frames may be produced.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn wait_ready(&self) {
        while !self.is_ready() {
            thread::yield_now();
        }
    }
}

/// Keys held and mouse offset during one input tick. The mouse offset is the
/// distance from the window center as a fraction of the window size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Input {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub mouse: (f32, f32),
}

fn axis(positive: bool, negative: bool) -> f32 {
    (positive as i32 - negative as i32) as f32
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Movement {
    pub speed: f32,
    pub rotate_speed: f32,
}

impl Default for Movement {
    fn default() -> Self {
        Movement {
            speed: 4.,
            rotate_speed: 200.,
        }
    }
}

impl Movement {
    /// Integrates `input` held for `dt` seconds into `pose`.
    pub fn apply(&self, pose: &mut Pose, input: &Input, dt: f32) {
        let dir_z = axis(input.forward, input.backward);
        let dir_x = axis(input.left, input.right);
        let dir_y = axis(input.up, input.down);
        let (sin, cos) = pose.yaw.sin_cos();
        let step = self.speed * dt;
        let p = &mut pose.position;
        p.z += dir_z * step * cos;
        p.x -= dir_z * step * sin;
        p.z += dir_x * step * sin;
        p.x += dir_x * step * cos;
        p.y -= dir_y * step;

        pose.yaw += input.mouse.0 * self.rotate_speed * dt;
        pose.pitch -= input.mouse.1 * self.rotate_speed * dt;
    }
}

/// One stretch of a scripted flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Leg {
    pub input: Input,
    pub duration: Duration,
}

/// Plays the part of the window's input loop: marks the surface ready, steers
/// the shared pose through `legs` and then asks the renderers to stop.
pub fn fly(controls: &Controls, legs: &[Leg], movement: &Movement, tick: Duration) {
    controls.mark_ready();
    for (i, leg) in legs.iter().enumerate() {
        debug!("flight leg {} for {:?}: {:?}", i, leg.duration, leg.input);
        let start = Instant::now();
        let mut last = start;
        while start.elapsed() < leg.duration {
            thread::sleep(tick);
            let now = Instant::now();
            let mut pose = controls.pose.load();
            movement.apply(&mut pose, &leg.input, (now - last).as_secs_f32());
            controls.pose.store(&pose);
            last = now;
        }
    }
    info!("flight finished at {:?}", controls.pose.load());
    controls.shutdown.request_and_wait();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn shared_pose_round_trips() {
        let pose = Pose {
            position: v(1., -2., 3.5),
            yaw: 0.25,
            pitch: -0.5,
        };
        let shared = SharedPose::new(Pose::default());
        assert_eq!(shared.load(), Pose::default());
        shared.store(&pose);
        assert_eq!(shared.load(), pose);
    }

    #[test]
    fn forward_at_zero_yaw_moves_along_z() {
        let mut pose = Pose::default();
        let input = Input {
            forward: true,
            ..Default::default()
        };
        Movement::default().apply(&mut pose, &input, 0.5);
        assert!((pose.position.z - 2.).abs() < 1e-6);
        assert!(pose.position.x.abs() < 1e-6);
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut pose = Pose::default();
        let input = Input {
            forward: true,
            backward: true,
            up: true,
            down: true,
            ..Default::default()
        };
        Movement::default().apply(&mut pose, &input, 1.);
        assert_eq!(pose, Pose::default());
    }

    #[test]
    fn strafe_and_look() {
        let mut pose = Pose {
            yaw: std::f32::consts::FRAC_PI_2,
            ..Default::default()
        };
        let input = Input {
            left: true,
            up: true,
            mouse: (0.01, 0.02),
            ..Default::default()
        };
        Movement::default().apply(&mut pose, &input, 0.25);
        assert!((pose.position.z - 1.).abs() < 1e-5);
        assert!(pose.position.x.abs() < 1e-5);
        assert!((pose.position.y + 1.).abs() < 1e-6);
        assert!((pose.yaw - (std::f32::consts::FRAC_PI_2 + 0.5)).abs() < 1e-5);
        assert!((pose.pitch + 1.).abs() < 1e-5);
    }

    #[test]
    fn shutdown_handshake_releases_requester() {
        let controls = Arc::new(Controls::default());
        let requester = {
            let controls = controls.clone();
            thread::spawn(move || controls.shutdown.request_and_wait())
        };
        while !controls.shutdown.is_requested() {
            thread::yield_now();
        }
        controls.shutdown.acknowledge();
        requester.join().unwrap();
        assert!(!controls.shutdown.is_requested());
    }

    #[test]
    fn flight_marks_ready_moves_and_requests_shutdown() {
        let controls = Arc::new(Controls::default());
        let pilot = {
            let controls = controls.clone();
            thread::spawn(move || {
                let legs = [Leg {
                    input: Input {
                        down: true,
                        ..Default::default()
                    },
                    duration: Duration::from_millis(20),
                }];
                fly(&controls, &legs, &Movement::default(), Duration::from_millis(1));
            })
        };
        controls.wait_ready();
        while !controls.shutdown.is_requested() {
            thread::yield_now();
        }
        assert!(controls.pose.load().position.y > 0.);
        controls.shutdown.acknowledge();
        pilot.join().unwrap();
    }
}
