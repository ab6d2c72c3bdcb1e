use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use sdf::camera::PerspectiveCamera;
use sdf::controls::{fly, Controls, Input, Leg, Movement, Pose};
use sdf::marcher::{
    union_all, ConstantColor, Cube, Lambertian, MarchSettings, Node, Plane, RotationX,
    Sphere, Subtraction, Torus, Translation,
};
use sdf::math::{v, Color, B2};
use sdf::rig::CameraRig;
use sdf::screen::{average_fps, Screen};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SceneKind {
    /// Four instances of one cube
    Cubes,
    /// Carved sphere, torus and a floor
    Carved,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = 160)]
    width: u32,

    #[arg(long, default_value_t = 90)]
    height: u32,

    /// Horizontal bands rendered in parallel
    #[arg(short, long, default_value_t = 16)]
    bands: u32,

    /// Length of the scripted flight
    #[arg(short, long, default_value_t = 4.0)]
    seconds: f32,

    #[arg(long, value_enum, default_value_t = SceneKind::Cubes)]
    scene: SceneKind,

    #[arg(short, long, default_value = "out.png")]
    out: PathBuf,

    /// Directory receiving every `snapshot_every`-th frame
    #[arg(long)]
    snapshots: Option<PathBuf>,

    #[arg(long, default_value_t = 10)]
    snapshot_every: u64,

    #[arg(long, default_value_t = 128)]
    max_steps: u32,

    #[arg(long, default_value_t = 1000.)]
    background_distance: f32,
}

fn cubes() -> anyhow::Result<Node> {
    let shader = Arc::new(Lambertian::new(Color::new(0.1, 0.1, 0.9, 1.)));
    let cube: Node = Arc::new(Cube::new(1., shader));
    let instances = [
        v(1.8, 0., -10.),
        v(0., 0., -10.),
        v(1.8, 1., -10.),
        v(0., 1., -10.),
    ]
    .into_iter()
    .map(|at| Arc::new(Translation::new(cube.clone(), at)) as Node);
    Ok(union_all(instances)?)
}

fn carved() -> anyhow::Result<Node> {
    let red = Arc::new(Lambertian::new(Color::new(0.9, 0.2, 0.1, 1.)));
    let gold = Arc::new(Lambertian::new(Color::new(0.9, 0.7, 0.2, 1.)));
    let floor = Arc::new(ConstantColor::new(Color::new(0.3, 0.3, 0.3, 1.)));

    let ball: Node = Arc::new(Sphere::new(1.3, red.clone()));
    let cutter: Node = Arc::new(Cube::new(1.8, red));
    let carved: Node = Arc::new(Translation::new(
        Subtraction::new(ball, cutter),
        v(-1.5, 0., -8.),
    ));
    let ring: Node = Arc::new(Translation::new(
        RotationX::new(Torus::new(B2, 1., 0.3, gold)?, 0.8),
        v(1.8, 0.3, -8.),
    ));
    let ground: Node = Arc::new(Translation::new(Plane::new(B2, floor)?, v(0., -1.5, 0.)));
    Ok(union_all([carved, ring, ground])?)
}

/// Flies towards the scene, looks around, then strafes.
fn flight(seconds: f32) -> anyhow::Result<Vec<Leg>> {
    let leg = Duration::try_from_secs_f32(seconds.max(0.) / 4.)
        .with_context(|| format!("flight length of {} s is out of range", seconds))?;
    let keys = [
        Input {
            forward: true,
            ..Default::default()
        },
        Input {
            mouse: (0.001, 0.),
            ..Default::default()
        },
        Input {
            mouse: (-0.001, -0.0005),
            down: true,
            ..Default::default()
        },
        Input {
            left: true,
            ..Default::default()
        },
    ];
    Ok(keys
        .into_iter()
        .map(|input| Leg {
            input,
            duration: leg,
        })
        .collect())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    info!("initializing scene");
    let scene = match args.scene {
        SceneKind::Cubes => cubes()?,
        SceneKind::Carved => carved()?,
    };
    let camera = PerspectiveCamera::default();
    let settings = MarchSettings {
        max_steps: args.max_steps,
        background_distance: args.background_distance,
        ..Default::default()
    };
    let mut screen = Screen::new(args.width, args.height)?;
    if let Some(dir) = &args.snapshots {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating snapshot directory {}", dir.display()))?;
    }

    let controls = Arc::new(Controls::new(Pose::default()));
    let pilot = {
        let controls = controls.clone();
        let legs = flight(args.seconds)?;
        thread::spawn(move || {
            fly(&controls, &legs, &Movement::default(), Duration::from_millis(2))
        })
    };

    controls.wait_ready();
    info!("rendering {}x{} in {} bands", args.width, args.height, args.bands);
    let mut rig = CameraRig::new(scene, &controls.pose.load());
    let mut frames = 0u64;
    let start = Instant::now();
    let mut last_frame = start;
    while !controls.shutdown.is_requested() {
        let now = Instant::now();
        if frames > 0 {
            screen.set_fps(1. / (now - last_frame).as_secs_f32());
        }
        last_frame = now;

        rig.update(&controls.pose.load());
        let band_fps = screen.render(&camera, rig.object(), &settings, args.bands);
        frames += 1;
        debug!("{} | bands avg FPS:{}", screen.title(), average_fps(&band_fps));

        if let Some(dir) = &args.snapshots {
            if frames % args.snapshot_every.max(1) == 0 {
                let path = dir.join(format!("frame_{:05}.png", frames));
                screen
                    .save(&path)
                    .with_context(|| format!("saving {}", path.display()))?;
            }
        }
    }
    controls.shutdown.acknowledge();
    pilot.join().map_err(|_| anyhow!("pilot thread panicked"))?;
    info!("final pose {:?}", rig.pose());

    let elapsed = start.elapsed().as_secs_f32();
    info!(
        "rendered {} frames in {} s ({} FPS)",
        frames,
        elapsed,
        frames as f32 / elapsed
    );
    screen
        .save(&args.out)
        .with_context(|| format!("saving {}", args.out.display()))?;
    info!("last frame written to {}", args.out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flight_splits_into_four_legs() {
        let legs = flight(4.).unwrap();
        assert_eq!(legs.len(), 4);
        assert!(legs.iter().all(|l| l.duration == Duration::from_secs(1)));
        assert!(flight(-3.).unwrap().iter().all(|l| l.duration.is_zero()));
        assert!(flight(f32::NAN).unwrap().iter().all(|l| l.duration.is_zero()));
    }

    #[test]
    fn unrepresentable_flight_is_an_error() {
        assert!(flight(f32::INFINITY).is_err());
        assert!(flight(f32::MAX).is_err());
    }

    #[test]
    fn demo_scenes_build() {
        assert!(cubes().is_ok());
        assert!(carved().is_ok());
    }
}
