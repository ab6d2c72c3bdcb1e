pub mod camera;
pub mod controls;
mod error;
pub mod marcher;
pub mod math;
pub mod rig;
pub mod screen;

pub use error::SdfError;
