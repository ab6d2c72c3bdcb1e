use crate::math::V3;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SdfError {
    #[error("ray direction {0:?} cannot be normalized")]
    DegenerateDirection(V3),
    #[error("axis {0:?} cannot be normalized")]
    DegenerateAxis(V3),
    #[error("invalid camera: {0}")]
    InvalidCamera(&'static str),
    #[error("cannot compose an empty list of objects")]
    EmptyComposition,
    #[error("surface of size {0}x{1} has no pixels")]
    EmptySurface(u32, u32),
}
