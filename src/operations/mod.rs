//! Curve operations: clipping, splitting, offsetting, buffering.

pub mod buffer;
pub mod clip;
pub mod contour_split;
pub mod parallel;
mod positions;
pub mod split_self;

pub use buffer::{CurveBuffer, Domain};
pub use clip::ClipCurve;
pub use contour_split::SplitContours;
pub use parallel::{classify_junction, element_parallel, JunctionKind, ParallelCurve};
pub use split_self::SplitCurve;
