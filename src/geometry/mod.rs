//! Geometric types: primitive elements, chains, curves, and boxes.

pub mod bbox;
pub mod chain;
pub mod curve;
pub mod curve_set;
pub mod element;
pub mod path;

pub use bbox::Box2;
pub use chain::Chain;
pub use curve::Curve;
pub use curve_set::CurveSet;
pub use element::{Arc, CurveDomain, Element, Line, Ray, Segment};
pub use path::{append_path, curve_path, PathElement};
