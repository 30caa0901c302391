mod coord;
mod sign;

pub use coord::{Point2, Point3};
pub use sign::Sign;
