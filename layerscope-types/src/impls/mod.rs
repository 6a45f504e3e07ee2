//! Simple geometry implementations.

mod contour;
mod polygon;

pub use contour::ClosedContour;
pub use polygon::Polygon;
