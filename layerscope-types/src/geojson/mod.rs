//! Conversions between the crate geometries and [`geojson`] values.

use geojson::{Position, Value};

use crate::geo::{GeoPoint, GeoPoint2d};
use crate::impls::{ClosedContour, Polygon};

mod point;

pub use point::GeoJsonPoint;

impl From<&GeoPoint2d> for Value {
    fn from(point: &GeoPoint2d) -> Self {
        Value::Point(position(point))
    }
}

impl From<&Polygon<GeoPoint2d>> for Value {
    fn from(polygon: &Polygon<GeoPoint2d>) -> Self {
        Value::Polygon(polygon.iter_contours().map(ring).collect())
    }
}

/// Converts a point into a GeoJSON position (`[lon, lat]`).
pub fn position(point: &impl GeoPoint<Num = f64>) -> Position {
    vec![point.lon(), point.lat()]
}

fn ring(contour: &ClosedContour<GeoPoint2d>) -> Vec<Position> {
    contour.iter_points().map(position).collect()
}
