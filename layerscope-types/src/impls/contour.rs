use serde::{Deserialize, Serialize};

/// Closed ring of points.
///
/// The last point of the ring is always equal to the first one, so a ring with `n` distinct
/// vertices stores `n + 1` points. This is the same layout GeoJSON uses for linear rings.
#[derive(Debug, Clone, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct ClosedContour<Point> {
    /// Points of the contour, including the closing point.
    pub points: Vec<Point>,
}

impl<Point: Clone> ClosedContour<Point> {
    /// Creates a closed contour from the vertices of an open ring by always repeating the first
    /// vertex at the end, even if it coincides with the last one.
    pub fn from_open(mut points: Vec<Point>) -> Self {
        if let Some(first) = points.first().cloned() {
            points.push(first);
        }

        Self { points }
    }
}

impl<Point> ClosedContour<Point> {
    /// Number of distinct vertices in the ring.
    pub fn vertex_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Iterates over the points of the ring, including the closing point.
    pub fn iter_points(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }
}
