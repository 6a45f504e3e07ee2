//! Geodesic calculations on a spherical earth.
//!
//! All the functions take coordinates in decimal degrees and return distances in meters. Inputs are
//! not validated: `NaN` coordinates produce `NaN` results, so callers should filter invalid
//! coordinates before calling these functions.

use std::f64::consts::TAU;

use num_traits::Float;

use crate::geo::datum::Datum;
use crate::geo::point::{GeoPoint2d, NewGeoPoint};
use crate::impls::{ClosedContour, Polygon};

/// Number of vertices used by default to approximate a circle.
pub const DEFAULT_CIRCLE_STEPS: usize = 64;

/// Smallest number of vertices a circle approximation can have.
pub const MIN_CIRCLE_STEPS: usize = 3;

/// Great-circle distance in meters between points `a` and `b` on the spherical earth
/// (R = 6,371,000 m), computed with the haversine formula.
///
/// The result is symmetric in its arguments and is exactly `0.0` for identical points.
///
/// ```
/// use layerscope_types::geo::geodesic::haversine_distance;
///
/// let d = haversine_distance(-74.006, 40.7128, -118.2437, 34.0522);
/// assert!((d - 3_935_000.0).abs() < 5_000.0);
/// ```
pub fn haversine_distance(lon_a: f64, lat_a: f64, lon_b: f64, lat_b: f64) -> f64 {
    haversine(lat_a, lon_a, lat_b, lon_b, Datum::EARTH.radius())
}

/// Point reached by traveling `distance` meters along a great circle from `(lon, lat)` with the
/// initial `bearing` (in radians, clockwise from the north) on the spherical earth.
pub fn destination_point(lon: f64, lat: f64, bearing: f64, distance: f64) -> GeoPoint2d {
    destination_on(&Datum::EARTH, lon, lat, bearing, distance)
}

/// Approximates a circle of `radius` meters around `(lon, lat)` with a polygon of `steps` vertices.
///
/// The outer contour of the returned polygon contains `steps + 1` points: the first vertex is
/// repeated at the end to close the ring. Vertices are placed at evenly spaced bearings starting
/// from the north. Values of `steps` less than [`MIN_CIRCLE_STEPS`] are raised to it.
pub fn circle_polygon(lon: f64, lat: f64, radius: f64, steps: usize) -> Polygon<GeoPoint2d> {
    circle_polygon_on(&Datum::EARTH, lon, lat, radius, steps)
}

/// Same as [`destination_point`] but on the sphere of the given `datum`.
pub fn destination_on(datum: &Datum, lon: f64, lat: f64, bearing: f64, distance: f64) -> GeoPoint2d {
    let angular = distance / datum.radius();
    let (sin_angular, cos_angular) = angular.sin_cos();
    let (sin_lat, cos_lat) = lat.to_radians().sin_cos();

    let sin_dest_lat = sin_lat * cos_angular + cos_lat * sin_angular * bearing.cos();
    let dest_lat = sin_dest_lat.asin();
    let dest_lon = lon.to_radians()
        + (bearing.sin() * sin_angular * cos_lat).atan2(cos_angular - sin_lat * sin_dest_lat);

    GeoPoint2d::latlon(dest_lat.to_degrees(), dest_lon.to_degrees())
}

/// Same as [`circle_polygon`] but on the sphere of the given `datum`.
pub fn circle_polygon_on(
    datum: &Datum,
    lon: f64,
    lat: f64,
    radius: f64,
    steps: usize,
) -> Polygon<GeoPoint2d> {
    let steps = steps.max(MIN_CIRCLE_STEPS);
    let points = (0..steps)
        .map(|step| {
            let bearing = TAU * step as f64 / steps as f64;
            destination_on(datum, lon, lat, bearing, radius)
        })
        .collect();

    ClosedContour::from_open(points).into()
}

pub(crate) fn haversine<N: Float>(lat_a: N, lon_a: N, lat_b: N, lon_b: N, radius: N) -> N {
    let two = N::one() + N::one();
    let half_d_lat = (lat_b - lat_a).to_radians() / two;
    let half_d_lon = (lon_b - lon_a).to_radians() / two;

    let h = half_d_lat.sin().powi(2)
        + lat_a.to_radians().cos() * lat_b.to_radians().cos() * half_d_lon.sin().powi(2);

    // Rounding can push `h` slightly above 1 for antipodal points. Comparison keeps NaN as is.
    let root = h.sqrt();
    let root = if root > N::one() { N::one() } else { root };

    two * radius * root.asin()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::geo::GeoPoint;

    const SAMPLE: [(f64, f64); 6] = [
        (-74.006, 40.7128),
        (-118.2437, 34.0522),
        (2.3522, 48.8566),
        (139.6917, 35.6895),
        (-179.9, -0.5),
        (179.9, 0.5),
    ];

    #[test]
    fn haversine_is_symmetric() {
        for (lon_a, lat_a) in SAMPLE {
            for (lon_b, lat_b) in SAMPLE {
                assert_eq!(
                    haversine_distance(lon_a, lat_a, lon_b, lat_b),
                    haversine_distance(lon_b, lat_b, lon_a, lat_a),
                );
            }
        }
    }

    #[test]
    fn haversine_identity() {
        for (lon, lat) in SAMPLE {
            assert_eq!(haversine_distance(lon, lat, lon, lat), 0.0);
        }
    }

    #[test]
    fn haversine_new_york_to_los_angeles() {
        let distance = haversine_distance(-74.006, 40.7128, -118.2437, 34.0522);
        assert_abs_diff_eq!(distance, 3_935_000.0, epsilon = 5_000.0);
    }

    #[test]
    fn haversine_crosses_antimeridian() {
        let distance = haversine_distance(-179.9, 0.0, 179.9, 0.0);
        assert_abs_diff_eq!(distance, 0.2f64.to_radians() * Datum::EARTH_RADIUS, epsilon = 1e-3);
    }

    #[test]
    fn haversine_antipodes() {
        let distance = haversine_distance(0.0, 0.0, 180.0, 0.0);
        assert_abs_diff_eq!(distance, std::f64::consts::PI * Datum::EARTH_RADIUS, epsilon = 1e-3);
    }

    #[test]
    fn haversine_propagates_nan() {
        assert!(haversine_distance(f64::NAN, 0.0, 1.0, 1.0).is_nan());
        assert!(haversine_distance(0.0, 0.0, 1.0, f64::NAN).is_nan());
    }

    #[test]
    fn destination_travels_requested_distance() {
        for (lon, lat) in SAMPLE {
            for bearing in [0.0, 0.7, 2.0, 3.5, 5.9] {
                let dest = destination_point(lon, lat, bearing, 1_500.0);
                let distance = haversine_distance(lon, lat, dest.lon(), dest.lat());
                assert_abs_diff_eq!(distance, 1_500.0, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn destination_bearings() {
        let north = destination_point(10.0, 20.0, 0.0, 10_000.0);
        assert_abs_diff_eq!(north.lon(), 10.0, epsilon = 1e-12);
        assert!(north.lat() > 20.0);

        let east = destination_point(10.0, 0.0, std::f64::consts::FRAC_PI_2, 10_000.0);
        assert_abs_diff_eq!(east.lat(), 0.0, epsilon = 1e-12);
        assert!(east.lon() > 10.0);
    }

    #[test]
    fn destination_zero_distance() {
        let dest = destination_point(-74.006, 40.7128, 1.0, 0.0);
        assert_abs_diff_eq!(dest.lon(), -74.006, epsilon = 1e-12);
        assert_abs_diff_eq!(dest.lat(), 40.7128, epsilon = 1e-12);
    }

    #[test]
    fn circle_polygon_is_closed() {
        let polygon = circle_polygon(-74.006, 40.7128, 500.0, DEFAULT_CIRCLE_STEPS);
        let ring = &polygon.outer_contour.points;

        assert_eq!(ring.len(), DEFAULT_CIRCLE_STEPS + 1);
        assert_eq!(ring.first(), ring.last());
        assert!(polygon.inner_contours.is_empty());
    }

    #[test]
    fn zero_radius_circle_is_closed() {
        let polygon = circle_polygon(-74.006, 40.7128, 0.0, DEFAULT_CIRCLE_STEPS);
        let ring = &polygon.outer_contour.points;

        assert_eq!(ring.len(), DEFAULT_CIRCLE_STEPS + 1);
        assert_eq!(ring.first(), ring.last());
        for point in ring {
            assert_abs_diff_eq!(point.lon(), -74.006, epsilon = 1e-12);
            assert_abs_diff_eq!(point.lat(), 40.7128, epsilon = 1e-12);
        }
    }

    #[test]
    fn circle_polygon_vertices_are_on_radius() {
        let polygon = circle_polygon(2.3522, 48.8566, 250.0, 16);
        for point in &polygon.outer_contour.points {
            let distance = haversine_distance(2.3522, 48.8566, point.lon(), point.lat());
            assert_abs_diff_eq!(distance, 250.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn circle_polygon_first_vertex_points_north() {
        let polygon = circle_polygon(0.0, 0.0, 1_000.0, 8);
        let first = polygon.outer_contour.points[0];
        assert_abs_diff_eq!(first.lon(), 0.0, epsilon = 1e-12);
        assert!(first.lat() > 0.0);
    }

    #[test]
    fn circle_polygon_minimum_steps() {
        let triangle = circle_polygon(0.0, 0.0, 100.0, MIN_CIRCLE_STEPS);
        assert_eq!(triangle.outer_contour.points.len(), 4);

        let clamped = circle_polygon(0.0, 0.0, 100.0, 1);
        assert_eq!(clamped.outer_contour.points.len(), MIN_CIRCLE_STEPS + 1);
    }
}
