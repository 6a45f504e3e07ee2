//! Geometries in geographic coordinates (latitude and longitude) (see [`GeoPoint`]) and geodesic
//! calculations on a spherical earth (see [`geodesic`]).

mod datum;
pub mod geodesic;
mod point;

pub use datum::Datum;
pub use point::{GeoPoint, GeoPoint2d, NewGeoPoint};
