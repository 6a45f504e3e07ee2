//! Geometry types and spherical-earth algorithms used by `layerscope`.
//!
//! Points in geographic coordinates implement the [`GeoPoint`](geo::GeoPoint) trait. Distances,
//! great-circle destinations and circular buffers are computed on a sphere (see
//! [`Datum`](geo::Datum)) with the functions of the [`geodesic`](geo::geodesic) module.

pub mod error;
pub mod geo;
pub mod impls;

#[cfg(feature = "geojson")]
pub mod geojson;
