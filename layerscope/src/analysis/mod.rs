//! Client-side proximity analysis over point features.
//!
//! Both engines are pure functions of their inputs: they keep no state between calls, never
//! block and never fail. Only features with a well-formed `Point` geometry take part in the
//! analysis, everything else (other geometry types, points with missing coordinates, buffer
//! boundaries) is skipped. All distances are great-circle distances in meters computed with
//! [`haversine_distance`](layerscope_types::geo::geodesic::haversine_distance).
//!
//! Radius and threshold are expected to be finite numbers. The engines do not check this, so the
//! callers must validate user input before invoking them (see
//! [`AnalysisConfig::validate`](crate::AnalysisConfig::validate)).

pub mod buffer;
pub mod comparison;

pub use buffer::{compute_buffer, BufferEngine, BufferResult, BufferedFeature};
pub use comparison::{
    compare_layers, pair_markers, sort_by_distance, Comparison, ComparisonEngine, ComparisonPair,
    DEFAULT_THRESHOLD_M,
};

use layerscope_types::geo::geodesic::haversine_distance;
use layerscope_types::geo::{GeoPoint, GeoPoint2d};

pub(crate) fn distance(a: &GeoPoint2d, b: &GeoPoint2d) -> f64 {
    haversine_distance(a.lon(), a.lat(), b.lon(), b.lat())
}
