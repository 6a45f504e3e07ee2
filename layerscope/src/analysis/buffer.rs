//! Features within a radius of a focal point.

use layerscope_types::geo::geodesic::{circle_polygon, DEFAULT_CIRCLE_STEPS};
use layerscope_types::geo::{GeoPoint, GeoPoint2d};
use serde_json::json;

use crate::analysis::distance;
use crate::feature::{
    FeatureCollection, FeatureKind, MapFeature, DISTANCE_PROPERTY, KIND_PROPERTY,
};

/// Property of the boundary feature holding the buffer radius.
pub const RADIUS_PROPERTY: &str = "radius_m";

/// Feature found inside a buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferedFeature {
    /// Copy of the source feature with the `distance_m` property set.
    pub feature: MapFeature,
    /// Distance from the buffer center in meters.
    pub distance_m: f64,
}

/// Result of a buffer search.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferResult {
    /// Focal point of the search.
    pub center: GeoPoint2d,
    /// Search radius in meters.
    pub radius_m: f64,
    /// Point features within the radius, closest first. Features at equal distance keep their
    /// input order.
    pub points: Vec<BufferedFeature>,
    /// Polygon feature approximating the search circle, marked with `_kind = "buffer"`.
    pub boundary: MapFeature,
}

impl BufferResult {
    /// Returns true if no point fell inside the buffer.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Distances of the found points, in the order of [`BufferResult::points`].
    pub fn distances(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.distance_m)
    }

    /// Collects the found points followed by the boundary feature into a collection that can be
    /// shown as an overlay layer.
    pub fn to_collection(&self) -> FeatureCollection {
        self.points
            .iter()
            .map(|p| p.feature.clone())
            .chain(std::iter::once(self.boundary.clone()))
            .collect()
    }
}

/// Searches point features within a radius of a focal point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferEngine {
    circle_steps: usize,
}

impl Default for BufferEngine {
    fn default() -> Self {
        Self {
            circle_steps: DEFAULT_CIRCLE_STEPS,
        }
    }
}

impl BufferEngine {
    /// Creates an engine that approximates the boundary circle with `circle_steps` vertices.
    pub fn new(circle_steps: usize) -> Self {
        Self { circle_steps }
    }

    /// Number of vertices of the boundary polygon.
    pub fn circle_steps(&self) -> usize {
        self.circle_steps
    }

    /// Finds all candidate point features within `radius_m` meters of the `center` (boundary
    /// inclusive).
    ///
    /// A radius that is not a positive number produces an empty point list. The candidates are not
    /// modified: returned features are copies annotated with the `distance_m` property.
    pub fn compute<'a>(
        &self,
        center: &GeoPoint2d,
        radius_m: f64,
        candidates: impl IntoIterator<Item = &'a MapFeature>,
    ) -> BufferResult {
        let mut points = vec![];
        let mut skipped = 0usize;

        if radius_m > 0.0 {
            for feature in candidates {
                let Some(location) = feature.analysis_point() else {
                    skipped += 1;
                    continue;
                };

                let distance_m = distance(center, &location);
                if distance_m <= radius_m {
                    let mut feature = feature.clone();
                    feature.set_property(DISTANCE_PROPERTY, json!(distance_m));
                    points.push(BufferedFeature {
                        feature,
                        distance_m,
                    });
                }
            }
        }

        points.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));

        log::trace!(
            "Buffer of {radius_m} m around {center:?}: {} points found, {skipped} features skipped",
            points.len()
        );

        BufferResult {
            center: *center,
            radius_m,
            points,
            boundary: self.boundary(center, radius_m),
        }
    }

    fn boundary(&self, center: &GeoPoint2d, radius_m: f64) -> MapFeature {
        let circle = circle_polygon(center.lon(), center.lat(), radius_m, self.circle_steps);
        MapFeature::new((&circle).into())
            .with_property(KIND_PROPERTY, FeatureKind::Buffer.as_str())
            .with_property(RADIUS_PROPERTY, json!(radius_m))
    }
}

/// Finds all point features of `candidates` within `radius_m` meters of the `center` using the
/// default boundary resolution.
pub fn compute_buffer(
    center: &GeoPoint2d,
    radius_m: f64,
    candidates: &FeatureCollection,
) -> BufferResult {
    BufferEngine::default().compute(center, radius_m, candidates)
}
