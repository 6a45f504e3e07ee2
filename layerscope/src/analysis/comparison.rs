//! Pairs of nearby points from two layers.

use geojson::Value;
use layerscope_types::geo::GeoPoint2d;
use layerscope_types::geojson::position;
use serde::Serialize;
use serde_json::json;

use crate::analysis::distance;
use crate::feature::{
    FeatureCollection, FeatureId, FeatureKind, MapFeature, DISTANCE_PROPERTY, KIND_PROPERTY,
};

/// Proximity threshold used when none is configured, in meters.
pub const DEFAULT_THRESHOLD_M: f64 = 200.0;

/// Two points, one from each compared layer, lying within the proximity threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonPair {
    /// Id of the point from the first layer.
    #[serde(rename = "idA")]
    pub id_a: FeatureId,
    /// Id of the point from the second layer.
    #[serde(rename = "idB")]
    pub id_b: FeatureId,
    /// Distance between the points in meters.
    pub distance_m: f64,
    /// Location of the point from the first layer.
    #[serde(skip)]
    pub location_a: GeoPoint2d,
    /// Location of the point from the second layer.
    #[serde(skip)]
    pub location_b: GeoPoint2d,
    /// Copy of the feature from the first layer.
    #[serde(rename = "featureA", skip_serializing_if = "Option::is_none")]
    pub feature_a: Option<MapFeature>,
    /// Copy of the feature from the second layer.
    #[serde(rename = "featureB", skip_serializing_if = "Option::is_none")]
    pub feature_b: Option<MapFeature>,
}

/// Full output of a comparison run.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Matched pairs, in the order of iteration: points of the first layer in the outer loop, points
    /// of the second layer in the inner loop.
    pub pairs: Vec<ComparisonPair>,
    /// Number of candidate pairs whose distance was evaluated.
    pub evaluated: usize,
}

/// Finds all pairs of points from two layers lying within a distance threshold.
///
/// Every point of the first layer is checked against every point of the second one. This is
/// quadratic, but layers in this application hold hundreds of points, and the exhaustive search
/// guarantees that no pair is missed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonEngine {
    threshold_m: f64,
    include_features: bool,
}

impl Default for ComparisonEngine {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD_M)
    }
}

impl ComparisonEngine {
    /// Creates an engine with the given threshold in meters.
    pub fn new(threshold_m: f64) -> Self {
        Self {
            threshold_m,
            include_features: true,
        }
    }

    /// Sets whether the pairs carry copies of the matched features.
    pub fn with_features(mut self, include_features: bool) -> Self {
        self.include_features = include_features;
        self
    }

    /// Proximity threshold in meters.
    pub fn threshold_m(&self) -> f64 {
        self.threshold_m
    }

    /// Compares two layers. Points at exactly the threshold distance are matched.
    ///
    /// Comparing a layer with itself matches every point with itself at zero distance.
    pub fn compare(&self, layer_a: &FeatureCollection, layer_b: &FeatureCollection) -> Comparison {
        let points_a = identified_points(layer_a);
        let points_b = identified_points(layer_b);

        let mut pairs = vec![];
        let mut evaluated = 0;

        for a in &points_a {
            for b in &points_b {
                evaluated += 1;

                let distance_m = distance(&a.location, &b.location);
                if distance_m <= self.threshold_m {
                    pairs.push(self.pair(a, b, distance_m));
                }
            }
        }

        log::debug!(
            "Compared {} x {} points within {} m: {} pairs",
            points_a.len(),
            points_b.len(),
            self.threshold_m,
            pairs.len()
        );

        Comparison { pairs, evaluated }
    }

    fn pair(&self, a: &IdentifiedPoint, b: &IdentifiedPoint, distance_m: f64) -> ComparisonPair {
        ComparisonPair {
            id_a: a.id.clone(),
            id_b: b.id.clone(),
            distance_m,
            location_a: a.location,
            location_b: b.location,
            feature_a: self.include_features.then(|| a.feature.clone()),
            feature_b: self.include_features.then(|| b.feature.clone()),
        }
    }
}

/// Returns all pairs of points from `layer_a` and `layer_b` within `threshold_m` meters of each
/// other.
pub fn compare_layers(
    layer_a: &FeatureCollection,
    layer_b: &FeatureCollection,
    threshold_m: f64,
) -> Vec<ComparisonPair> {
    ComparisonEngine::new(threshold_m)
        .compare(layer_a, layer_b)
        .pairs
}

/// Orders pairs closest first. Pairs at equal distance keep their relative order.
pub fn sort_by_distance(pairs: &mut [ComparisonPair]) {
    pairs.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
}

/// Builds an overlay collection with a line from the first point to the second one for every
/// pair.
pub fn pair_markers(pairs: &[ComparisonPair]) -> FeatureCollection {
    pairs
        .iter()
        .map(|pair| {
            MapFeature::new(Value::LineString(vec![
                position(&pair.location_a),
                position(&pair.location_b),
            ]))
            .with_property("idA", pair.id_a.clone())
            .with_property("idB", pair.id_b.clone())
            .with_property(DISTANCE_PROPERTY, json!(pair.distance_m))
            .with_property(KIND_PROPERTY, FeatureKind::Comparison.as_str())
        })
        .collect()
}

struct IdentifiedPoint<'a> {
    id: FeatureId,
    location: GeoPoint2d,
    feature: &'a MapFeature,
}

/// Collects the points of the layer that take part in the comparison. Points without an `id`
/// property are numbered from 1 in the order of the collection.
fn identified_points(layer: &FeatureCollection) -> Vec<IdentifiedPoint<'_>> {
    let mut next_position = 1;
    layer
        .iter()
        .filter_map(|feature| {
            let location = feature.analysis_point()?;
            let id = feature.id().unwrap_or_else(|| {
                let id = FeatureId::Position(next_position);
                next_position += 1;
                id
            });

            Some(IdentifiedPoint {
                id,
                location,
                feature,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use layerscope_types::geo::geodesic::destination_point;
    use layerscope_types::geo::GeoPoint;
    use layerscope_types::lonlat;

    use super::*;
    use crate::feature::ID_PROPERTY;

    fn point(id: i64, lon: f64, lat: f64) -> MapFeature {
        MapFeature::point(&lonlat!(lon, lat)).with_property(ID_PROPERTY, id)
    }

    fn anonymous(lon: f64, lat: f64) -> MapFeature {
        MapFeature::point(&lonlat!(lon, lat))
    }

    fn ids(pairs: &[ComparisonPair]) -> Vec<(FeatureId, FeatureId)> {
        pairs
            .iter()
            .map(|p| (p.id_a.clone(), p.id_b.clone()))
            .collect()
    }

    fn grid(count: usize, lon: f64, lat: f64, step: f64) -> FeatureCollection {
        (0..count)
            .map(|i| anonymous(lon + step * (i % 5) as f64, lat + step * (i / 5) as f64))
            .collect()
    }

    #[test]
    fn nearby_points_are_paired() {
        let a = FeatureCollection::new(vec![point(1, -74.0060, 40.7128)]);
        let b = FeatureCollection::new(vec![point(2, -74.0065, 40.7130)]);

        let pairs = compare_layers(&a, &b, DEFAULT_THRESHOLD_M);

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].id_a, FeatureId::from(1_i64));
        assert_eq!(pairs[0].id_b, FeatureId::from(2_i64));
        assert_abs_diff_eq!(pairs[0].distance_m, 47.7, epsilon = 1.0);
        assert_eq!(pairs[0].feature_a.as_ref(), Some(&a[0]));
        assert_eq!(pairs[0].feature_b.as_ref(), Some(&b[0]));
    }

    #[test]
    fn threshold_is_inclusive() {
        let origin = lonlat!(2.3522, 48.8566);
        let near = destination_point(origin.lon(), origin.lat(), 0.3, 200.0);
        let exact = distance(&origin, &near);

        let a = FeatureCollection::new(vec![MapFeature::point(&origin)]);
        let b = FeatureCollection::new(vec![MapFeature::point(&near)]);

        assert_eq!(compare_layers(&a, &b, exact).len(), 1);
        assert!(compare_layers(&a, &b, exact - 1e-6).is_empty());

        let far = destination_point(origin.lon(), origin.lat(), 0.3, 200.01);
        let b = FeatureCollection::new(vec![MapFeature::point(&far)]);
        assert!(compare_layers(&a, &b, 200.0).is_empty());
    }

    #[test]
    fn every_candidate_pair_is_evaluated() {
        let a = grid(7, -74.0, 40.7, 0.001);
        let b = grid(11, -74.0005, 40.7005, 0.0015);

        let comparison = ComparisonEngine::new(150.0).compare(&a, &b);
        assert_eq!(comparison.evaluated, 7 * 11);

        let mut expected = vec![];
        for (i, fa) in a.iter().enumerate() {
            for (j, fb) in b.iter().enumerate() {
                let d = distance(
                    &fa.location().expect("point"),
                    &fb.location().expect("point"),
                );
                if d <= 150.0 {
                    expected.push((FeatureId::Position(i + 1), FeatureId::Position(j + 1)));
                }
            }
        }

        assert!(!expected.is_empty());
        assert_eq!(ids(&comparison.pairs), expected);
    }

    #[test]
    fn only_points_are_compared() {
        let a = FeatureCollection::new(vec![
            MapFeature::new(Value::LineString(vec![vec![0.0, 0.0], vec![0.0, 0.001]])),
            MapFeature::new(Value::Point(vec![])),
            anonymous(0.0, 0.0),
        ]);
        let b = FeatureCollection::new(vec![anonymous(0.0, 0.0)]);

        let comparison = ComparisonEngine::default().compare(&a, &b);
        assert_eq!(comparison.evaluated, 1);
        assert_eq!(
            ids(&comparison.pairs),
            vec![(FeatureId::Position(1), FeatureId::Position(1))]
        );
    }

    #[test]
    fn positional_ids_count_points_without_id() {
        let a = FeatureCollection::new(vec![
            point(10, 0.0, 0.0),
            anonymous(0.0, 0.0),
            point(20, 0.0, 0.0),
            anonymous(0.0, 0.0),
        ]);
        let b = FeatureCollection::new(vec![anonymous(0.0, 0.0)]);

        let pairs = compare_layers(&a, &b, 1.0);
        assert_eq!(
            ids(&pairs),
            vec![
                (FeatureId::from(10_i64), FeatureId::Position(1)),
                (FeatureId::Position(1), FeatureId::Position(1)),
                (FeatureId::from(20_i64), FeatureId::Position(1)),
                (FeatureId::Position(2), FeatureId::Position(1)),
            ]
        );
    }

    #[test]
    fn non_finite_points_are_skipped() {
        let a = FeatureCollection::new(vec![
            MapFeature::new(Value::Point(vec![f64::NAN, 0.0])),
            MapFeature::new(Value::Point(vec![0.0, f64::INFINITY])),
            anonymous(0.0, 0.0),
        ]);
        let b = FeatureCollection::new(vec![anonymous(0.0, 0.0)]);

        let comparison = ComparisonEngine::default().compare(&a, &b);
        assert_eq!(comparison.evaluated, 1);
        assert_eq!(
            ids(&comparison.pairs),
            vec![(FeatureId::Position(1), FeatureId::Position(1))]
        );
    }

    #[test]
    fn repeated_calls_are_identical() {
        let a = grid(10, 13.4, 52.5, 0.0007);
        let b = grid(10, 13.4003, 52.5002, 0.0009);

        let first = compare_layers(&a, &b, DEFAULT_THRESHOLD_M);
        let second = compare_layers(&a, &b, DEFAULT_THRESHOLD_M);

        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn self_comparison_keeps_reflexive_pairs() {
        let layer = FeatureCollection::new(vec![point(1, 0.0, 0.0), point(2, 1.0, 1.0)]);

        let pairs = compare_layers(&layer, &layer, DEFAULT_THRESHOLD_M);
        assert_eq!(
            ids(&pairs),
            vec![
                (FeatureId::from(1_i64), FeatureId::from(1_i64)),
                (FeatureId::from(2_i64), FeatureId::from(2_i64)),
            ]
        );
        assert!(pairs.iter().all(|p| p.distance_m == 0.0));
    }

    #[test]
    fn empty_layers() {
        let layer = FeatureCollection::new(vec![point(1, 0.0, 0.0)]);
        let empty = FeatureCollection::default();

        let comparison = ComparisonEngine::default().compare(&layer, &empty);
        assert!(comparison.pairs.is_empty());
        assert_eq!(comparison.evaluated, 0);
        assert!(compare_layers(&empty, &layer, DEFAULT_THRESHOLD_M).is_empty());
    }

    #[test]
    fn pairs_without_features() {
        let a = FeatureCollection::new(vec![point(1, 0.0, 0.0)]);
        let comparison = ComparisonEngine::default().with_features(false).compare(&a, &a);

        assert_eq!(comparison.pairs.len(), 1);
        assert!(comparison.pairs[0].feature_a.is_none());
        assert!(comparison.pairs[0].feature_b.is_none());
    }

    #[test]
    fn sorting_and_markers() {
        let a = FeatureCollection::new(vec![point(1, 0.0, 0.0), point(2, 0.001, 0.0)]);
        let b = FeatureCollection::new(vec![point(3, 0.0015, 0.0)]);

        let mut pairs = compare_layers(&a, &b, 1_000.0);
        assert_eq!(
            ids(&pairs),
            vec![
                (FeatureId::from(1_i64), FeatureId::from(3_i64)),
                (FeatureId::from(2_i64), FeatureId::from(3_i64)),
            ]
        );

        sort_by_distance(&mut pairs);
        assert_eq!(pairs[0].id_a, FeatureId::from(2_i64));

        let markers = pair_markers(&pairs);
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].kind(), Some(FeatureKind::Comparison));
        assert_eq!(markers[0].property("idA"), Some(&json!(2)));
        assert_eq!(markers[0].property("idB"), Some(&json!(3)));
        assert_eq!(
            markers[0].geometry.as_ref().map(|g| &g.value),
            Some(&Value::LineString(vec![vec![0.001, 0.0], vec![0.0015, 0.0]]))
        );
    }

    #[test]
    fn pair_serialization() {
        let a = FeatureCollection::new(vec![point(1, 0.0, 0.0)]);
        let pairs = ComparisonEngine::default().with_features(false).compare(&a, &a).pairs;

        let value = serde_json::to_value(&pairs[0]).expect("serializable");
        assert_eq!(value, json!({ "idA": 1, "idB": 1, "distance_m": 0.0 }));
    }
}
