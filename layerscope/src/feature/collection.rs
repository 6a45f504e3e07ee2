use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::MapFeature;

/// Ordered sequence of features.
///
/// The order of features is preserved from ingestion to analysis. Comparison assigns positional
/// ids to features without an `id` property based on this order, so reordering a collection
/// changes those ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    into = "::geojson::FeatureCollection",
    from = "::geojson::FeatureCollection"
)]
pub struct FeatureCollection {
    features: Vec<MapFeature>,
}

impl FeatureCollection {
    /// Creates a new collection.
    pub fn new(features: Vec<MapFeature>) -> Self {
        Self { features }
    }

    /// Number of features in the collection.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if the collection has no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Adds a feature to the end of the collection.
    pub fn push(&mut self, feature: MapFeature) {
        self.features.push(feature);
    }

    /// Iterates over the features.
    pub fn iter(&self) -> std::slice::Iter<'_, MapFeature> {
        self.features.iter()
    }

    /// Iterates over mutable references to the features.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, MapFeature> {
        self.features.iter_mut()
    }

    /// Features of the collection.
    pub fn features(&self) -> &[MapFeature] {
        &self.features
    }

    /// Parses a GeoJSON `FeatureCollection` document.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

impl Index<usize> for FeatureCollection {
    type Output = MapFeature;

    fn index(&self, index: usize) -> &Self::Output {
        &self.features[index]
    }
}

impl From<Vec<MapFeature>> for FeatureCollection {
    fn from(features: Vec<MapFeature>) -> Self {
        Self { features }
    }
}

impl FromIterator<MapFeature> for FeatureCollection {
    fn from_iter<T: IntoIterator<Item = MapFeature>>(iter: T) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}

impl Extend<MapFeature> for FeatureCollection {
    fn extend<T: IntoIterator<Item = MapFeature>>(&mut self, iter: T) {
        self.features.extend(iter)
    }
}

impl IntoIterator for FeatureCollection {
    type Item = MapFeature;
    type IntoIter = std::vec::IntoIter<MapFeature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a MapFeature;
    type IntoIter = std::slice::Iter<'a, MapFeature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}
