//! Named feature collections and their provenance.
//!
//! A [`Layer`] is either owned by the backend ([`LayerProvenance::Persisted`]) or produced on the
//! client by the analysis ([`LayerProvenance::Derived`]). Derived layers get their ids synthesized
//! from the kind of analysis and the ids of the source layers, so re-running the same analysis
//! replaces the previous overlay instead of adding a new one.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::feature::{FeatureCollection, LAYER_ID_PROPERTY};

mod store;

pub use store::LayerStore;

/// Identifier of a layer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(String);

impl LayerId {
    /// Creates a new id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// String representation of the id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for LayerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LayerId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for LayerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for LayerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Analysis that produced a derived layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerivedKind {
    /// Buffer search around a focal point.
    Buffer,
    /// Proximity comparison of two layers.
    Comparison,
}

/// Where a layer comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerProvenance {
    /// Layer stored by the backend under a stable id.
    Persisted(LayerId),
    /// Layer created on the client from other layers.
    Derived {
        /// Analysis that produced the layer.
        kind: DerivedKind,
        /// Layers the analysis was run on.
        source_ids: Vec<LayerId>,
    },
}

impl LayerProvenance {
    /// Id of the layer with this provenance.
    ///
    /// Derived ids are `{source}_buffer` for buffers and `comparison_{a}_{b}` for comparisons.
    pub fn id(&self) -> LayerId {
        match self {
            LayerProvenance::Persisted(id) => id.clone(),
            LayerProvenance::Derived {
                kind: DerivedKind::Buffer,
                source_ids,
            } => LayerId(format!("{}_buffer", join(source_ids))),
            LayerProvenance::Derived {
                kind: DerivedKind::Comparison,
                source_ids,
            } => LayerId(format!("comparison_{}", join(source_ids))),
        }
    }

    /// Returns true for client-side analysis layers.
    pub fn is_derived(&self) -> bool {
        matches!(self, LayerProvenance::Derived { .. })
    }

    /// Returns true if the layer was derived from the layer with the given id.
    pub fn derives_from(&self, id: &LayerId) -> bool {
        match self {
            LayerProvenance::Persisted(_) => false,
            LayerProvenance::Derived { source_ids, .. } => source_ids.contains(id),
        }
    }
}

fn join(ids: &[LayerId]) -> String {
    ids.iter().map(LayerId::as_str).collect::<Vec<_>>().join("_")
}

/// Named feature collection shown on the map.
///
/// Layers are never edited in place: to change the features of a layer, insert a new layer with
/// the same id into the [`LayerStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    id: LayerId,
    name: String,
    provenance: LayerProvenance,
    features: FeatureCollection,
}

impl Layer {
    /// Creates a layer owned by the backend.
    pub fn persisted(id: LayerId, name: impl Into<String>, features: FeatureCollection) -> Self {
        Self::new(LayerProvenance::Persisted(id), name.into(), features)
    }

    /// Creates a buffer overlay for the `source` layer.
    pub fn buffer(source: &Layer, features: FeatureCollection) -> Self {
        Self::new(
            LayerProvenance::Derived {
                kind: DerivedKind::Buffer,
                source_ids: vec![source.id.clone()],
            },
            format!("{} (buffer)", source.name),
            features,
        )
    }

    /// Creates a comparison overlay for the layers `a` and `b`.
    pub fn comparison(a: &Layer, b: &Layer, features: FeatureCollection) -> Self {
        Self::new(
            LayerProvenance::Derived {
                kind: DerivedKind::Comparison,
                source_ids: vec![a.id.clone(), b.id.clone()],
            },
            format!("{} / {}", a.name, b.name),
            features,
        )
    }

    fn new(provenance: LayerProvenance, name: String, features: FeatureCollection) -> Self {
        Self {
            id: provenance.id(),
            name,
            provenance,
            features,
        }
    }

    /// Id of the layer.
    pub fn id(&self) -> &LayerId {
        &self.id
    }

    /// Display name of the layer.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Provenance of the layer.
    pub fn provenance(&self) -> &LayerProvenance {
        &self.provenance
    }

    /// Returns true for client-side analysis layers.
    pub fn is_derived(&self) -> bool {
        self.provenance.is_derived()
    }

    /// Features of the layer.
    pub fn features(&self) -> &FeatureCollection {
        &self.features
    }

    /// Consumes the layer returning its features.
    pub fn into_features(self) -> FeatureCollection {
        self.features
    }

    /// Copies the features tagging each of them with the `_layerId` property, so that features of
    /// all layers can be rendered and exported the same way.
    pub fn to_feature_collection(&self) -> FeatureCollection {
        self.features
            .iter()
            .map(|feature| {
                feature
                    .clone()
                    .with_property(LAYER_ID_PROPERTY, self.id.as_str())
            })
            .collect()
    }
}
