//! Map features: a geometry with an open set of properties.
//!
//! Features are stored the way they arrive from the backend: the geometry is kept as a GeoJSON
//! geometry and the properties as a JSON object. The few properties the crate assigns meaning to
//! (`id`, `name`, `_kind`, ...) are read through typed accessors, all other properties pass through
//! untouched.
//!
//! Properties with names starting with `_` are reserved for internal use (layer id, display color,
//! feature kind) and are ignored by the analysis.

use std::fmt::{Display, Formatter};

use layerscope_types::geo::GeoPoint2d;
use layerscope_types::geojson::GeoJsonPoint;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value as JsonValue};

mod collection;
mod geojson;

pub use collection::FeatureCollection;

/// Open property map of a feature.
pub type Properties = serde_json::Map<String, JsonValue>;

/// Property holding a stable feature identifier.
pub const ID_PROPERTY: &str = "id";
/// Property holding a human readable feature name.
pub const NAME_PROPERTY: &str = "name";
/// Property holding the distance (in meters) from the analysis focal point.
pub const DISTANCE_PROPERTY: &str = "distance_m";
/// Reserved property marking synthetic features (see [`FeatureKind`]).
pub const KIND_PROPERTY: &str = "_kind";
/// Reserved property holding the id of the layer the feature belongs to.
pub const LAYER_ID_PROPERTY: &str = "_layerId";
/// Prefix of reserved property names.
pub const RESERVED_PREFIX: char = '_';

/// Kind of a synthetic feature, stored in the `_kind` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    /// Boundary circle of a buffer.
    Buffer,
    /// Line connecting the two points of a comparison pair.
    Comparison,
}

impl FeatureKind {
    /// Value of the `_kind` property for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::Buffer => "buffer",
            FeatureKind::Comparison => "comparison",
        }
    }
}

/// A geographic feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "::geojson::Feature", from = "::geojson::Feature")]
pub struct MapFeature {
    /// Geometry of the feature. Features without geometry are kept, but never take part in the
    /// analysis.
    pub geometry: Option<::geojson::Geometry>,
    /// Feature properties.
    pub properties: Properties,
}

impl MapFeature {
    /// Creates a feature with the given geometry and no properties.
    pub fn new(geometry: ::geojson::Value) -> Self {
        Self {
            geometry: Some(::geojson::Geometry::new(geometry)),
            properties: Properties::new(),
        }
    }

    /// Creates a point feature.
    pub fn point(point: &GeoPoint2d) -> Self {
        Self::new(point.into())
    }

    /// Sets the property and returns the feature back.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.set_property(key, value);
        self
    }

    /// Sets the property value, replacing the previous one if any.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Returns the value of the property.
    pub fn property(&self, key: &str) -> Option<&JsonValue> {
        self.properties.get(key)
    }

    /// Iterates over the domain properties of the feature, skipping the reserved ones.
    pub fn domain_properties(&self) -> impl Iterator<Item = (&String, &JsonValue)> {
        self.properties
            .iter()
            .filter(|(key, _)| !key.starts_with(RESERVED_PREFIX))
    }

    /// Stable identifier of the feature taken from the `id` property. Only string and number
    /// values are accepted as identifiers.
    pub fn id(&self) -> Option<FeatureId> {
        self.property(ID_PROPERTY).and_then(FeatureId::from_json)
    }

    /// Name of the feature.
    pub fn name(&self) -> Option<&str> {
        self.property(NAME_PROPERTY).and_then(JsonValue::as_str)
    }

    /// Kind of the synthetic feature, or `None` for data features.
    pub fn kind(&self) -> Option<FeatureKind> {
        match self.property(KIND_PROPERTY)?.as_str()? {
            "buffer" => Some(FeatureKind::Buffer),
            "comparison" => Some(FeatureKind::Comparison),
            _ => None,
        }
    }

    /// Returns true if the feature is a buffer boundary marker rather than a data feature.
    pub fn is_boundary(&self) -> bool {
        self.kind() == Some(FeatureKind::Buffer)
    }

    /// Location of a point feature. Returns `None` for other geometry types, for points with
    /// less than two coordinates and for points with non-finite coordinates.
    pub fn location(&self) -> Option<GeoPoint2d> {
        match &self.geometry.as_ref()?.value {
            ::geojson::Value::Point(position) => GeoJsonPoint::try_from(&position[..])
                .ok()
                .map(|p| p.to_point())
                .filter(GeoPoint2d::is_finite),
            _ => None,
        }
    }

    /// Location of the feature if it can take part in distance analysis: the feature must be a
    /// well-formed point and must not be a buffer boundary.
    pub fn analysis_point(&self) -> Option<GeoPoint2d> {
        if self.is_boundary() {
            return None;
        }

        self.location()
    }
}

/// Identifier of a feature in the analysis results.
///
/// Taken from the `id` property if present. Features without an id get a 1-based position
/// assigned by the analysis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum FeatureId {
    /// Numeric id.
    Number(Number),
    /// String id.
    String(String),
    /// Positional fallback id.
    Position(usize),
}

impl FeatureId {
    /// Converts a JSON value into an id. Only strings and numbers are valid ids.
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Number(n) => Some(Self::Number(n.clone())),
            JsonValue::String(s) => Some(Self::String(s.clone())),
            _ => None,
        }
    }

    /// Returns true if the id was assigned from the feature position.
    pub fn is_positional(&self) -> bool {
        matches!(self, Self::Position(_))
    }
}

impl From<FeatureId> for JsonValue {
    fn from(value: FeatureId) -> Self {
        match value {
            FeatureId::Number(n) => JsonValue::Number(n),
            FeatureId::String(s) => JsonValue::String(s),
            FeatureId::Position(p) => JsonValue::Number(p.into()),
        }
    }
}

impl From<i64> for FeatureId {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for FeatureId {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for FeatureId {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl Display for FeatureId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureId::Number(n) => write!(f, "{n}"),
            FeatureId::String(s) => write!(f, "{s}"),
            FeatureId::Position(p) => write!(f, "#{p}"),
        }
    }
}
