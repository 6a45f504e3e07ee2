use ::geojson::feature::Id;
use serde_json::Value as JsonValue;

use super::{FeatureCollection, MapFeature, Properties, ID_PROPERTY};

impl From<::geojson::Feature> for MapFeature {
    fn from(value: ::geojson::Feature) -> Self {
        let mut properties = value.properties.unwrap_or_default();

        // Top level GeoJSON id is only used when the properties do not carry their own.
        if let Some(id) = value.id {
            properties.entry(ID_PROPERTY).or_insert_with(|| match id {
                Id::String(s) => JsonValue::String(s),
                Id::Number(n) => JsonValue::Number(n),
            });
        }

        Self {
            geometry: value.geometry,
            properties,
        }
    }
}

impl From<MapFeature> for ::geojson::Feature {
    fn from(value: MapFeature) -> Self {
        let properties: Option<Properties> =
            (!value.properties.is_empty()).then_some(value.properties);

        ::geojson::Feature {
            bbox: None,
            geometry: value.geometry,
            id: None,
            properties,
            foreign_members: None,
        }
    }
}

impl From<::geojson::FeatureCollection> for FeatureCollection {
    fn from(value: ::geojson::FeatureCollection) -> Self {
        value.features.into_iter().map(MapFeature::from).collect()
    }
}

impl From<FeatureCollection> for ::geojson::FeatureCollection {
    fn from(value: FeatureCollection) -> Self {
        ::geojson::FeatureCollection {
            bbox: None,
            features: value.into_iter().map(::geojson::Feature::from).collect(),
            foreign_members: None,
        }
    }
}
