//! Access to the layer backend.
//!
//! The backend stores imported layers and serves preset layers (air quality, weather, shared
//! mobility stations and routes) as GeoJSON. [`LayerBackend`] abstracts the transport, and
//! [`HttpLayerBackend`] implements it over HTTP. [`LayerLoader`] connects a backend with a
//! [`LayerStore`](crate::LayerStore).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LayerError;
use crate::feature::FeatureCollection;
use crate::layer::LayerId;

mod http;
mod loader;

pub use http::HttpLayerBackend;
pub use loader::LayerLoader;

/// Description of a layer stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSummary {
    /// Stable id of the layer.
    pub id: LayerId,
    /// Display name.
    pub name: String,
    /// Number of features, if reported by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_count: Option<usize>,
}

/// Way of traveling used to build a route layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TravelMode {
    /// On foot.
    Walking,
    /// By car.
    Driving,
    /// By bicycle.
    Cycling,
}

impl TravelMode {
    /// Name of the mode in backend requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Walking => "walking",
            TravelMode::Driving => "driving",
            TravelMode::Cycling => "cycling",
        }
    }
}

/// Layers the backend builds from external data sources on request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetLayer {
    /// Air quality measurement stations.
    AirQuality,
    /// Weather observations.
    Weather,
    /// Bike and scooter sharing stations.
    Gbfs,
    /// Route for the given travel mode.
    Route(TravelMode),
}

impl PresetLayer {
    /// Type of the layer in backend requests.
    pub fn kind(&self) -> &'static str {
        match self {
            PresetLayer::AirQuality => "airquality",
            PresetLayer::Weather => "weather",
            PresetLayer::Gbfs => "gbfs",
            PresetLayer::Route(_) => "route",
        }
    }

    /// Id of the layer. Environmental layers use the `env_` prefix, transport layers the `trans_`
    /// prefix.
    pub fn id(&self) -> LayerId {
        match self {
            PresetLayer::AirQuality | PresetLayer::Weather => format!("env_{}", self.kind()),
            PresetLayer::Gbfs => format!("trans_{}", self.kind()),
            PresetLayer::Route(mode) => format!("trans_{}_{}", self.kind(), mode.as_str()),
        }
        .into()
    }

    /// Display name of the layer.
    pub fn title(&self) -> String {
        match self {
            PresetLayer::AirQuality => "Air quality".to_string(),
            PresetLayer::Weather => "Weather".to_string(),
            PresetLayer::Gbfs => "Bike and scooter stations".to_string(),
            PresetLayer::Route(mode) => format!("Route ({})", mode.as_str()),
        }
    }

    pub(crate) fn query(&self) -> Vec<(&'static str, &'static str)> {
        let mut query = vec![("type", self.kind())];
        if let PresetLayer::Route(mode) = self {
            query.push(("mode", mode.as_str()));
        }

        query
    }
}

/// Layer that can be fetched from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerSource {
    /// Layer previously stored in the backend.
    Stored(LayerSummary),
    /// Layer built by the backend from an external source.
    Preset(PresetLayer),
}

impl LayerSource {
    /// Id the fetched layer gets in the store.
    pub fn id(&self) -> LayerId {
        match self {
            LayerSource::Stored(summary) => summary.id.clone(),
            LayerSource::Preset(preset) => preset.id(),
        }
    }

    /// Display name of the fetched layer.
    pub fn name(&self) -> String {
        match self {
            LayerSource::Stored(summary) => summary.name.clone(),
            LayerSource::Preset(preset) => preset.title(),
        }
    }
}

/// Remote storage of layers.
#[async_trait]
pub trait LayerBackend: Send + Sync {
    /// Lists layers stored in the backend.
    async fn list_layers(&self) -> Result<Vec<LayerSummary>, LayerError>;
    /// Fetches features of the layer.
    async fn fetch_layer(&self, source: &LayerSource) -> Result<FeatureCollection, LayerError>;
    /// Stores a new layer, returning its description.
    async fn upload_layer(
        &self,
        name: &str,
        features: &FeatureCollection,
    ) -> Result<LayerSummary, LayerError>;
    /// Deletes the stored layer.
    async fn delete_layer(&self, id: &LayerId) -> Result<(), LayerError>;
}
