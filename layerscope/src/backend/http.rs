use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};

use super::{LayerBackend, LayerSource, LayerSummary};
use crate::config::BackendConfig;
use crate::error::LayerError;
use crate::feature::FeatureCollection;
use crate::layer::LayerId;

const LAYERS_PATH: &str = "layers";
const PRESET_PATH: &str = "getLayer";

/// Layer backend accessed over HTTP.
#[derive(Debug, Clone)]
pub struct HttpLayerBackend {
    http_client: Client,
    base_url: Url,
}

impl HttpLayerBackend {
    /// Creates a client for the backend described by the configuration.
    pub fn new(config: &BackendConfig) -> Result<Self, LayerError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|err| LayerError::Generic(format!("invalid backend url: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(LayerError::Generic(format!(
                "invalid backend url: {}",
                config.base_url
            )));
        }

        let http_client = Client::builder().user_agent(&config.user_agent).build()?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Base url of the backend.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        url
    }

    fn layer_url(&self, id: &LayerId) -> Url {
        self.url(&[LAYERS_PATH, id.as_str()])
    }

    async fn send(&self, request: RequestBuilder, resource: &str) -> Result<Bytes, LayerError> {
        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            log::warn!("Backend resource {resource} not found");
            return Err(LayerError::NotFound(resource.to_string()));
        }

        if !status.is_success() {
            log::warn!(
                "Failed to load {resource}: {status}, {:?}",
                response.text().await
            );
            return Err(LayerError::Network);
        }

        Ok(response.bytes().await?)
    }
}

#[async_trait]
impl LayerBackend for HttpLayerBackend {
    async fn list_layers(&self) -> Result<Vec<LayerSummary>, LayerError> {
        let url = self.url(&[LAYERS_PATH]);
        log::trace!("Requesting layer list from {url}");

        let bytes = self
            .send(self.http_client.get(url), "layer list")
            .await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn fetch_layer(&self, source: &LayerSource) -> Result<FeatureCollection, LayerError> {
        let request = match source {
            LayerSource::Stored(summary) => self.http_client.get(self.layer_url(&summary.id)),
            LayerSource::Preset(preset) => self
                .http_client
                .get(self.url(&[PRESET_PATH]))
                .query(&preset.query()),
        };

        let id = source.id();
        let bytes = self.send(request, id.as_str()).await?;
        let features = FeatureCollection::from_slice(&bytes)?;

        log::info!("Loaded layer {id} with {} features", features.len());
        Ok(features)
    }

    async fn upload_layer(
        &self,
        name: &str,
        features: &FeatureCollection,
    ) -> Result<LayerSummary, LayerError> {
        let body = serde_json::to_vec(features)?;
        let request = self
            .http_client
            .request(Method::POST, self.url(&[LAYERS_PATH]))
            .query(&[("name", name)])
            .header(reqwest::header::CONTENT_TYPE, "application/geo+json")
            .body(body);

        let bytes = self.send(request, name).await?;
        let summary: LayerSummary = serde_json::from_slice(&bytes)?;

        log::info!("Uploaded layer {name} as {}", summary.id);
        Ok(summary)
    }

    async fn delete_layer(&self, id: &LayerId) -> Result<(), LayerError> {
        self.send(self.http_client.delete(self.layer_url(id)), id.as_str())
            .await?;

        log::info!("Deleted layer {id}");
        Ok(())
    }
}
