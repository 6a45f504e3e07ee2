use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use super::{LayerBackend, LayerSource, LayerSummary};
use crate::error::LayerError;
use crate::feature::FeatureCollection;
use crate::layer::{Layer, LayerId, LayerStore};

/// Loads layers from a [`LayerBackend`] into a [`LayerStore`].
///
/// Only the latest layer listing is of interest to the user, so when [`LayerLoader::list_layers`]
/// is called while a previous listing is still in flight, the previous one is cancelled and
/// resolves to [`LayerError::Cancelled`].
pub struct LayerLoader<B> {
    backend: B,
    listing: Mutex<ListingSlot>,
}

#[derive(Default)]
struct ListingSlot {
    generation: u64,
    token: Option<CancellationToken>,
}

impl<B: LayerBackend> LayerLoader<B> {
    /// Creates a new loader.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            listing: Mutex::new(ListingSlot::default()),
        }
    }

    /// Backend used by the loader.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Lists layers stored in the backend, cancelling the listing requested before, if it is not
    /// finished yet.
    pub async fn list_layers(&self) -> Result<Vec<LayerSummary>, LayerError> {
        let token = CancellationToken::new();
        let generation = {
            let mut slot = self.listing.lock();
            if let Some(previous) = slot.token.replace(token.clone()) {
                previous.cancel();
            }
            slot.generation += 1;
            slot.generation
        };

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => {
                log::warn!("Layer listing #{generation} was superseded by a newer request");
                Err(LayerError::Cancelled)
            }
            result = self.backend.list_layers() => result,
        };

        let mut slot = self.listing.lock();
        if slot.generation == generation {
            slot.token = None;
        }

        result
    }

    /// Fetches the layer from the backend and puts it into the store, replacing the layer with the
    /// same id if there is one. Returns the id of the layer.
    pub async fn load_into(
        &self,
        store: &mut LayerStore,
        source: &LayerSource,
    ) -> Result<LayerId, LayerError> {
        let features = self.backend.fetch_layer(source).await?;
        let id = source.id();

        log::debug!("Putting layer {id} with {} features into store", features.len());
        store.insert(Layer::persisted(id.clone(), source.name(), features));

        Ok(id)
    }

    /// Stores the features in the backend as a new layer and adds it to the store.
    pub async fn import_into(
        &self,
        store: &mut LayerStore,
        name: &str,
        features: FeatureCollection,
    ) -> Result<LayerId, LayerError> {
        let summary = self.backend.upload_layer(name, &features).await?;
        let id = summary.id.clone();

        store.insert(Layer::persisted(id.clone(), summary.name, features));

        Ok(id)
    }

    /// Deletes the layer from the backend, and then from the store together with its derived
    /// layers.
    pub async fn delete_from(&self, store: &mut LayerStore, id: &LayerId) -> Result<(), LayerError> {
        self.backend.delete_layer(id).await?;
        store.remove(id);

        Ok(())
    }
}
