use layerscope_types::geo::GeoPoint2d;

use crate::analysis::{pair_markers, sort_by_distance, BufferResult, ComparisonPair};
use crate::config::AnalysisConfig;
use crate::error::{check_distance, LayerError};
use crate::layer::{Layer, LayerId};
use crate::messenger::Messenger;

/// Collection of layers shown on the map.
///
/// Layers are kept in the order they were added, which is also the order they are drawn in. Each
/// layer can be switched on and off with [`LayerStore::set_active`] or [`LayerStore::toggle`];
/// inactive layers keep their place in the store, but are not drawn and do not take part in the
/// buffer analysis.
///
/// Analysis results are added to the store as derived layers. Running the same analysis again
/// replaces the previous result.
pub struct LayerStore {
    entries: Vec<LayerEntry>,
    config: AnalysisConfig,
    messenger: Option<Box<dyn Messenger>>,
}

struct LayerEntry {
    layer: Layer,
    is_active: bool,
}

impl Default for LayerStore {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl LayerStore {
    /// Creates an empty store.
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            entries: vec![],
            config,
            messenger: None,
        }
    }

    /// Sets a [messenger](Messenger) that is notified every time the layers change.
    pub fn with_messenger(mut self, messenger: impl Messenger + 'static) -> Self {
        self.messenger = Some(Box::new(messenger));
        self
    }

    /// Analysis configuration of the store.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Number of layers in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store has no layers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the layer with the given id.
    pub fn get(&self, id: &LayerId) -> Option<&Layer> {
        self.position(id).map(|index| &self.entries[index].layer)
    }

    /// Returns true if the store has a layer with the given id.
    pub fn contains(&self, id: &LayerId) -> bool {
        self.position(id).is_some()
    }

    /// Iterates over all layers in drawing order.
    pub fn layers(&self) -> impl Iterator<Item = &Layer> + '_ {
        self.entries.iter().map(|entry| &entry.layer)
    }

    /// Iterates over active layers in drawing order.
    pub fn active_layers(&self) -> impl Iterator<Item = &Layer> + '_ {
        self.entries
            .iter()
            .filter(|entry| entry.is_active)
            .map(|entry| &entry.layer)
    }

    /// Iterates over layers that hold source data (not analysis results).
    pub fn data_layers(&self) -> impl Iterator<Item = &Layer> + '_ {
        self.layers().filter(|layer| !layer.is_derived())
    }

    /// Adds the layer to the store and makes it active.
    ///
    /// If a layer with the same id is already in the store, it is replaced in place, keeping its
    /// position and active state, and the old layer is returned.
    pub fn insert(&mut self, layer: Layer) -> Option<Layer> {
        let replaced = match self.position(layer.id()) {
            Some(index) => {
                log::debug!("Replacing layer {}", layer.id());
                Some(std::mem::replace(&mut self.entries[index].layer, layer))
            }
            None => {
                log::debug!("Adding layer {}", layer.id());
                self.entries.push(LayerEntry {
                    layer,
                    is_active: true,
                });
                None
            }
        };

        self.request_redraw();
        replaced
    }

    /// Removes the layer and all layers derived from it.
    pub fn remove(&mut self, id: &LayerId) -> Option<Layer> {
        let index = self.position(id)?;
        let removed = self.entries.remove(index).layer;

        let before = self.entries.len();
        self.entries
            .retain(|entry| !entry.layer.provenance().derives_from(id));
        log::debug!(
            "Removed layer {id} and {} derived layers",
            before - self.entries.len()
        );

        self.request_redraw();
        Some(removed)
    }

    /// Removes all analysis results from the store. Returns the number of removed layers.
    pub fn clear_derived(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| !entry.layer.is_derived());

        let removed = before - self.entries.len();
        if removed > 0 {
            self.request_redraw();
        }

        removed
    }

    /// Switches the layer on or off.
    pub fn set_active(&mut self, id: &LayerId, is_active: bool) -> Result<(), LayerError> {
        let index = self.position_or_err(id)?;
        if self.entries[index].is_active != is_active {
            self.entries[index].is_active = is_active;
            self.request_redraw();
        }

        Ok(())
    }

    /// Flips the active state of the layer. Returns the new state.
    pub fn toggle(&mut self, id: &LayerId) -> Result<bool, LayerError> {
        let index = self.position_or_err(id)?;
        let entry = &mut self.entries[index];
        entry.is_active = !entry.is_active;
        let is_active = entry.is_active;

        self.request_redraw();
        Ok(is_active)
    }

    /// Returns true if the layer is in the store and is active.
    pub fn is_active(&self, id: &LayerId) -> bool {
        self.position(id)
            .is_some_and(|index| self.entries[index].is_active)
    }

    /// Searches point features of every active data layer within `radius_m` meters of the
    /// `center`. If the radius is `None`, the configured one is used.
    ///
    /// For every searched layer a derived `{id}_buffer` layer with the found points and the
    /// boundary circle is added to the store. Results are returned in the order of the layers.
    pub fn buffer(
        &mut self,
        center: &GeoPoint2d,
        radius_m: Option<f64>,
    ) -> Result<Vec<BufferResult>, LayerError> {
        let radius_m = check_distance(
            "radius_m",
            radius_m.unwrap_or(self.config.buffer_radius_m),
        )?;

        let engine = self.config.buffer_engine();
        let overlays: Vec<(Layer, BufferResult)> = self
            .active_layers()
            .filter(|layer| !layer.is_derived())
            .map(|layer| {
                let result = engine.compute(center, radius_m, layer.features());
                (Layer::buffer(layer, result.to_collection()), result)
            })
            .collect();

        if overlays.is_empty() {
            return Err(LayerError::NoActiveLayers);
        }

        log::debug!(
            "Buffer of {radius_m} m around {center:?} computed for {} layers",
            overlays.len()
        );

        let mut results = Vec::with_capacity(overlays.len());
        for (overlay, result) in overlays {
            self.insert(overlay);
            results.push(result);
        }

        Ok(results)
    }

    /// Finds pairs of points from layers `a` and `b` within `threshold_m` meters of each other. If
    /// the threshold is `None`, the configured one is used.
    ///
    /// A derived `comparison_{a}_{b}` layer with a line for every pair is added to the store. The
    /// returned pairs are sorted closest first.
    pub fn compare(
        &mut self,
        a: &LayerId,
        b: &LayerId,
        threshold_m: Option<f64>,
    ) -> Result<Vec<ComparisonPair>, LayerError> {
        let available = self.data_layers().count();
        if available < 2 {
            return Err(LayerError::NotEnoughLayers { available });
        }

        let threshold_m = check_distance(
            "threshold_m",
            threshold_m.unwrap_or(self.config.comparison_threshold_m),
        )?;

        let layer_a = self.get_or_err(a)?;
        let layer_b = self.get_or_err(b)?;

        let mut pairs = self
            .config
            .comparison_engine(Some(threshold_m))
            .compare(layer_a.features(), layer_b.features())
            .pairs;
        sort_by_distance(&mut pairs);

        let overlay = Layer::comparison(layer_a, layer_b, pair_markers(&pairs));
        self.insert(overlay);

        Ok(pairs)
    }

    fn position(&self, id: &LayerId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.layer.id() == id)
    }

    fn position_or_err(&self, id: &LayerId) -> Result<usize, LayerError> {
        self.position(id)
            .ok_or_else(|| LayerError::NotFound(id.to_string()))
    }

    fn get_or_err(&self, id: &LayerId) -> Result<&Layer, LayerError> {
        self.get(id)
            .ok_or_else(|| LayerError::NotFound(id.to_string()))
    }

    fn request_redraw(&self) {
        if let Some(messenger) = &self.messenger {
            messenger.request_redraw();
        }
    }
}
