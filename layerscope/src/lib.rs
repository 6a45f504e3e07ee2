//! Layerscope keeps a set of GeoJSON point layers shown on a map and runs two kinds of proximity
//! analysis over them on the client:
//!
//! * **buffer** finds all point features within a radius of a focal point, sorted by distance;
//! * **comparison** finds all pairs of points from two layers that are closer to each other than a
//!   threshold.
//!
//! # Quick start
//!
//! ```no_run
//! use layerscope::backend::{HttpLayerBackend, LayerLoader, LayerSource, PresetLayer};
//! use layerscope::{BackendConfig, LayerStore};
//! use layerscope::layerscope_types::lonlat;
//!
//! # tokio_test::block_on(async {
//! let loader = LayerLoader::new(HttpLayerBackend::new(&BackendConfig::default())?);
//! let mut store = LayerStore::default();
//!
//! let stations = loader
//!     .load_into(&mut store, &LayerSource::Preset(PresetLayer::Gbfs))
//!     .await?;
//! let sensors = loader
//!     .load_into(&mut store, &LayerSource::Preset(PresetLayer::AirQuality))
//!     .await?;
//!
//! let buffers = store.buffer(&lonlat!(-74.006, 40.7128), Some(500.0))?;
//! let pairs = store.compare(&stations, &sensors, None)?;
//! # Ok::<(), layerscope::LayerError>(())
//! # });
//! ```
//!
//! # Main components
//!
//! * [`feature`] - point features with open GeoJSON properties and their collections.
//! * [`analysis`] - the buffer and comparison engines. They are pure functions of their input and
//!   can be used without the rest of the crate.
//! * [`layer`] - layers, their provenance and the [`LayerStore`] that keeps the layers shown on
//!   the map and the analysis results (derived layers).
//! * [`backend`] - loading layers from the backend that stores them.
//!
//! All distances are great-circle distances in meters on a spherical Earth, see
//! [`layerscope_types::geo::geodesic`].

pub mod analysis;
pub mod backend;
pub mod config;
pub mod error;
pub mod feature;
pub mod layer;
mod messenger;

pub use config::{AnalysisConfig, BackendConfig};
pub use error::LayerError;
pub use layer::{Layer, LayerId, LayerStore};
pub use layerscope_types;
pub use messenger::{DummyMessenger, Messenger};
