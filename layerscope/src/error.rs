//! Error types used by the crate.

use thiserror::Error;

/// Layerscope error type.
///
/// The analysis engines never fail: malformed features are skipped and empty inputs produce empty
/// results. These errors come from the layer store and the backend and are meant to be shown to
/// the user.
#[derive(Debug, Error)]
pub enum LayerError {
    /// Backend could not be reached or returned an unsuccessful response.
    #[error("failed to load data")]
    Network,
    /// Layer or backend resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// Error decoding data received from the backend.
    #[error("failed to decode data: {0}")]
    Decoding(String),
    /// Analysis was requested, but no layer is active.
    #[error("no active layers selected")]
    NoActiveLayers,
    /// Comparison needs at least two layers.
    #[error("at least two layers are required for comparison, {available} available")]
    NotEnoughLayers {
        /// Number of data layers in the store.
        available: usize,
    },
    /// Numeric parameter is not a finite non-negative number.
    #[error("invalid value of {name}: {value}")]
    InvalidParameter {
        /// Name of the parameter.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Request was superseded by a newer one before it completed.
    #[error("request was cancelled")]
    Cancelled,
    /// Generic error - details are inside.
    #[error("{0}")]
    Generic(String),
}

impl From<reqwest::Error> for LayerError {
    fn from(value: reqwest::Error) -> Self {
        log::warn!("Backend request failed: {value}");
        Self::Network
    }
}

impl From<serde_json::Error> for LayerError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decoding(value.to_string())
    }
}

/// Checks that a distance parameter (radius or threshold) is a finite non-negative number.
pub(crate) fn check_distance(name: &'static str, value: f64) -> Result<f64, LayerError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(LayerError::InvalidParameter { name, value })
    }
}
