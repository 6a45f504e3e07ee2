//! Configuration of the analysis and of the backend connection.
//!
//! Both configurations can be deserialized (all fields are optional and fall back to their
//! defaults) or built in code:
//!
//! ```
//! use layerscope::AnalysisConfig;
//!
//! let config = AnalysisConfig::default()
//!     .with_buffer_radius(500.0)
//!     .with_circle_steps(32);
//! assert!(config.validate().is_ok());
//! ```

use layerscope_types::geo::geodesic::{DEFAULT_CIRCLE_STEPS, MIN_CIRCLE_STEPS};
use serde::{Deserialize, Serialize};

use crate::analysis::{BufferEngine, ComparisonEngine, DEFAULT_THRESHOLD_M};
use crate::error::{check_distance, LayerError};

/// Parameters of the buffer and comparison analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Buffer radius in meters used when a buffer request does not specify one.
    pub buffer_radius_m: f64,
    /// Proximity threshold in meters used when a comparison request does not specify one.
    pub comparison_threshold_m: f64,
    /// Number of vertices of buffer boundary polygons.
    pub circle_steps: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            buffer_radius_m: 1_000.0,
            comparison_threshold_m: DEFAULT_THRESHOLD_M,
            circle_steps: DEFAULT_CIRCLE_STEPS,
        }
    }
}

impl AnalysisConfig {
    /// Sets the default buffer radius.
    pub fn with_buffer_radius(mut self, radius_m: f64) -> Self {
        self.buffer_radius_m = radius_m;
        self
    }

    /// Sets the default comparison threshold.
    pub fn with_comparison_threshold(mut self, threshold_m: f64) -> Self {
        self.comparison_threshold_m = threshold_m;
        self
    }

    /// Sets the number of vertices of buffer boundaries.
    pub fn with_circle_steps(mut self, steps: usize) -> Self {
        self.circle_steps = steps;
        self
    }

    /// Checks that distances are finite non-negative numbers and that boundary polygons have at
    /// least three vertices.
    pub fn validate(&self) -> Result<(), LayerError> {
        check_distance("buffer_radius_m", self.buffer_radius_m)?;
        check_distance("comparison_threshold_m", self.comparison_threshold_m)?;

        if self.circle_steps < MIN_CIRCLE_STEPS {
            return Err(LayerError::InvalidParameter {
                name: "circle_steps",
                value: self.circle_steps as f64,
            });
        }

        Ok(())
    }

    /// Buffer engine with the configured boundary resolution.
    pub fn buffer_engine(&self) -> BufferEngine {
        BufferEngine::new(self.circle_steps)
    }

    /// Comparison engine with the given threshold, or the configured one if `None`.
    pub fn comparison_engine(&self, threshold_m: Option<f64>) -> ComparisonEngine {
        ComparisonEngine::new(threshold_m.unwrap_or(self.comparison_threshold_m))
    }
}

/// Connection parameters of the layer backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base url of the backend API.
    pub base_url: String,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            user_agent: concat!("layerscope/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl BackendConfig {
    /// Creates a configuration for the backend at the given url.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}
