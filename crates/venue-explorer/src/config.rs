//! Configuration for an explorer session.
//!
//! Options are set through a builder and validated on `build()`. The same
//! struct deserializes from JSON so a shell can keep its settings in a file.

use crate::error::{ExplorerError, Result, ResultExt};
use crate::presentation::MapView;
use crate::types::TopN;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for an [`Explorer`](crate::Explorer).
///
/// # Example
///
/// ```rust,ignore
/// use venue_explorer::{ExplorerConfig, TopN};
///
/// let config = ExplorerConfig::builder()
///     .default_top_n(TopN::try_from(10)?)
///     .name_ranking_size(5)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Region ranking size used when a query does not choose one.
    /// Default: 15
    pub default_top_n: TopN,

    /// Number of postcode prefixes in the postcode ranking.
    /// Default: 10
    pub postcode_ranking_size: usize,

    /// Number of venue names in the name ranking.
    /// Default: 10
    pub name_ranking_size: usize,

    /// Initial map zoom level (0 - 22).
    /// Default: 10.0
    pub map_zoom: f64,

    /// Map height in pixels.
    /// Default: 500
    pub map_height: u32,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            default_top_n: TopN::default(),
            postcode_ranking_size: 10,
            name_ranking_size: 10,
            map_zoom: 10.0,
            map_height: 500,
        }
    }
}

impl ExplorerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ExplorerConfigBuilder {
        ExplorerConfigBuilder::default()
    }

    /// Read and validate a JSON configuration file. Missing fields take their
    /// defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(ExplorerError::from)
            .context(format!("Reading config file {}", path.display()))?;
        let config: ExplorerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> std::result::Result<(), ConfigValidationError> {
        if self.postcode_ranking_size == 0 {
            return Err(ConfigValidationError::InvalidRankingSize {
                field: "postcode_ranking_size".to_string(),
            });
        }

        if self.name_ranking_size == 0 {
            return Err(ConfigValidationError::InvalidRankingSize {
                field: "name_ranking_size".to_string(),
            });
        }

        if !(0.0..=22.0).contains(&self.map_zoom) {
            return Err(ConfigValidationError::InvalidZoom(self.map_zoom));
        }

        if self.map_height == 0 {
            return Err(ConfigValidationError::InvalidMapHeight);
        }

        Ok(())
    }

    /// Map hints for the render sink.
    pub fn map_view(&self) -> MapView {
        MapView {
            zoom: self.map_zoom,
            height: self.map_height,
        }
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid ranking size for '{field}': must be at least 1")]
    InvalidRankingSize { field: String },

    #[error("Invalid map zoom: {0} (must be between 0 and 22)")]
    InvalidZoom(f64),

    #[error("Invalid map height: must be at least 1 pixel")]
    InvalidMapHeight,
}

impl From<ConfigValidationError> for ExplorerError {
    fn from(err: ConfigValidationError) -> Self {
        ExplorerError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`ExplorerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ExplorerConfigBuilder {
    default_top_n: Option<TopN>,
    postcode_ranking_size: Option<usize>,
    name_ranking_size: Option<usize>,
    map_zoom: Option<f64>,
    map_height: Option<u32>,
}

impl ExplorerConfigBuilder {
    /// Start from an existing configuration instead of the defaults.
    pub fn from_config(config: &ExplorerConfig) -> Self {
        Self {
            default_top_n: Some(config.default_top_n),
            postcode_ranking_size: Some(config.postcode_ranking_size),
            name_ranking_size: Some(config.name_ranking_size),
            map_zoom: Some(config.map_zoom),
            map_height: Some(config.map_height),
        }
    }

    pub fn default_top_n(mut self, top_n: TopN) -> Self {
        self.default_top_n = Some(top_n);
        self
    }

    pub fn postcode_ranking_size(mut self, size: usize) -> Self {
        self.postcode_ranking_size = Some(size);
        self
    }

    pub fn name_ranking_size(mut self, size: usize) -> Self {
        self.name_ranking_size = Some(size);
        self
    }

    pub fn map_zoom(mut self, zoom: f64) -> Self {
        self.map_zoom = Some(zoom);
        self
    }

    pub fn map_height(mut self, height: u32) -> Self {
        self.map_height = Some(height);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ExplorerConfig` or an error if validation fails.
    pub fn build(self) -> std::result::Result<ExplorerConfig, ConfigValidationError> {
        let defaults = ExplorerConfig::default();
        let config = ExplorerConfig {
            default_top_n: self.default_top_n.unwrap_or(defaults.default_top_n),
            postcode_ranking_size: self
                .postcode_ranking_size
                .unwrap_or(defaults.postcode_ranking_size),
            name_ranking_size: self.name_ranking_size.unwrap_or(defaults.name_ranking_size),
            map_zoom: self.map_zoom.unwrap_or(defaults.map_zoom),
            map_height: self.map_height.unwrap_or(defaults.map_height),
        };

        config.validate()?;
        Ok(config)
    }
}
