//! Runtime configuration, loaded from JSON.
//!
//! ```json
//! { "layout": { "kind": "grid", "columns": 3 } }
//! ```
//!
//! Every field is optional; omitted values fall back to the layout's defaults.

use crate::assembler::{GridLayout, Layout, PipelineLayout};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedflowConfig {
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    #[default]
    Grid,
    Pipeline,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub kind: LayoutKind,
    /// Grid only.
    pub columns: Option<usize>,
    pub spacing_x: Option<f64>,
    /// Grid only.
    pub spacing_y: Option<f64>,
    pub origin_x: Option<f64>,
    pub origin_y: Option<f64>,
}

impl LayoutConfig {
    pub fn build_layout(&self) -> Box<dyn Layout> {
        match self.kind {
            LayoutKind::Grid => {
                let defaults = GridLayout::default();
                Box::new(GridLayout {
                    columns: self.columns.unwrap_or(defaults.columns),
                    spacing_x: self.spacing_x.unwrap_or(defaults.spacing_x),
                    spacing_y: self.spacing_y.unwrap_or(defaults.spacing_y),
                    origin_x: self.origin_x.unwrap_or(defaults.origin_x),
                    origin_y: self.origin_y.unwrap_or(defaults.origin_y),
                })
            }
            LayoutKind::Pipeline => {
                let defaults = PipelineLayout::default();
                Box::new(PipelineLayout {
                    spacing_x: self.spacing_x.unwrap_or(defaults.spacing_x),
                    origin_x: self.origin_x.unwrap_or(defaults.origin_x),
                    y: self.origin_y.unwrap_or(defaults.y),
                })
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == Some(0) {
            return Err(ConfigError::Invalid("layout.columns must be at least 1".to_string()));
        }
        let spacings = [("layout.spacing_x", self.spacing_x), ("layout.spacing_y", self.spacing_y)];
        for (name, value) in spacings {
            if let Some(v) = value {
                if !v.is_finite() || v <= 0.0 {
                    return Err(ConfigError::Invalid(format!(
                        "{} must be a positive number, got {}",
                        name, v
                    )));
                }
            }
        }
        Ok(())
    }
}

impl MedflowConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MedflowConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.layout.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }
}
