use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("placement config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid placement config: {0}")]
    Invalid(String),
}

/// How edges are turned into labels.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlacementMode {
    /// Walk edges longest first while they stay long on screen; long edges
    /// get several labels. Angles use the half-range `atan`.
    #[default]
    Greedy,
    /// One label at the midpoint of the longest edge, angle from `atan2`.
    LongestEdge,
}

/// Tunables of a label pass. Any field missing from a JSON document keeps
/// its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub mode: PlacementMode,
    /// Simplification tolerance in geographic units (degrees).
    pub simplify_tolerance: f64,
    pub clip_to_viewport: bool,
    /// Edges after the first need strictly more than this many pixels.
    pub min_edge_px: f64,
    /// Edges strictly longer than this get more than one label.
    pub multi_label_min_px: f64,
    /// One label per this many pixels on multi-label edges.
    pub label_spacing_px: f64,
    pub label_weight: f64,
    /// Feature property holding the display name.
    pub name_key: String,
    /// Upper bound on the records of one pass; anchors past it are dropped.
    pub max_labels: usize,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            mode: PlacementMode::Greedy,
            simplify_tolerance: 0.01,
            clip_to_viewport: true,
            min_edge_px: 100.0,
            multi_label_min_px: 400.0,
            label_spacing_px: 200.0,
            label_weight: 1.0,
            name_key: "provider_short_name".to_string(),
            max_labels: 10_000,
        }
    }
}

impl PlacementConfig {
    pub fn from_json_str(payload: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(payload)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("simplify_tolerance", self.simplify_tolerance),
            ("min_edge_px", self.min_edge_px),
            ("multi_label_min_px", self.multi_label_min_px),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }
        if !self.label_spacing_px.is_finite() || self.label_spacing_px <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "label_spacing_px must be positive (got {})",
                self.label_spacing_px
            )));
        }
        if !self.label_weight.is_finite() {
            return Err(ConfigError::Invalid("label_weight must be finite".to_string()));
        }
        if self.max_labels == 0 {
            return Err(ConfigError::Invalid("max_labels must be at least 1".to_string()));
        }
        Ok(())
    }
}
