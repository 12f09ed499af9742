//! Boundary label placement.
//!
//! A pass turns a feature batch plus a viewport snapshot into a flat
//! [`LabelSet`]: every polygon is simplified, clipped to the visible bounds,
//! split into edges ranked longest first, and the longest edges that are
//! long enough on screen each get one or more labels along them. Passes are
//! pure: nothing is cached between them and input features are never
//! touched.

pub mod assemble;
pub mod config;
pub mod edges;
pub mod placement;

use foundation::math::Vec2;
use serde::Serialize;

pub use assemble::{assemble, feature_anchors};
pub use config::{ConfigError, PlacementConfig, PlacementMode};
pub use edges::{Edge, rank_edges};
pub use placement::{LabelAnchor, label_count, place_labels, qualifies, walk_edges};

/// One placed label, as handed to the text renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelRecord {
    /// Display name of the source feature; `None` when the feature has none.
    pub text: Option<String>,
    /// Geographic `[lon, lat]`.
    pub position: Vec2,
    /// Rotation in degrees, counter-clockwise from the X axis.
    pub angle: f64,
    /// Priority hint for the renderer's collision pass.
    pub weight: f64,
}

/// Labels of one layer for one (features, viewport) generation.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LabelSet {
    pub labels: Vec<LabelRecord>,
}

impl LabelSet {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LabelRecord> {
        self.labels.iter()
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = &'a LabelRecord;
    type IntoIter = std::slice::Iter<'a, LabelRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter()
    }
}
