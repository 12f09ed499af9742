use crate::math::Vec2;

/// Flat string property bag, in source order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Properties {
    pub pairs: Vec<(String, String)>,
}

impl Properties {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A polygon boundary with its properties.
///
/// `rings[0]` is the outer ring; further rings are holes and are carried
/// only so ingest stays lossless. Rings are stored closed (first == last)
/// when the source closed them.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: Option<String>,
    pub rings: Vec<Vec<Vec2>>,
    pub properties: Properties,
}

impl Feature {
    pub fn new(rings: Vec<Vec<Vec2>>, properties: Properties) -> Self {
        Self {
            id: None,
            rings,
            properties,
        }
    }

    pub fn outer_ring(&self) -> &[Vec2] {
        self.rings.first().map(Vec::as_slice).unwrap_or(&[])
    }
}
