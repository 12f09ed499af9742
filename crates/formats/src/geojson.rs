//! GeoJSON ingest for boundary layers.
//!
//! Only polygonal features are kept. Points and lines carry no boundary to
//! label and are skipped; a MultiPolygon contributes its first polygon.

use std::path::{Path, PathBuf};

use foundation::math::Vec2;
use foundation::{Feature, Properties};
use serde_json::{Map, Value};
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected GeoJSON FeatureCollection")]
    NotAFeatureCollection,
    #[error("invalid feature at index {index}: {reason}")]
    InvalidFeature { index: usize, reason: String },
}

/// Polygon features parsed from one FeatureCollection.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FeatureBatch {
    pub features: Vec<Feature>,
    /// Non-polygonal features dropped during ingest.
    pub skipped: usize,
}

impl FeatureBatch {
    pub fn read(path: impl AsRef<Path>) -> Result<Self, FormatError> {
        let path = path.as_ref();
        let payload = std::fs::read_to_string(path).map_err(|source| FormatError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_geojson_str(&payload)
    }

    pub fn from_geojson_str(payload: &str) -> Result<Self, FormatError> {
        let value: Value = serde_json::from_str(payload)?;
        Self::from_geojson_value(&value)
    }

    pub fn from_geojson_value(value: &Value) -> Result<Self, FormatError> {
        let obj = value.as_object().ok_or(FormatError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(FormatError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(FormatError::NotAFeatureCollection);
        }

        let features_val = obj
            .get("features")
            .and_then(|v| v.as_array())
            .ok_or(FormatError::NotAFeatureCollection)?;

        let mut batch = FeatureBatch {
            features: Vec::with_capacity(features_val.len()),
            skipped: 0,
        };
        for (index, feat_val) in features_val.iter().enumerate() {
            match parse_feature(feat_val)
                .map_err(|reason| FormatError::InvalidFeature { index, reason })?
            {
                Some(feature) => batch.features.push(feature),
                None => batch.skipped += 1,
            }
        }

        if batch.skipped > 0 {
            warn!(
                skipped = batch.skipped,
                kept = batch.features.len(),
                "skipped non-polygon features"
            );
        }
        debug!(features = batch.features.len(), "parsed feature batch");
        Ok(batch)
    }
}

fn parse_feature(value: &Value) -> Result<Option<Feature>, String> {
    let obj = value.as_object().ok_or("feature must be an object")?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("feature missing type")?;
    if ty != "Feature" {
        return Err(format!("unexpected feature type: {ty}"));
    }

    let id = match obj.get("id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    let properties = obj
        .get("properties")
        .and_then(|v| v.as_object())
        .map(flatten_properties)
        .unwrap_or_default();

    let geometry = obj.get("geometry").ok_or("feature missing geometry")?;
    let Some(rings) = parse_polygon_geometry(geometry)? else {
        return Ok(None);
    };

    Ok(Some(Feature {
        id,
        rings,
        properties,
    }))
}

fn flatten_properties(map: &Map<String, Value>) -> Properties {
    let mut pairs = Vec::with_capacity(map.len());
    for (k, v) in map {
        let text = match v {
            Value::Null => continue,
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            other => other.to_string(),
        };
        pairs.push((k.clone(), text));
    }
    Properties::new(pairs)
}

/// Rings of a Polygon or of a MultiPolygon's first part; `None` for other types.
fn parse_polygon_geometry(value: &Value) -> Result<Option<Vec<Vec<Vec2>>>, String> {
    if value.is_null() {
        return Ok(None);
    }
    let obj = value.as_object().ok_or("geometry must be an object")?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type")?;
    if matches!(
        ty,
        "Point" | "MultiPoint" | "LineString" | "MultiLineString" | "GeometryCollection"
    ) {
        return Ok(None);
    }
    let coords = obj.get("coordinates").ok_or("geometry missing coordinates")?;

    match ty {
        "Polygon" => parse_polygon(coords).map(Some),
        "MultiPolygon" => {
            let polys = coords
                .as_array()
                .ok_or("MultiPolygon coordinates must be an array of polygons")?;
            let Some(first) = polys.first() else {
                return Ok(Some(Vec::new()));
            };
            if polys.len() > 1 {
                debug!(parts = polys.len(), "using first part of MultiPolygon");
            }
            parse_polygon(first).map(Some)
        }
        other => Err(format!("unsupported geometry type: {other}")),
    }
}

fn parse_position(coords: &Value) -> Result<Vec2, String> {
    let arr = coords.as_array().ok_or("position must be an array")?;
    if arr.len() < 2 {
        return Err("position must have [lon, lat]".to_string());
    }
    let lon = arr[0].as_f64().ok_or("lon must be a number")?;
    let lat = arr[1].as_f64().ok_or("lat must be a number")?;
    Ok(Vec2::new(lon, lat))
}

fn parse_ring(coords: &Value) -> Result<Vec<Vec2>, String> {
    let arr = coords.as_array().ok_or("ring must be an array")?;
    arr.iter().map(parse_position).collect()
}

fn parse_polygon(coords: &Value) -> Result<Vec<Vec<Vec2>>, String> {
    let rings = coords
        .as_array()
        .ok_or("Polygon coordinates must be an array of rings")?;
    rings.iter().map(parse_ring).collect()
}

#[cfg(test)]
mod tests {
    use super::{FeatureBatch, FormatError};
    use foundation::math::Vec2;
    use pretty_assertions::assert_eq;

    const TWO_BOUNDARIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": 7,
                "properties": { "provider_short_name": "North", "cartodb_id": 1, "note": null },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0, 0], [2, 0], [2, 1], [0, 1], [0, 0]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "provider_short_name": "Pin" },
                "geometry": { "type": "Point", "coordinates": [1, 1] }
            },
            {
                "type": "Feature",
                "properties": { "provider_short_name": "Islands" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[5, 5], [6, 5], [6, 6], [5, 5]]],
                        [[[8, 8], [9, 8], [9, 9], [8, 8]]]
                    ]
                }
            }
        ]
    }"#;

    #[test]
    fn keeps_polygons_and_skips_points() {
        let batch = FeatureBatch::from_geojson_str(TWO_BOUNDARIES).expect("parse batch");
        assert_eq!(batch.features.len(), 2);
        assert_eq!(batch.skipped, 1);

        let north = &batch.features[0];
        assert_eq!(north.id.as_deref(), Some("7"));
        assert_eq!(north.properties.get("provider_short_name"), Some("North"));
        assert_eq!(north.properties.get("cartodb_id"), Some("1"));
        assert_eq!(north.properties.get("note"), None);
        assert_eq!(north.outer_ring().len(), 5);
        assert_eq!(north.outer_ring()[1], Vec2::new(2.0, 0.0));
    }

    #[test]
    fn multipolygon_uses_first_part() {
        let batch = FeatureBatch::from_geojson_str(TWO_BOUNDARIES).expect("parse batch");
        let islands = &batch.features[1];
        assert_eq!(islands.rings.len(), 1);
        assert_eq!(islands.outer_ring()[0], Vec2::new(5.0, 5.0));
    }

    #[test]
    fn rejects_non_collections() {
        let err = FeatureBatch::from_geojson_str(r#"{"type": "Feature"}"#).unwrap_err();
        assert!(matches!(err, FormatError::NotAFeatureCollection));
    }

    #[test]
    fn reports_index_of_bad_feature() {
        let payload = r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": {}, "geometry": null },
                { "type": "Feature", "properties": {},
                  "geometry": { "type": "Polygon", "coordinates": [[[0, 0], ["x", 1]]] } }
            ]
        }"#;
        let err = FeatureBatch::from_geojson_str(payload).unwrap_err();
        match err {
            FormatError::InvalidFeature { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("lon"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = FeatureBatch::from_geojson_str("{").unwrap_err();
        assert!(matches!(err, FormatError::Json(_)));
    }
}
