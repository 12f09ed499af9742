use foundation::Feature;
use foundation::bounds::Aabb2;
use foundation::geometry::{clip_ring, close_ring, simplify_ring};
use foundation::math::{Vec2, Viewport};
use tracing::{debug, trace, warn};

use super::config::{PlacementConfig, PlacementMode};
use super::edges::rank_edges;
use super::placement::{LabelAnchor, direction_deg, place_labels, walk_edges};
use super::{LabelRecord, LabelSet};

/// Runs one full label pass.
///
/// Records come out in feature order, then edge rank, then position along
/// the edge. Every record of a feature carries that feature's display name.
/// The result depends only on the arguments. Once `config.max_labels`
/// records exist the pass stops; the kept records are a prefix of the
/// uncapped result.
pub fn assemble<V: Viewport + ?Sized>(
    features: &[Feature],
    viewport: &V,
    config: &PlacementConfig,
) -> LabelSet {
    let bounds = viewport.bounds();
    let mut labels = Vec::new();
    let mut capped = false;

    for (index, feature) in features.iter().enumerate() {
        let remaining = config.max_labels.saturating_sub(labels.len());
        if remaining == 0 {
            capped = true;
            break;
        }
        let anchors = feature_anchors(feature.outer_ring(), viewport, &bounds, config);
        trace!(index, anchors = anchors.len(), "feature placed");
        if anchors.is_empty() {
            continue;
        }
        capped |= anchors.len() > remaining;

        let text = feature.properties.get(&config.name_key).map(str::to_string);
        labels.extend(anchors.into_iter().take(remaining).map(|anchor| LabelRecord {
            text: text.clone(),
            position: anchor.position,
            angle: anchor.angle,
            weight: config.label_weight,
        }));
    }

    if capped {
        warn!(max_labels = config.max_labels, "label cap reached, remaining anchors dropped");
    }
    debug!(
        features = features.len(),
        labels = labels.len(),
        zoom = viewport.zoom(),
        mode = ?config.mode,
        "assembled label set"
    );
    LabelSet { labels }
}

/// Anchors for a single outer ring: close it, simplify, clip to `bounds`,
/// rank edges, then place according to the configured mode.
///
/// An open ring is closed first, so its closing edge is a candidate whether
/// or not clipping is enabled.
pub fn feature_anchors<V: Viewport + ?Sized>(
    ring: &[Vec2],
    viewport: &V,
    bounds: &Aabb2,
    config: &PlacementConfig,
) -> Vec<LabelAnchor> {
    let mut outer = ring.to_vec();
    close_ring(&mut outer);
    let simplified = simplify_ring(&outer, config.simplify_tolerance);
    let visible = if config.clip_to_viewport {
        clip_ring(&simplified, bounds)
    } else {
        simplified
    };
    let edges = rank_edges(&visible);

    match config.mode {
        PlacementMode::Greedy => walk_edges(&edges, viewport, config.min_edge_px)
            .flat_map(|(edge, px)| place_labels(edge, px, config))
            .take(config.max_labels)
            .collect(),
        PlacementMode::LongestEdge => edges
            .first()
            .map(|edge| LabelAnchor {
                position: edge.midpoint(),
                angle: direction_deg(edge),
            })
            .into_iter()
            .collect(),
    }
}
