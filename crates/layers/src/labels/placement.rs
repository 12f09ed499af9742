use foundation::math::{Vec2, Viewport};

use super::config::PlacementConfig;
use super::edges::Edge;

/// Below this `|dx|` an edge is treated as vertical.
pub const VERTICAL_EPSILON: f64 = 1e-12;

/// Where one label goes on an edge.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LabelAnchor {
    pub position: Vec2,
    /// Degrees from the X axis.
    pub angle: f64,
}

/// On-screen length of `edge`.
pub fn pixel_length<V: Viewport + ?Sized>(edge: &Edge, viewport: &V) -> f64 {
    viewport.project(edge.start).distance(viewport.project(edge.end))
}

/// Screen-space acceptance of one edge of the ranked walk.
///
/// The first edge of a walk is always accepted so every visible polygon gets
/// a label; later edges need strictly more than `min_edge_px`.
pub fn qualifies<V: Viewport + ?Sized>(
    edge: &Edge,
    viewport: &V,
    min_edge_px: f64,
    first: bool,
) -> (f64, bool) {
    let px = pixel_length(edge, viewport);
    (px, first || px > min_edge_px)
}

/// Walks ranked edges, yielding accepted edges with their pixel length.
///
/// The walk ends at the first rejected edge. Screen length is not monotonic
/// in geographic length, so a later edge may be longer on screen; it is still
/// not considered. Edges after the stop are never projected.
pub fn walk_edges<'a, V: Viewport + ?Sized>(
    edges: &'a [Edge],
    viewport: &'a V,
    min_edge_px: f64,
) -> impl Iterator<Item = (&'a Edge, f64)> + 'a {
    edges
        .iter()
        .enumerate()
        .map(move |(i, edge)| (edge, qualifies(edge, viewport, min_edge_px, i == 0)))
        .take_while(|(_, (_, accepted))| *accepted)
        .map(|(edge, (px, _))| (edge, px))
}

/// Labels carried by an edge `pixel_length` pixels long on screen.
pub fn label_count(pixel_length: f64, config: &PlacementConfig) -> usize {
    if pixel_length > config.multi_label_min_px {
        ((pixel_length / config.label_spacing_px).floor() as usize).max(1)
    } else {
        1
    }
}

/// Evenly spaced anchors strictly between the edge endpoints, at
/// `t = k / (count + 1)` from `start`, all sharing the edge inclination.
/// At most `config.max_labels` anchors are produced.
pub fn place_labels(edge: &Edge, pixel_length: f64, config: &PlacementConfig) -> Vec<LabelAnchor> {
    let count = label_count(pixel_length, config).min(config.max_labels);
    let angle = inclination_deg(edge);
    let denom = (count + 1) as f64;
    (1..=count)
        .map(|k| LabelAnchor {
            position: edge.start.lerp(edge.end, k as f64 / denom),
            angle,
        })
        .collect()
}

/// Edge inclination in degrees, `atan(dy / dx)` with `dx = x1 - x2`,
/// `dy = y1 - y2`.
///
/// This is the half-range arctangent, so the result lies in (-90, 90] and
/// the edge direction is discarded: text never renders upside down, but
/// opposite edges get the same angle. Near-vertical edges (and degenerate
/// zero-length ones) return 90.
pub fn inclination_deg(edge: &Edge) -> f64 {
    let dx = edge.start.x - edge.end.x;
    let dy = edge.start.y - edge.end.y;
    if dx.abs() < VERTICAL_EPSILON {
        return 90.0;
    }
    (dy / dx).atan().to_degrees()
}

/// Full-range inclination, `atan2(dy, dx)` with the same deltas as
/// [`inclination_deg`]. Used by [`PlacementMode::LongestEdge`].
///
/// [`PlacementMode::LongestEdge`]: super::PlacementMode::LongestEdge
pub fn direction_deg(edge: &Edge) -> f64 {
    let dx = edge.start.x - edge.end.x;
    let dy = edge.start.y - edge.end.y;
    dy.atan2(dx).to_degrees()
}
