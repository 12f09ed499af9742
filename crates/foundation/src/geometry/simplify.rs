//! Ring simplification.
//!
//! Two passes, as in the common slippy-map toolchains: a radial-distance
//! pre-pass drops vertices crowding their predecessor, then Douglas-Peucker
//! removes vertices within `tolerance` of the chord between their kept
//! neighbours. Distances are compared squared.

use crate::math::Vec2;

use super::close_ring;

/// Each retry shrinks the tolerance by 1%; 512 retries reach ~0.6% of it.
const MAX_TOLERANCE_RETRIES: usize = 512;
const MIN_RING_AREA: f64 = 1e-18;

/// Simplifies an open polyline. Lines with two or fewer points are returned as-is.
pub fn simplify_line(points: &[Vec2], tolerance: f64) -> Vec<Vec2> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let sq_tolerance = tolerance * tolerance;
    let reduced = radial_distance(points, sq_tolerance);
    douglas_peucker(&reduced, sq_tolerance)
}

/// Simplifies a closed polygon ring.
///
/// The result is closed and still a polygon (at least three distinct
/// vertices). When `tolerance` would collapse the ring it is shrunk by 1%
/// and the pass retried. Rings that cannot be simplified (fewer than four
/// points, zero area, non-finite input, or retries exhausted) are returned
/// unchanged.
pub fn simplify_ring(ring: &[Vec2], tolerance: f64) -> Vec<Vec2> {
    if ring.len() < 4 || !(tolerance > 0.0) || !ring.iter().all(|p| p.is_finite()) {
        return ring.to_vec();
    }
    if ring_area(ring).abs() < MIN_RING_AREA {
        return ring.to_vec();
    }

    let mut tolerance = tolerance;
    for _ in 0..MAX_TOLERANCE_RETRIES {
        let mut out = simplify_line(ring, tolerance);
        if is_polygon_ring(&out) {
            close_ring(&mut out);
            return out;
        }
        tolerance -= tolerance * 0.01;
    }
    ring.to_vec()
}

/// Shoelace area; positive for counter-clockwise rings.
pub fn ring_area(ring: &[Vec2]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        twice += a.x * b.y - b.x * a.y;
    }
    twice * 0.5
}

fn is_polygon_ring(ring: &[Vec2]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    // Closed triangle with two distinct vertices is a spike, not an area.
    !(ring.len() == 3 && ring[2] == ring[0])
}

fn radial_distance(points: &[Vec2], sq_tolerance: f64) -> Vec<Vec2> {
    let mut prev = 0;
    let mut out = vec![points[0]];
    for (i, p) in points.iter().enumerate().skip(1) {
        if p.distance_sq(points[prev]) > sq_tolerance {
            out.push(*p);
            prev = i;
        }
    }
    let last = points.len() - 1;
    if prev != last {
        out.push(points[last]);
    }
    out
}

fn douglas_peucker(points: &[Vec2], sq_tolerance: f64) -> Vec<Vec2> {
    let last = points.len() - 1;
    let mut out = vec![points[0]];
    dp_step(points, 0, last, sq_tolerance, &mut out);
    out.push(points[last]);
    out
}

fn dp_step(points: &[Vec2], first: usize, last: usize, sq_tolerance: f64, out: &mut Vec<Vec2>) {
    let mut max_sq = sq_tolerance;
    let mut index = first;

    for i in (first + 1)..last {
        let d = segment_distance_sq(points[i], points[first], points[last]);
        if d > max_sq {
            index = i;
            max_sq = d;
        }
    }

    if max_sq > sq_tolerance {
        if index - first > 1 {
            dp_step(points, first, index, sq_tolerance, out);
        }
        out.push(points[index]);
        if last - index > 1 {
            dp_step(points, index, last, sq_tolerance, out);
        }
    }
}

/// Squared distance from `p` to the segment `a-b` (to `a` when the segment is a point).
fn segment_distance_sq(p: Vec2, a: Vec2, b: Vec2) -> f64 {
    let mut closest = a;
    let d = b - a;
    if d.x != 0.0 || d.y != 0.0 {
        let t = ((p.x - a.x) * d.x + (p.y - a.y) * d.y) / (d.x * d.x + d.y * d.y);
        if t > 1.0 {
            closest = b;
        } else if t > 0.0 {
            closest = Vec2::new(a.x + d.x * t, a.y + d.y * t);
        }
    }
    p.distance_sq(closest)
}
