use crate::bounds::Aabb2;
use crate::math::Vec2;

use super::close_ring;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Side {
    Left,
    Right,
    Bottom,
    Top,
}

const SIDES: [Side; 4] = [Side::Left, Side::Right, Side::Bottom, Side::Top];

/// Clips a closed ring to `bbox` (Sutherland-Hodgman, one bbox side at a time).
///
/// Crossings are interpolated onto the bbox sides, so a partially visible
/// ring comes back following the box. The result is always closed, so an
/// open ring inside `bbox` gains its closing vertex. A ring that
/// ends up with no area-bearing part (fewer than four points once closed)
/// is returned empty.
pub fn clip_ring(ring: &[Vec2], bbox: &Aabb2) -> Vec<Vec2> {
    let mut points = ring.to_vec();
    for side in SIDES {
        if points.is_empty() {
            break;
        }
        points = clip_against_side(&points, side, bbox);
    }

    close_ring(&mut points);
    if points.len() < 4 {
        return Vec::new();
    }
    points
}

fn clip_against_side(points: &[Vec2], side: Side, bbox: &Aabb2) -> Vec<Vec2> {
    let mut out = Vec::with_capacity(points.len() + 4);
    let Some(&last) = points.last() else {
        return out;
    };

    let mut prev = last;
    let mut prev_inside = is_inside(prev, side, bbox);
    for &p in points {
        let inside = is_inside(p, side, bbox);
        if inside != prev_inside {
            out.push(intersect(prev, p, side, bbox));
        }
        if inside {
            out.push(p);
        }
        prev = p;
        prev_inside = inside;
    }
    out
}

fn is_inside(p: Vec2, side: Side, bbox: &Aabb2) -> bool {
    match side {
        Side::Left => p.x >= bbox.min[0],
        Side::Right => p.x <= bbox.max[0],
        Side::Bottom => p.y >= bbox.min[1],
        Side::Top => p.y <= bbox.max[1],
    }
}

// Only called when a and b straddle the side, so the divisor is non-zero.
fn intersect(a: Vec2, b: Vec2, side: Side, bbox: &Aabb2) -> Vec2 {
    match side {
        Side::Left => {
            let x = bbox.min[0];
            Vec2::new(x, a.y + (b.y - a.y) * (x - a.x) / (b.x - a.x))
        }
        Side::Right => {
            let x = bbox.max[0];
            Vec2::new(x, a.y + (b.y - a.y) * (x - a.x) / (b.x - a.x))
        }
        Side::Bottom => {
            let y = bbox.min[1];
            Vec2::new(a.x + (b.x - a.x) * (y - a.y) / (b.y - a.y), y)
        }
        Side::Top => {
            let y = bbox.max[1];
            Vec2::new(a.x + (b.x - a.x) * (y - a.y) / (b.y - a.y), y)
        }
    }
}
