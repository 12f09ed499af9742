//! Planar ring operations used before label placement.

pub mod clip;
pub mod simplify;

pub use clip::clip_ring;
pub use simplify::{ring_area, simplify_line, simplify_ring};

use crate::math::Vec2;

/// Appends the first vertex when the ring is not already closed.
pub fn close_ring(ring: &mut Vec<Vec2>) {
    if let (Some(&first), Some(&last)) = (ring.first(), ring.last())
        && first != last
    {
        ring.push(first);
    }
}
