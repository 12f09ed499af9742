use foundation::math::Vec2;

/// Segment between two consecutive ring vertices, in geographic units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Edge {
    pub start: Vec2,
    pub end: Vec2,
    pub length: f64,
}

impl Edge {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self {
            start,
            end,
            length: start.distance(end),
        }
    }

    pub fn midpoint(&self) -> Vec2 {
        self.start.lerp(self.end, 0.5)
    }
}

/// Splits a ring into edges and orders them longest first.
///
/// Edges are the consecutive pairs of the stored ring. A closed ring already
/// ends with its first vertex, so its closing edge is the last pair; no wrap
/// edge is synthesized for open input. Equal lengths keep ring order.
pub fn rank_edges(ring: &[Vec2]) -> Vec<Edge> {
    let mut edges: Vec<Edge> = ring.windows(2).map(|w| Edge::new(w[0], w[1])).collect();
    edges.sort_by(|a, b| b.length.total_cmp(&a.length));
    edges
}

#[cfg(test)]
mod tests {
    use super::{Edge, rank_edges};
    use foundation::math::Vec2;

    #[test]
    fn fewer_than_two_points_has_no_edges() {
        assert!(rank_edges(&[]).is_empty());
        assert!(rank_edges(&[Vec2::new(1.0, 1.0)]).is_empty());
    }

    #[test]
    fn sorted_descending_and_a_permutation() {
        let ring = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 1.0),
            Vec2::new(0.0, 3.0),
            Vec2::new(0.0, 0.0),
        ];
        let ranked = rank_edges(&ring);
        assert_eq!(ranked.len(), ring.len() - 1);
        assert!(ranked.windows(2).all(|w| w[0].length >= w[1].length));

        for pair in ring.windows(2) {
            let e = Edge::new(pair[0], pair[1]);
            assert_eq!(ranked.iter().filter(|r| **r == e).count(), 1);
        }
        assert_eq!(ranked[0], Edge::new(Vec2::new(4.0, 1.0), Vec2::new(0.0, 3.0)));
    }

    #[test]
    fn equal_lengths_keep_ring_order() {
        let ring = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(0.0, 0.0),
        ];
        let ranked = rank_edges(&ring);
        let starts: Vec<Vec2> = ranked.iter().map(|e| e.start).collect();
        assert_eq!(starts, ring[..4].to_vec());
    }

    #[test]
    fn closing_edge_is_the_last_pair() {
        let ring = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 5.0),
            Vec2::new(0.0, 0.0),
        ];
        let ranked = rank_edges(&ring);
        assert_eq!(ranked.len(), 3);
        assert!(ranked.contains(&Edge::new(Vec2::new(0.0, 5.0), Vec2::new(0.0, 0.0))));
    }
}
