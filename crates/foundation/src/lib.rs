pub mod bounds;
pub mod feature;
pub mod geometry;
pub mod math;

// Foundation crate: small, well-tested primitives only.
pub use bounds::*;
pub use feature::*;
