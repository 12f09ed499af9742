pub mod event_bus;
pub mod generation;
pub mod latest;

pub use event_bus::*;
pub use generation::*;
pub use latest::*;
