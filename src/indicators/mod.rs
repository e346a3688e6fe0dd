pub mod momentum;
pub mod snapshot;
pub mod trend;

pub use snapshot::*;
