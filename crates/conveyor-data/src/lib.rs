//! Plant Data
//!
//! Static conveyor data behind the dashboard: conveyors, particle size
//! distributions, seed alerts, and plant-wide statistics.

mod conveyor;
mod registry;
mod samples;

pub use conveyor::{Conveyor, ConveyorStatus, ParticleSizeBin};
pub use registry::{PlantRegistry, PlantStats};
pub use samples::{
    conveyor_size_distributions, plant_size_distribution, sample_alerts, sample_conveyors,
};
