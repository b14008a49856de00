// Domain layer: station/trip models, lookup tables and the pipeline port.

pub mod model;
pub mod municipality;
pub mod ports;
pub mod stats;
