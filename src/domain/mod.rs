// Domain layer: offer model and the supplier port. No HTTP here.

pub mod model;
pub mod ports;
