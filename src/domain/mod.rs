// Domain layer: the stats envelope model and the settings port.

pub mod model;
pub mod ports;
