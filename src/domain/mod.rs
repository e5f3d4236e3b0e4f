// Domain layer: models, reference data and ports. No I/O.

pub mod grades;
pub mod model;
pub mod ports;
