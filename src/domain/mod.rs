// Domain layer: models and ports (interfaces). No transport dependencies.

pub mod model;
pub mod ports;
