// Domain layer: core models and ports (interfaces) the pipeline talks through.

pub mod model;
pub mod ports;
