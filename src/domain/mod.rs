// Domain layer: catalog records, run outcomes and the ports the populator talks through.

pub mod model;
pub mod ports;
