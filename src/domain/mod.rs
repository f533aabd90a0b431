// Domain layer: document/section models and the ports the splitter talks through.

pub mod model;
pub mod ports;
