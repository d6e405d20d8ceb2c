mod bodies;
mod wind;

pub use bodies::{load_body_overrides, parse_body_overrides, BodyOverride};
pub use wind::WindConfig;
