mod wind;

pub use wind::{WindPlugin, WindSet};
