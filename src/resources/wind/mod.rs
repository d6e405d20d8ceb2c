mod bodies;
mod forecast;
mod noise;
mod state;

pub use bodies::{BodyWindProfile, DEFAULT_BODY_SCALES};
pub use forecast::{effective_cap, WindClassification, WindField, WindForecastEngine, WindSample};
pub use noise::{NoiseField, WindSeeds};
pub use state::WindState;
