use bevy::prelude::*;
use std::collections::HashMap;

use crate::components::VehicleState;
use crate::resources::config::BodyOverride;

/// Bodies that carry wind out of the box, with their relative strength.
pub const DEFAULT_BODY_SCALES: &[(&str, f64)] = &[
    ("Kerbin", 1.0),
    ("Duna", 0.45),
    ("Eve", 1.8),
    ("Jool", 2.6),
    ("Laythe", 0.6),
    // Outer planets
    ("Sarnus", 2.6),
    ("Urlum", 2.6),
    ("Neidon", 2.6),
    ("Tekto", 0.6),
    ("Thatmo", 0.02),
];

/// Wind scale per celestial body.
///
/// Closed world: a body without an entry, or with a non-positive scale, has no wind.
/// Names are matched case-insensitively.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct BodyWindProfile {
    scales: HashMap<String, f64>,
}

impl Default for BodyWindProfile {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl BodyWindProfile {
    pub fn empty() -> Self {
        Self {
            scales: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut profile = Self::empty();
        for (name, scale) in DEFAULT_BODY_SCALES {
            profile.insert(name, *scale);
        }
        profile
    }

    /// Defaults first, then each record replaces or extends an entry.
    pub fn with_overrides(overrides: &[BodyOverride]) -> Self {
        let mut profile = Self::with_defaults();
        for record in overrides {
            profile.apply_override(record);
        }
        profile
    }

    pub fn apply_override(&mut self, record: &BodyOverride) {
        let name = record.name.trim();
        if name.is_empty() {
            return;
        }
        let scale = record.parsed_scale();
        if scale <= 0.0 {
            debug!("Wind disabled on {} by override", name);
        }
        self.insert(name, scale);
    }

    pub fn insert(&mut self, name: &str, scale: f64) {
        self.scales.insert(name.to_lowercase(), scale);
    }

    pub fn scale_for(&self, body: &str) -> f64 {
        self.scales
            .get(&body.to_lowercase())
            .copied()
            .unwrap_or(0.0)
    }

    pub fn has_wind(&self, body: &str) -> bool {
        self.scale_for(body) > 0.0
    }

    /// Whether the vehicle sits inside the atmosphere of a windy body
    pub fn applies_to(&self, vehicle: &VehicleState) -> bool {
        match vehicle.body.as_deref() {
            Some(body) => self.has_wind(body) && !vehicle.is_in_space(),
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }
}
