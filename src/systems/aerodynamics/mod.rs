mod shear;
mod wind_force;

pub use shear::{compute_wind_shear, wind_shear_system, ShearEffect};
pub use wind_force::{
    compute_wind_forces, headwind_lift_acceleration, lateral_drag_acceleration,
    wind_force_system, HeadwindLiftSettings, WindForces,
};
