mod force_calculator;

pub use force_calculator::{calculate_net_accelerations, force_accumulator_system};
