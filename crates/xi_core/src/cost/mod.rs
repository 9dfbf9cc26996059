pub mod builder;
pub mod matrix;

pub use builder::{
    build_cost_matrix, check_feasibility, pairing_cost, CostTable, AGE_RISK_WEIGHT,
    INJURY_RISK_WEIGHT, MAX_PERFORMANCE, MINUTES_WEIGHT, PERFORMANCE_WEIGHT,
};
pub use matrix::{CostEntry, CostMatrix};
