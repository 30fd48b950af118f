//! Constants for AQUAI Core
//!
//! Centralized numeric limits used by reading validation and the simulator.
//! Scoring thresholds live next to the scorers in `aquai-scoring`.
//!
//! ## Organization
//!
//! - **Physics**: what a water sample can physically measure
//! - **Simulation**: plausible ranges and drift for synthetic readings
//!
//! ## Usage Guidelines
//!
//! 1. Use these constants instead of magic numbers
//! 2. Include units in the name
//! 3. Say where a value comes from when it is not obvious

/// Physical limits for reading validation.
pub mod physics;

/// Ranges and volatilities for synthetic reading streams.
pub mod simulation;

pub use physics::{
    ACIDITY_MIN_PH, ACIDITY_MAX_PH,
    WATER_TEMP_MIN_C, WATER_TEMP_MAX_C,
};

pub use simulation::DEFAULT_VOLATILITY;
