//! Simulation Ranges
//!
//! Plausible [min, max] bands and per-step volatility for each simulated
//! quantity. The bands cover both clean and heavily polluted surface water so
//! that a long random walk visits every safety tier.

/// Fraction of a quantity's range a single rolling step may move.
pub const DEFAULT_VOLATILITY: f64 = 0.05;

/// pH band.
pub const ACIDITY_RANGE: (f64, f64) = (5.5, 9.5);

/// Biochemical oxygen demand band (mg/l).
pub const BOD_RANGE: (f64, f64) = (0.5, 30.0);

/// Fecal coliform band (MPN/100ml).
pub const FECAL_COLIFORM_RANGE: (f64, f64) = (50.0, 50_000.0);

/// Fecal coliform moves faster than chemistry; runoff events arrive in bursts.
pub const FECAL_COLIFORM_VOLATILITY: f64 = 0.08;

/// Total dissolved solids band (ppm).
pub const TDS_RANGE: (f64, f64) = (100.0, 1500.0);

/// Turbidity band (NTU).
pub const TURBIDITY_RANGE: (f64, f64) = (0.0, 35.0);

/// Dissolved oxygen band (mg/l).
pub const DISSOLVED_OXYGEN_RANGE: (f64, f64) = (1.0, 9.0);

/// Nitrate band (mg/l).
pub const NITRATE_RANGE: (f64, f64) = (0.0, 20.0);

/// Water temperature band (°C).
pub const TEMPERATURE_RANGE: (f64, f64) = (18.0, 34.0);

/// Temperature drifts slowly.
pub const TEMPERATURE_VOLATILITY: f64 = 0.02;

/// Conductivity per unit of TDS (µmhos/cm per ppm).
pub const CONDUCTIVITY_PER_TDS: f64 = 1.5;

/// Total-to-fecal coliform ratio band.
pub const TOTAL_TO_FECAL_RATIO: (f64, f64) = (1.5, 4.0);

/// Probability that a snapshot reading is anomalous.
pub const SNAPSHOT_ANOMALY_PROBABILITY: f64 = 0.4;
