//! Synthetic Reading Streams
//!
//! ## Overview
//!
//! Without station hardware attached, the dashboard is driven by simulated
//! readings. Two generators exist:
//!
//! - **Rolling**: each quantity performs a bounded random walk from its
//!   previous value, so consecutive readings look like one river drifting over
//!   time rather than unrelated samples.
//! - **Snapshot**: an independent draw per reading, anomalous with
//!   probability 0.4, used for one-off demo samples.
//!
//! Manual entry reuses the snapshot generator for the quantities the operator
//! did not type in.
//!
//! ## Rolling Step
//!
//! ```text
//! step = U(-1, 1) × volatility × (max − min)
//! next = clamp(previous + step, min, max)
//! ```
//!
//! The step is bounded by a fraction of the band, which rules out unrealistic
//! jumps, and the clamp keeps every value inside the band forever.
//!
//! ## Derived Quantities
//!
//! Conductivity is not walked independently: it follows TDS linearly. Total
//! coliform is fecal coliform times a ratio in [1.5, 4.0), which keeps the
//! two counts ordered.

use crate::{
    constants::simulation::{
        ACIDITY_RANGE, BOD_RANGE, CONDUCTIVITY_PER_TDS, DEFAULT_VOLATILITY,
        DISSOLVED_OXYGEN_RANGE, FECAL_COLIFORM_RANGE, FECAL_COLIFORM_VOLATILITY,
        NITRATE_RANGE, SNAPSHOT_ANOMALY_PROBABILITY, TDS_RANGE, TEMPERATURE_RANGE,
        TEMPERATURE_VOLATILITY, TOTAL_TO_FECAL_RATIO, TURBIDITY_RANGE,
    },
    errors::{ValidationError, ValidationResult},
    random::RandomSource,
    reading::{Location, Quantity, ReadingOrigin, SensorReading, WaterSourceCategory},
    time::TimeSource,
    traits::Validatable,
};

const ID_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ID_SUFFIX_LEN: usize = 5;

/// Next value of a bounded random walk
///
/// Returns `InvalidRange` when `min > max` or either bound is not finite.
/// A non-finite `previous` restarts the walk from the middle of the band.
pub fn next_rolling_value(
    previous: f64,
    min: f64,
    max: f64,
    volatility: f64,
    rng: &mut dyn RandomSource,
) -> ValidationResult<f64> {
    if !min.is_valid() || !max.is_valid() || min > max {
        return Err(ValidationError::InvalidRange { min, max });
    }

    let previous = if previous.is_valid() {
        previous
    } else {
        midpoint(min, max)
    };
    let volatility = if volatility.is_valid() { volatility.abs() } else { 0.0 };

    // Width of a band wider than f64::MAX saturates instead of overflowing
    let width = (max - min).min(f64::MAX);
    let step = rng.next_signed() * volatility * width;
    let next = previous + step;
    if next.is_nan() {
        return Ok(previous.clamp(min, max));
    }
    Ok(next.clamp(min, max))
}

fn midpoint(min: f64, max: f64) -> f64 {
    min / 2.0 + max / 2.0
}

/// Source-tagged identifier such as `SIM-4KD9Q`
pub fn reading_id(origin: ReadingOrigin, rng: &mut dyn RandomSource) -> String {
    let mut id = String::with_capacity(origin.id_prefix().len() + 1 + ID_SUFFIX_LEN);
    id.push_str(origin.id_prefix());
    id.push('-');
    for _ in 0..ID_SUFFIX_LEN {
        let index = ((rng.next_unit() * ID_ALPHABET.len() as f64) as usize).min(ID_ALPHABET.len() - 1);
        id.push(ID_ALPHABET[index] as char);
    }
    id
}

/// Rolling cursor for one simulated quantity
#[derive(Debug, Clone, PartialEq)]
pub struct RollingState {
    /// Quantity being walked
    pub quantity: Quantity,
    /// Lower bound of the band
    pub min: f64,
    /// Upper bound of the band
    pub max: f64,
    /// Fraction of the band one step may cover
    pub volatility: f64,
    /// Current value
    pub current: f64,
}

impl RollingState {
    /// Cursor starting in the middle of its band
    pub fn new(quantity: Quantity, min: f64, max: f64, volatility: f64) -> ValidationResult<Self> {
        if !min.is_valid() || !max.is_valid() || min > max {
            return Err(ValidationError::InvalidRange { min, max });
        }

        Ok(Self {
            quantity,
            min,
            max,
            volatility,
            current: midpoint(min, max),
        })
    }

    /// Move the cursor one step and return the new value
    pub fn advance(&mut self, rng: &mut dyn RandomSource) -> ValidationResult<f64> {
        self.current = next_rolling_value(self.current, self.min, self.max, self.volatility, rng)?;
        Ok(self.current)
    }
}

/// Bands and volatilities for the rolling generator
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    channels: Vec<RollingState>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        let band = |quantity, (min, max): (f64, f64), volatility| RollingState {
            quantity,
            min,
            max,
            volatility,
            current: midpoint(min, max),
        };

        Self {
            channels: vec![
                band(Quantity::Acidity, ACIDITY_RANGE, DEFAULT_VOLATILITY),
                band(Quantity::BiochemicalOxygenDemand, BOD_RANGE, DEFAULT_VOLATILITY),
                band(Quantity::FecalColiform, FECAL_COLIFORM_RANGE, FECAL_COLIFORM_VOLATILITY),
                band(Quantity::TotalDissolvedSolids, TDS_RANGE, DEFAULT_VOLATILITY),
                band(Quantity::Turbidity, TURBIDITY_RANGE, DEFAULT_VOLATILITY),
                band(Quantity::DissolvedOxygen, DISSOLVED_OXYGEN_RANGE, DEFAULT_VOLATILITY),
                band(Quantity::Nitrate, NITRATE_RANGE, DEFAULT_VOLATILITY),
                band(Quantity::Temperature, TEMPERATURE_RANGE, TEMPERATURE_VOLATILITY),
            ],
        }
    }
}

impl SimulatorConfig {
    /// Override the band and volatility of one walked quantity
    ///
    /// Conductivity and total coliform are derived and cannot be walked.
    pub fn channel(
        mut self,
        quantity: Quantity,
        min: f64,
        max: f64,
        volatility: f64,
    ) -> ValidationResult<Self> {
        let state = RollingState::new(quantity, min, max, volatility)?;
        match self.channels.iter_mut().find(|c| c.quantity == quantity) {
            Some(existing) => *existing = state,
            None => {
                return Err(ValidationError::CrossValidationFailed {
                    reason: "quantity is derived, not simulated",
                })
            }
        }
        Ok(self)
    }

    /// Start every cursor at a given value, clamped into its band
    pub fn starting_at(mut self, reading: &SensorReading) -> Self {
        for channel in self.channels.iter_mut() {
            let value = reading.value(channel.quantity);
            if value.is_valid() {
                channel.current = value.clamp(channel.min, channel.max);
            }
        }
        self
    }

    /// Configured cursors
    pub fn channels(&self) -> &[RollingState] {
        &self.channels
    }
}

/// Operator-entered values overlaid on a generated reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManualEntry {
    /// pH
    pub acidity: f64,
    /// Biochemical oxygen demand, mg/l
    pub bod: f64,
    /// mg/l
    pub dissolved_oxygen: f64,
    /// MPN/100ml
    pub fecal_coliform: f64,
    /// µmhos/cm
    pub conductivity: f64,
}

impl Default for ManualEntry {
    fn default() -> Self {
        Self {
            acidity: 7.0,
            bod: 2.0,
            dissolved_oxygen: 6.0,
            fecal_coliform: 500.0,
            conductivity: 500.0,
        }
    }
}

impl ManualEntry {
    /// Overlay onto `base`
    ///
    /// Total coliform is raised to the entered fecal count when the base
    /// reading would otherwise report fewer total than fecal coliforms.
    pub fn apply(&self, mut base: SensorReading) -> SensorReading {
        base.acidity = self.acidity;
        base.bod = self.bod;
        base.dissolved_oxygen = self.dissolved_oxygen;
        base.fecal_coliform = self.fecal_coliform;
        base.conductivity = self.conductivity;
        if base.total_coliform < base.fecal_coliform {
            base.total_coliform = base.fecal_coliform;
        }
        base
    }
}

/// Simulation session producing readings for one station
pub struct ReadingSimulator<R, T> {
    channels: Vec<RollingState>,
    rng: R,
    clock: T,
}

impl<R: RandomSource, T: TimeSource> ReadingSimulator<R, T> {
    /// Session walking `config` with its own randomness and clock
    pub fn new(config: SimulatorConfig, rng: R, clock: T) -> Self {
        Self {
            channels: config.channels,
            rng,
            clock,
        }
    }

    /// Current cursors
    pub fn state(&self) -> &[RollingState] {
        &self.channels
    }

    /// Advance every cursor and assemble the next rolling reading
    pub fn next_reading(
        &mut self,
        location: &Location,
        category: WaterSourceCategory,
    ) -> ValidationResult<SensorReading> {
        let mut reading = SensorReading::builder()
            .id(reading_id(ReadingOrigin::Simulated, &mut self.rng))
            .timestamp(self.clock.now())
            .location(location.clone())
            .category(category)
            .build();

        for channel in self.channels.iter_mut() {
            let value = channel.advance(&mut self.rng)?;
            reading.set(channel.quantity, value);
        }

        self.derive(&mut reading);
        Ok(reading)
    }

    /// Independent snapshot reading, anomalous with probability 0.4
    pub fn snapshot(&mut self, location: &Location, category: WaterSourceCategory) -> SensorReading {
        let anomalous = self.rng.next_unit() < SNAPSHOT_ANOMALY_PROBABILITY;
        let rng = &mut self.rng;

        let mut reading = SensorReading::builder()
            .id(reading_id(ReadingOrigin::Simulated, rng))
            .timestamp(self.clock.now())
            .location(location.clone())
            .category(category)
            .acidity(rng.next_in(6.5, 8.5))
            .turbidity(rng.next_in(0.0, if anomalous { 30.0 } else { 5.0 }))
            .tds(rng.next_in(200.0, 1400.0))
            .temperature(rng.next_in(24.0, 32.0))
            .dissolved_oxygen(rng.next_in(3.0, 8.0))
            .bod(if anomalous { rng.next_in(8.0, 28.0) } else { rng.next_in(1.0, 4.0) })
            .nitrate(rng.next_in(0.0, 15.0))
            .fecal_coliform(if anomalous {
                rng.next_in(5_000.0, 55_000.0)
            } else {
                rng.next_in(100.0, 1_600.0)
            })
            .build();

        self.derive(&mut reading);
        reading
    }

    /// Manual-entry reading: snapshot base with operator values on top
    pub fn manual(
        &mut self,
        entry: &ManualEntry,
        location: &Location,
        category: WaterSourceCategory,
    ) -> SensorReading {
        let mut base = self.snapshot(location, category);
        base.id = reading_id(ReadingOrigin::Manual, &mut self.rng);
        entry.apply(base)
    }

    fn derive(&mut self, reading: &mut SensorReading) {
        reading.conductivity = reading.tds * CONDUCTIVITY_PER_TDS;
        let (low, high) = TOTAL_TO_FECAL_RATIO;
        reading.total_coliform = reading.fecal_coliform * self.rng.next_in(low, high);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{RngSource, SequenceSource};
    use crate::time::FixedTime;
    use crate::traits::Validator;
    use crate::validators::WaterReadingValidator;

    #[test]
    fn rolling_step_scales_with_range_and_volatility() {
        // Draw 1.0 - ε ≈ +1, draw 0.0 = -1
        let mut up = SequenceSource::constant(1.0);
        let next = next_rolling_value(5.0, 0.0, 10.0, 0.1, &mut up).unwrap();
        assert!((next - 6.0).abs() < 1e-9);

        let mut down = SequenceSource::constant(0.0);
        let next = next_rolling_value(5.0, 0.0, 10.0, 0.1, &mut down).unwrap();
        assert!((next - 4.0).abs() < 1e-9);
    }

    #[test]
    fn rolling_step_clamps() {
        let mut up = SequenceSource::constant(1.0);
        assert_eq!(next_rolling_value(9.9, 0.0, 10.0, 0.5, &mut up).unwrap(), 10.0);

        let mut down = SequenceSource::constant(0.0);
        assert_eq!(next_rolling_value(0.1, 0.0, 10.0, 0.5, &mut down).unwrap(), 0.0);
    }

    #[test]
    fn rolling_stays_finite_in_widest_band() {
        for draw in [0.0, 0.5, 0.999] {
            let mut rng = SequenceSource::constant(draw);
            let next = next_rolling_value(0.0, -f64::MAX, f64::MAX, 0.05, &mut rng).unwrap();
            assert!(next.is_finite(), "draw {draw} gave {next}");
            assert!((-f64::MAX..=f64::MAX).contains(&next));
        }

        let mut rng = SequenceSource::constant(0.5);
        let restarted = next_rolling_value(f64::NAN, -f64::MAX, f64::MAX, 0.05, &mut rng).unwrap();
        assert_eq!(restarted, 0.0);

        let state = RollingState::new(Quantity::TotalDissolvedSolids, f64::MAX, f64::MAX, 0.05).unwrap();
        assert_eq!(state.current, f64::MAX);
    }

    #[test]
    fn rolling_rejects_swapped_range() {
        let mut rng = SequenceSource::constant(0.5);
        assert_eq!(
            next_rolling_value(1.0, 5.0, 2.0, 0.05, &mut rng),
            Err(ValidationError::InvalidRange { min: 5.0, max: 2.0 })
        );
    }

    #[test]
    fn rolling_restarts_from_nan() {
        let mut rng = SequenceSource::constant(0.5);
        assert_eq!(next_rolling_value(f64::NAN, 0.0, 10.0, 0.05, &mut rng).unwrap(), 5.0);
    }

    #[test]
    fn ids_are_tagged() {
        let mut rng = RngSource::seeded(3);
        let id = reading_id(ReadingOrigin::Simulated, &mut rng);
        assert!(id.starts_with("SIM-"));
        assert_eq!(id.len(), 9);
        assert!(id[4..].chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));

        let mut top = SequenceSource::constant(1.0);
        assert_eq!(reading_id(ReadingOrigin::Manual, &mut top), "MAN-ZZZZZ");
    }

    #[test]
    fn simulated_readings_stay_valid() {
        let mut simulator = ReadingSimulator::new(
            SimulatorConfig::default(),
            RngSource::seeded(11),
            FixedTime::new(1_700_000_000_000),
        );
        let validator = WaterReadingValidator::default();
        let location = Location::default();

        for _ in 0..500 {
            let reading = simulator.next_reading(&location, WaterSourceCategory::River).unwrap();
            assert!(validator.validate(&reading).is_ok(), "{reading:?}");
            assert!(reading.total_coliform >= reading.fecal_coliform);
            assert_eq!(reading.conductivity, reading.tds * CONDUCTIVITY_PER_TDS);
            assert_eq!(reading.origin(), Some(ReadingOrigin::Simulated));
            assert_eq!(reading.timestamp, 1_700_000_000_000);
        }
    }

    #[test]
    fn cursors_carry_between_readings() {
        let config = SimulatorConfig::default()
            .channel(Quantity::Acidity, 6.0, 8.0, 0.05)
            .unwrap();
        let mut simulator =
            ReadingSimulator::new(config, RngSource::seeded(5), FixedTime::new(0));
        let location = Location::default();

        let mut previous = 7.0;
        for _ in 0..100 {
            let reading = simulator.next_reading(&location, WaterSourceCategory::River).unwrap();
            // One step moves at most 5% of the 2.0 band
            assert!((reading.acidity - previous).abs() <= 0.1 + 1e-9);
            previous = reading.acidity;
        }
    }

    #[test]
    fn derived_quantities_cannot_be_walked() {
        assert!(SimulatorConfig::default()
            .channel(Quantity::Conductivity, 0.0, 10.0, 0.05)
            .is_err());
    }

    #[test]
    fn starting_point_is_clamped() {
        let seed = SensorReading::builder().acidity(13.0).bod(3.0).build();
        let config = SimulatorConfig::default().starting_at(&seed);
        let acidity = config
            .channels()
            .iter()
            .find(|c| c.quantity == Quantity::Acidity)
            .map(|c| c.current);
        assert_eq!(acidity, Some(ACIDITY_RANGE.1));
    }

    #[test]
    fn anomalous_snapshot() {
        // First draw decides the anomaly; 0.0 < 0.4
        let mut simulator = ReadingSimulator::new(
            SimulatorConfig::default(),
            SequenceSource::constant(0.0),
            FixedTime::new(0),
        );
        let reading = simulator.snapshot(&Location::default(), WaterSourceCategory::Drains);
        assert_eq!(reading.fecal_coliform, 5_000.0);
        assert_eq!(reading.bod, 8.0);
        assert_eq!(reading.category, WaterSourceCategory::Drains);
    }

    #[test]
    fn nominal_snapshot() {
        let mut simulator = ReadingSimulator::new(
            SimulatorConfig::default(),
            SequenceSource::constant(0.5),
            FixedTime::new(0),
        );
        let reading = simulator.snapshot(&Location::default(), WaterSourceCategory::River);
        assert_eq!(reading.fecal_coliform, 850.0);
        assert_eq!(reading.bod, 2.5);
        assert!(WaterReadingValidator::default().validate(&reading).is_ok());
    }

    #[test]
    fn manual_entry_overlays_and_retags() {
        let mut simulator = ReadingSimulator::new(
            SimulatorConfig::default(),
            RngSource::seeded(9),
            FixedTime::new(0),
        );
        let entry = ManualEntry {
            acidity: 6.1,
            bod: 4.8,
            dissolved_oxygen: 3.5,
            fecal_coliform: 900_000.0,
            conductivity: 777.0,
        };
        let reading = simulator.manual(&entry, &Location::default(), WaterSourceCategory::River);

        assert_eq!(reading.origin(), Some(ReadingOrigin::Manual));
        assert_eq!(reading.acidity, 6.1);
        assert_eq!(reading.conductivity, 777.0);
        assert_eq!(reading.total_coliform, 900_000.0);
        assert!(WaterReadingValidator::default().validate(&reading).is_ok());
    }
}
