//! Property tests for the rolling generator and the reading simulator
//!
//! The rolling walk must never leave its band, whatever the previous value,
//! band or volatility; simulated readings must always pass validation.

use aquai_core::{
    next_rolling_value, BoundedHistory, FixedTime, Location, RandomSource, ReadingSimulator,
    RngSource, SimulatorConfig, Validator, WaterReadingValidator, WaterSourceCategory,
};
use proptest::prelude::*;

/// Trials for the explicit bounds sweep
const BOUNDS_TRIALS: usize = 10_000;

#[test]
fn rolling_value_stays_in_band_over_ten_thousand_trials() {
    let mut rng = RngSource::seeded(0xA0A1);
    let mut setup = RngSource::seeded(0xB0B1);

    for _ in 0..BOUNDS_TRIALS {
        let min = setup.next_in(-100.0, 100.0);
        let max = min + setup.next_in(0.0, 1_000.0);
        let previous = setup.next_in(min, max);
        let volatility = setup.next_in(0.0, 2.0);

        let next = next_rolling_value(previous, min, max, volatility, &mut rng).unwrap();
        assert!(next >= min && next <= max, "{next} escaped [{min}, {max}]");
    }
}

proptest! {
    #[test]
    fn rolling_value_bounded(
        min in -1.0e6f64..1.0e6,
        width in 0.0f64..1.0e6,
        position in 0.0f64..=1.0,
        volatility in 0.0f64..1.0,
        seed in any::<u64>(),
    ) {
        let max = min + width;
        let previous = min + position * width;
        let mut rng = RngSource::seeded(seed);

        let next = next_rolling_value(previous, min, max, volatility, &mut rng).unwrap();
        prop_assert!(next >= min);
        prop_assert!(next <= max);
    }

    #[test]
    fn rolling_step_bounded_by_volatility(
        position in 0.0f64..=1.0,
        volatility in 0.0f64..0.5,
        seed in any::<u64>(),
    ) {
        let (min, max) = (0.0, 100.0);
        let previous = position * 100.0;
        let mut rng = RngSource::seeded(seed);

        let next = next_rolling_value(previous, min, max, volatility, &mut rng).unwrap();
        prop_assert!((next - previous).abs() <= volatility * (max - min) + 1e-9);
    }

    #[test]
    fn simulated_streams_validate(seed in any::<u64>()) {
        let mut simulator = ReadingSimulator::new(
            SimulatorConfig::default(),
            RngSource::seeded(seed),
            FixedTime::new(0),
        );
        let validator = WaterReadingValidator::default();
        let location = Location::default();

        for _ in 0..50 {
            let reading = simulator.next_reading(&location, WaterSourceCategory::GroundWater).unwrap();
            prop_assert!(validator.validate(&reading).is_ok());
            let snapshot = simulator.snapshot(&location, WaterSourceCategory::GroundWater);
            prop_assert!(validator.validate(&snapshot).is_ok());
        }
    }

    #[test]
    fn history_keeps_newest(capacity in 1usize..64, pushes in 0usize..200) {
        let mut history = BoundedHistory::new(capacity);
        for i in 0..pushes {
            history.push(i);
        }

        prop_assert_eq!(history.len(), pushes.min(capacity));
        let retained: Vec<usize> = history.iter().copied().collect();
        let expected: Vec<usize> = (pushes.saturating_sub(capacity)..pushes).rev().collect();
        prop_assert_eq!(retained, expected);
    }
}
