//! Regulatory limits per water-source category
//!
//! Used by the presentation layer to flag readings against the norms for
//! their source. No scorer consults these limits.
//!
//! | Category        | pH        | BOD (mg/l) | TDS (ppm) | Fecal (MPN) |
//! |-----------------|-----------|------------|-----------|-------------|
//! | River           | 6.5–8.5   | 3          | 500       | 500         |
//! | Ground Water    | 6.5–8.5   | 1          | 1000      | 0           |
//! | Drains          | 5.5–9.0   | 30         | 2100      | 10000       |
//! | Ponds/Lakes     | 6.5–8.5   | 5          | 500       | 1000        |
//! | Med Min Rivers  | 6.0–9.0   | 10         | 1500      | 2500        |

use aquai_core::{Quantity, SensorReading, WaterSourceCategory};
use serde::{Deserialize, Serialize};

/// Limits for one source category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLimits {
    /// Acceptable pH band, inclusive
    pub acidity: (f64, f64),
    /// Maximum biochemical oxygen demand
    pub bod: f64,
    /// Maximum total dissolved solids
    pub tds: f64,
    /// Maximum fecal coliform count
    pub fecal_coliform: f64,
}

impl SourceLimits {
    pub const fn for_category(category: WaterSourceCategory) -> Self {
        match category {
            WaterSourceCategory::River => Self::new((6.5, 8.5), 3.0, 500.0, 500.0),
            WaterSourceCategory::GroundWater => Self::new((6.5, 8.5), 1.0, 1_000.0, 0.0),
            WaterSourceCategory::Drains => Self::new((5.5, 9.0), 30.0, 2_100.0, 10_000.0),
            WaterSourceCategory::PondsLakes => Self::new((6.5, 8.5), 5.0, 500.0, 1_000.0),
            WaterSourceCategory::MediumMineralRivers => Self::new((6.0, 9.0), 10.0, 1_500.0, 2_500.0),
        }
    }

    const fn new(acidity: (f64, f64), bod: f64, tds: f64, fecal_coliform: f64) -> Self {
        Self {
            acidity,
            bod,
            tds,
            fecal_coliform,
        }
    }

    /// Limits for the reading's own category
    pub fn for_reading(reading: &SensorReading) -> Self {
        Self::for_category(reading.category)
    }

    /// Quantities of `reading` outside these limits
    pub fn exceedances(&self, reading: &SensorReading) -> Vec<Exceedance> {
        let mut found = Vec::new();

        let (low, high) = self.acidity;
        if reading.acidity < low {
            found.push(Exceedance::new(Quantity::Acidity, reading.acidity, low));
        } else if reading.acidity > high {
            found.push(Exceedance::new(Quantity::Acidity, reading.acidity, high));
        }

        let ceilings = [
            (Quantity::BiochemicalOxygenDemand, self.bod),
            (Quantity::TotalDissolvedSolids, self.tds),
            (Quantity::FecalColiform, self.fecal_coliform),
        ];
        for (quantity, limit) in ceilings {
            let value = reading.value(quantity);
            if value > limit {
                found.push(Exceedance::new(quantity, value, limit));
            }
        }

        found
    }
}

/// One quantity outside its category limit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Exceedance {
    pub quantity: Quantity,
    pub value: f64,
    /// The bound that was crossed
    pub limit: f64,
}

impl Exceedance {
    fn new(quantity: Quantity, value: f64, limit: f64) -> Self {
        Self { quantity, value, limit }
    }
}
