//! Water-quality reading model
//!
//! A [`SensorReading`] is produced once per reading cycle, by the simulator,
//! by manual entry or by station hardware, and is never mutated after it has
//! been handed to the scoring pipeline.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Physical quantities carried by a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    /// pH
    Acidity,
    /// Turbidity
    Turbidity,
    /// Total dissolved solids
    TotalDissolvedSolids,
    /// Water temperature
    Temperature,
    /// Dissolved oxygen
    DissolvedOxygen,
    /// Electrical conductivity
    Conductivity,
    /// Biochemical oxygen demand
    BiochemicalOxygenDemand,
    /// Nitrate-N
    Nitrate,
    /// Fecal coliform count
    FecalColiform,
    /// Total coliform count
    TotalColiform,
}

impl Quantity {
    /// Every quantity, in reading field order
    pub const ALL: [Quantity; 10] = [
        Quantity::Acidity,
        Quantity::Turbidity,
        Quantity::TotalDissolvedSolids,
        Quantity::Temperature,
        Quantity::DissolvedOxygen,
        Quantity::Conductivity,
        Quantity::BiochemicalOxygenDemand,
        Quantity::Nitrate,
        Quantity::FecalColiform,
        Quantity::TotalColiform,
    ];

    /// Machine-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            Quantity::Acidity => "acidity",
            Quantity::Turbidity => "turbidity",
            Quantity::TotalDissolvedSolids => "tds",
            Quantity::Temperature => "temperature",
            Quantity::DissolvedOxygen => "dissolved_oxygen",
            Quantity::Conductivity => "conductivity",
            Quantity::BiochemicalOxygenDemand => "bod",
            Quantity::Nitrate => "nitrate",
            Quantity::FecalColiform => "fecal_coliform",
            Quantity::TotalColiform => "total_coliform",
        }
    }

    /// Unit of measurement
    pub const fn unit(&self) -> &'static str {
        match self {
            Quantity::Acidity => "pH",
            Quantity::Turbidity => "NTU",
            Quantity::TotalDissolvedSolids => "ppm",
            Quantity::Temperature => "°C",
            Quantity::DissolvedOxygen => "mg/l",
            Quantity::Conductivity => "µmhos/cm",
            Quantity::BiochemicalOxygenDemand => "mg/l",
            Quantity::Nitrate => "mg/l",
            Quantity::FecalColiform => "MPN/100ml",
            Quantity::TotalColiform => "MPN/100ml",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Water source category
///
/// Selects the regulatory limit table shown next to a reading. The scorers
/// never look at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WaterSourceCategory {
    /// Rivers and streams
    #[default]
    #[serde(rename = "River")]
    River,
    /// Wells and aquifers
    #[serde(rename = "Ground Water")]
    GroundWater,
    /// Open drains and sewage channels
    #[serde(rename = "Drains")]
    Drains,
    /// Still surface water
    #[serde(rename = "Ponds/Lakes")]
    PondsLakes,
    /// Rivers with medium mineral load
    #[serde(rename = "Med Min Rivers")]
    MediumMineralRivers,
}

impl WaterSourceCategory {
    /// Every category
    pub const ALL: [WaterSourceCategory; 5] = [
        WaterSourceCategory::River,
        WaterSourceCategory::GroundWater,
        WaterSourceCategory::Drains,
        WaterSourceCategory::PondsLakes,
        WaterSourceCategory::MediumMineralRivers,
    ];

    /// Display label
    pub const fn label(&self) -> &'static str {
        match self {
            WaterSourceCategory::River => "River",
            WaterSourceCategory::GroundWater => "Ground Water",
            WaterSourceCategory::Drains => "Drains",
            WaterSourceCategory::PondsLakes => "Ponds/Lakes",
            WaterSourceCategory::MediumMineralRivers => "Med Min Rivers",
        }
    }
}

impl fmt::Display for WaterSourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a reading came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadingOrigin {
    /// Produced by the rolling-value simulator
    Simulated,
    /// Typed in by an operator
    Manual,
    /// Streamed from station hardware
    Hardware,
}

impl ReadingOrigin {
    /// Prefix used in reading identifiers
    pub const fn id_prefix(&self) -> &'static str {
        match self {
            ReadingOrigin::Simulated => "SIM",
            ReadingOrigin::Manual => "MAN",
            ReadingOrigin::Hardware => "HW",
        }
    }

    /// Recover the origin from a tagged identifier
    pub fn from_id(id: &str) -> Option<Self> {
        let (prefix, _) = id.split_once('-')?;
        [ReadingOrigin::Simulated, ReadingOrigin::Manual, ReadingOrigin::Hardware]
            .into_iter()
            .find(|origin| origin.id_prefix() == prefix)
    }
}

/// Geographic position of a monitoring station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
    /// Display name
    pub name: String,
    /// Administrative region label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl Location {
    /// Create a location without a region label
    pub fn new(lat: f64, lng: f64, name: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            name: name.into(),
            state: None,
        }
    }

    /// Attach a region label
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Stations used when no location has been chosen
    pub fn defaults() -> Vec<Location> {
        vec![
            Location::new(28.6139, 77.2090, "Yamuna River - Nizamuddin, Delhi").with_state("Delhi"),
            Location::new(26.8467, 80.9462, "Gomti River - Lucknow").with_state("Uttar Pradesh"),
            Location::new(25.3176, 83.0061, "Ganga River - Varanasi").with_state("Uttar Pradesh"),
        ]
    }
}

impl Default for Location {
    fn default() -> Self {
        Location::new(28.6139, 77.2090, "Yamuna River - Nizamuddin, Delhi").with_state("Delhi")
    }
}

/// One water-quality reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    /// Source-tagged identifier, e.g. `SIM-4KD9Q`
    pub id: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: Timestamp,
    /// pH
    #[serde(rename = "ph")]
    pub acidity: f64,
    /// NTU
    pub turbidity: f64,
    /// Total dissolved solids, ppm
    pub tds: f64,
    /// °C
    pub temperature: f64,
    /// mg/l
    pub dissolved_oxygen: f64,
    /// µmhos/cm
    pub conductivity: f64,
    /// Biochemical oxygen demand, mg/l
    pub bod: f64,
    /// mg/l
    pub nitrate: f64,
    /// MPN/100ml
    pub fecal_coliform: f64,
    /// MPN/100ml
    pub total_coliform: f64,
    /// Station position
    pub location: Location,
    /// Source category
    #[serde(default)]
    pub category: WaterSourceCategory,
}

impl SensorReading {
    /// Start building a reading from nominal clean-river values
    pub fn builder() -> ReadingBuilder {
        ReadingBuilder::default()
    }

    /// Value of one quantity
    pub fn value(&self, quantity: Quantity) -> f64 {
        match quantity {
            Quantity::Acidity => self.acidity,
            Quantity::Turbidity => self.turbidity,
            Quantity::TotalDissolvedSolids => self.tds,
            Quantity::Temperature => self.temperature,
            Quantity::DissolvedOxygen => self.dissolved_oxygen,
            Quantity::Conductivity => self.conductivity,
            Quantity::BiochemicalOxygenDemand => self.bod,
            Quantity::Nitrate => self.nitrate,
            Quantity::FecalColiform => self.fecal_coliform,
            Quantity::TotalColiform => self.total_coliform,
        }
    }

    /// Overwrite one quantity
    pub fn set(&mut self, quantity: Quantity, value: f64) {
        let slot = match quantity {
            Quantity::Acidity => &mut self.acidity,
            Quantity::Turbidity => &mut self.turbidity,
            Quantity::TotalDissolvedSolids => &mut self.tds,
            Quantity::Temperature => &mut self.temperature,
            Quantity::DissolvedOxygen => &mut self.dissolved_oxygen,
            Quantity::Conductivity => &mut self.conductivity,
            Quantity::BiochemicalOxygenDemand => &mut self.bod,
            Quantity::Nitrate => &mut self.nitrate,
            Quantity::FecalColiform => &mut self.fecal_coliform,
            Quantity::TotalColiform => &mut self.total_coliform,
        };
        *slot = value;
    }

    /// Origin recovered from the identifier prefix
    pub fn origin(&self) -> Option<ReadingOrigin> {
        ReadingOrigin::from_id(&self.id)
    }
}

/// Builder for [`SensorReading`]
#[derive(Debug, Clone)]
pub struct ReadingBuilder {
    reading: SensorReading,
}

impl Default for ReadingBuilder {
    fn default() -> Self {
        Self {
            reading: SensorReading {
                id: "MAN-00000".to_string(),
                timestamp: 0,
                acidity: 7.2,
                turbidity: 1.0,
                tds: 300.0,
                temperature: 25.0,
                dissolved_oxygen: 6.5,
                conductivity: 450.0,
                bod: 1.2,
                nitrate: 2.0,
                fecal_coliform: 450.0,
                total_coliform: 1200.0,
                location: Location::default(),
                category: WaterSourceCategory::River,
            },
        }
    }
}

impl ReadingBuilder {
    /// Set the identifier
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.reading.id = id.into();
        self
    }

    /// Set the timestamp
    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.reading.timestamp = timestamp;
        self
    }

    /// Set any quantity
    pub fn quantity(mut self, quantity: Quantity, value: f64) -> Self {
        self.reading.set(quantity, value);
        self
    }

    /// Set pH
    pub fn acidity(self, value: f64) -> Self {
        self.quantity(Quantity::Acidity, value)
    }

    /// Set turbidity
    pub fn turbidity(self, value: f64) -> Self {
        self.quantity(Quantity::Turbidity, value)
    }

    /// Set total dissolved solids
    pub fn tds(self, value: f64) -> Self {
        self.quantity(Quantity::TotalDissolvedSolids, value)
    }

    /// Set temperature
    pub fn temperature(self, value: f64) -> Self {
        self.quantity(Quantity::Temperature, value)
    }

    /// Set dissolved oxygen
    pub fn dissolved_oxygen(self, value: f64) -> Self {
        self.quantity(Quantity::DissolvedOxygen, value)
    }

    /// Set conductivity
    pub fn conductivity(self, value: f64) -> Self {
        self.quantity(Quantity::Conductivity, value)
    }

    /// Set biochemical oxygen demand
    pub fn bod(self, value: f64) -> Self {
        self.quantity(Quantity::BiochemicalOxygenDemand, value)
    }

    /// Set nitrate
    pub fn nitrate(self, value: f64) -> Self {
        self.quantity(Quantity::Nitrate, value)
    }

    /// Set fecal coliform
    pub fn fecal_coliform(self, value: f64) -> Self {
        self.quantity(Quantity::FecalColiform, value)
    }

    /// Set total coliform
    pub fn total_coliform(self, value: f64) -> Self {
        self.quantity(Quantity::TotalColiform, value)
    }

    /// Set the station
    pub fn location(mut self, location: Location) -> Self {
        self.reading.location = location;
        self
    }

    /// Set the source category
    pub fn category(mut self, category: WaterSourceCategory) -> Self {
        self.reading.category = category;
        self
    }

    /// Finish; no validation happens here
    pub fn build(self) -> SensorReading {
        self.reading
    }
}
