//! Tabular Calibration
//!
//! ## Overview
//!
//! Field teams upload monitoring spreadsheets exported as CSV. Calibration
//! locates the pH, BOD, fecal coliform and dissolved-oxygen columns by header
//! name, averages them, and derives advisory scoring weights for the
//! selected source category.
//!
//! The statistics are advisory: nothing here feeds back into the scorers.
//!
//! ## Column Recognition
//!
//! Headers are matched case-insensitively against synonym patterns, most
//! specific pattern first, so a sheet carrying both `Fecal Coliform` and
//! `Total Coliform` resolves fecal to the former:
//!
//! | Column | Patterns (in priority order)                                  |
//! |--------|---------------------------------------------------------------|
//! | pH     | `ph`, `p.h`, `acidity`                                        |
//! | BOD    | `bod`, `b.o.d`, `biochemical`, `biological`, `oxygen demand`  |
//! | fecal  | `fecal`/`faecal`, `f.c`/`fc`, `coliform`, `bacteria`, `microbial` |
//! | DO     | `d.o`/`do`, `dissolved oxygen`                                |
//!
//! ## Derived Weights
//!
//! ```text
//! phWeight    = clamp(|mean pH − 7| · 1.5 + 1, 0.5, 2.5)
//! bodWeight   = clamp(mean BOD / 2 + 0.5, 1, 5)
//! fecalWeight = 6.5 for Drains, 3.2 otherwise
//! doWeight    = 2.5
//! fidelity    = min(99.9, 97 + rows / 1000)
//! ```
//!
//! A column that is missing or holds no numbers averages to its neutral
//! value (pH 7, BOD 2).

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use aquai_core::{TimeSource, Timestamp, WaterSourceCategory};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Headers listed when no column is recognized
const AVAILABLE_PREVIEW: usize = 5;

const NEUTRAL_ACIDITY: f64 = 7.0;
const NEUTRAL_BOD: f64 = 2.0;

#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error("dataset is empty")]
    EmptyDataset,

    #[error("no recognized columns; available: {}", .available.join(", "))]
    NoRecognizedColumns { available: Vec<String> },

    #[error("recognized columns contain no numeric data")]
    NoNumericData,

    #[error("failed to read dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to open dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid column pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Columns calibration looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CalibrationColumn {
    Ph,
    Bod,
    Fecal,
    Do,
}

impl CalibrationColumn {
    pub const ALL: [CalibrationColumn; 4] = [
        CalibrationColumn::Ph,
        CalibrationColumn::Bod,
        CalibrationColumn::Fecal,
        CalibrationColumn::Do,
    ];

    pub const fn key(&self) -> &'static str {
        match self {
            CalibrationColumn::Ph => "ph",
            CalibrationColumn::Bod => "bod",
            CalibrationColumn::Fecal => "fecal",
            CalibrationColumn::Do => "do",
        }
    }

    /// Whether a value in this column makes its row a data point
    ///
    /// Dissolved oxygen is averaged but never counted on its own.
    pub const fn counts_rows(&self) -> bool {
        !matches!(self, CalibrationColumn::Do)
    }

    const fn patterns(&self) -> &'static [&'static str] {
        match self {
            CalibrationColumn::Ph => &[r"(?i)\bph\b", r"(?i)\bp\.h\b", r"(?i)acidity"],
            CalibrationColumn::Bod => &[
                r"(?i)\bbod\b",
                r"(?i)\bb\.o\.d\b",
                r"(?i)biochemical",
                r"(?i)biological",
                r"(?i)oxygen\s+demand",
            ],
            CalibrationColumn::Fecal => &[
                r"(?i)fa?ecal",
                r"(?i)\bf\.?c\b",
                r"(?i)coliform",
                r"(?i)bacteria",
                r"(?i)microbial",
            ],
            CalibrationColumn::Do => &[r"(?i)\bd\.?o\b", r"(?i)dissolved\s+oxygen"],
        }
    }
}

/// Compiled header synonyms
pub struct ColumnMatcher {
    rules: Vec<(CalibrationColumn, Vec<Regex>)>,
}

impl ColumnMatcher {
    pub fn new() -> Result<Self, CalibrationError> {
        let mut rules = Vec::with_capacity(CalibrationColumn::ALL.len());
        for column in CalibrationColumn::ALL {
            let patterns = column
                .patterns()
                .iter()
                .map(|p| Regex::new(p))
                .collect::<Result<Vec<_>, _>>()?;
            rules.push((column, patterns));
        }
        Ok(Self { rules })
    }

    /// Header index for each recognized column
    ///
    /// A header is claimed by at most one column.
    pub fn identify(&self, headers: &[String]) -> BTreeMap<CalibrationColumn, usize> {
        let mut found = BTreeMap::new();

        for (column, patterns) in &self.rules {
            let claimed: Vec<usize> = found.values().copied().collect();
            let hit = patterns.iter().find_map(|pattern| {
                headers
                    .iter()
                    .enumerate()
                    .find(|(index, header)| !claimed.contains(index) && pattern.is_match(header))
                    .map(|(index, _)| index)
            });
            if let Some(index) = hit {
                found.insert(*column, index);
            }
        }

        found
    }
}

/// Header row plus string cells, as read from one or more sheets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Add a row; short rows are padded and long rows truncated
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CalibrationError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let mut dataset = Self::new(headers);

        for record in reader.records() {
            let record = record?;
            dataset.push_row(record.iter().map(str::to_string).collect());
        }

        Ok(dataset)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CalibrationError> {
        let file = File::open(path.as_ref())?;
        Self::from_csv_reader(file)
    }

    /// Merge another sheet, aligning cells by header name
    ///
    /// Headers unknown to `self` are appended as new columns.
    pub fn append(&mut self, other: Dataset) {
        let mut positions = Vec::with_capacity(other.headers.len());
        for header in &other.headers {
            let index = match self.headers.iter().position(|h| h == header) {
                Some(index) => index,
                None => {
                    self.headers.push(header.clone());
                    for row in self.rows.iter_mut() {
                        row.push(String::new());
                    }
                    self.headers.len() - 1
                }
            };
            positions.push(index);
        }

        for row in other.rows {
            let mut aligned = vec![String::new(); self.headers.len()];
            for (cell, &index) in row.into_iter().zip(positions.iter()) {
                aligned[index] = cell;
            }
            self.rows.push(aligned);
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Advisory statistics from one calibration run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationStats {
    pub ph_weight: f64,
    pub bod_weight: f64,
    pub fecal_weight: f64,
    pub do_weight: f64,
    /// Rows with at least one numeric recognized cell
    pub data_points: usize,
    /// Percentage in [97, 99.9]
    pub fidelity: f64,
    pub seasonal_variance: f64,
    /// Milliseconds since the Unix epoch
    pub trained_at: Timestamp,
    /// Column means keyed by `ph`, `bod`, `fecal`, `do`
    pub mean_values: BTreeMap<String, f64>,
    pub virtual_path: String,
    /// Headers that were recognized, in column order
    pub identified_columns: Vec<String>,
}

/// Leading number of a cell such as `7.4` or `12 mg/l`
fn parse_leading_number(pattern: &Regex, cell: &str) -> Option<f64> {
    let found = pattern.find(cell.trim())?;
    found.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Storage path used by the dashboard for a category's datasets
pub fn virtual_path(category: WaterSourceCategory) -> String {
    let slug = category
        .label()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    format!("assets/{slug}/")
}

/// Compute calibration statistics for a dataset
pub fn calibrate<T: TimeSource>(
    dataset: &Dataset,
    category: WaterSourceCategory,
    clock: &T,
) -> Result<CalibrationStats, CalibrationError> {
    if dataset.is_empty() {
        return Err(CalibrationError::EmptyDataset);
    }

    let matcher = ColumnMatcher::new()?;
    let columns = matcher.identify(dataset.headers());
    if columns.is_empty() {
        return Err(CalibrationError::NoRecognizedColumns {
            available: dataset
                .headers()
                .iter()
                .take(AVAILABLE_PREVIEW)
                .cloned()
                .collect(),
        });
    }

    let number = Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?")?;
    let mut sums: BTreeMap<CalibrationColumn, Accumulator> = BTreeMap::new();
    let mut data_points = 0usize;

    for row in dataset.rows() {
        let mut row_has_data = false;
        for (&column, &index) in &columns {
            let value = row.get(index).and_then(|cell| parse_leading_number(&number, cell));
            if let Some(value) = value {
                let acc = sums.entry(column).or_default();
                acc.sum += value;
                acc.count += 1;
                row_has_data |= column.counts_rows();
            }
        }
        if row_has_data {
            data_points += 1;
        }
    }

    if data_points == 0 {
        return Err(CalibrationError::NoNumericData);
    }

    let mean = |column: CalibrationColumn| sums.get(&column).and_then(Accumulator::mean);
    let mean_ph = mean(CalibrationColumn::Ph).unwrap_or(NEUTRAL_ACIDITY);
    let mean_bod = mean(CalibrationColumn::Bod).unwrap_or(NEUTRAL_BOD);

    let mut mean_values = BTreeMap::new();
    mean_values.insert(CalibrationColumn::Ph.key().to_string(), mean_ph);
    mean_values.insert(CalibrationColumn::Bod.key().to_string(), mean_bod);
    for column in [CalibrationColumn::Fecal, CalibrationColumn::Do] {
        if let Some(value) = mean(column) {
            mean_values.insert(column.key().to_string(), value);
        }
    }

    let mut identified: Vec<usize> = columns.values().copied().collect();
    identified.sort_unstable();
    let identified_columns = identified
        .into_iter()
        .map(|index| dataset.headers()[index].clone())
        .collect();

    let drains = category == WaterSourceCategory::Drains;

    let stats = CalibrationStats {
        ph_weight: ((mean_ph - NEUTRAL_ACIDITY).abs() * 1.5 + 1.0).clamp(0.5, 2.5),
        bod_weight: (mean_bod / 2.0 + 0.5).clamp(1.0, 5.0),
        fecal_weight: if drains { 6.5 } else { 3.2 },
        do_weight: 2.5,
        data_points,
        fidelity: (97.0 + data_points as f64 / 1_000.0).min(99.9),
        seasonal_variance: if drains { 0.45 } else { 0.15 },
        trained_at: clock.now(),
        mean_values,
        virtual_path: virtual_path(category),
        identified_columns,
    };

    log::info!(
        "calibrated {} rows for {} ({} columns)",
        stats.data_points,
        category,
        stats.identified_columns.len()
    );

    Ok(stats)
}

/// Read and merge several CSV files, then calibrate
pub fn calibrate_files<P, T>(
    paths: &[P],
    category: WaterSourceCategory,
    clock: &T,
) -> Result<CalibrationStats, CalibrationError>
where
    P: AsRef<Path>,
    T: TimeSource,
{
    let mut merged: Option<Dataset> = None;
    for path in paths {
        let dataset = Dataset::from_path(path)?;
        match merged.as_mut() {
            Some(existing) => existing.append(dataset),
            None => merged = Some(dataset),
        }
    }

    calibrate(&merged.unwrap_or_default(), category, clock)
}
