//! Discrete safety tiers

use core::fmt;

use serde::{Deserialize, Serialize};

/// Safety tier of a reading, ordered by increasing risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SafetyStatus {
    /// Fit for use
    Safe,
    /// Elevated; treat before use
    Warning,
    /// Contaminated; do not use
    Critical,
}

impl SafetyStatus {
    /// Every tier, safest first
    pub const ALL: [SafetyStatus; 3] = [SafetyStatus::Safe, SafetyStatus::Warning, SafetyStatus::Critical];

    /// Wire label
    pub const fn as_str(&self) -> &'static str {
        match self {
            SafetyStatus::Safe => "SAFE",
            SafetyStatus::Warning => "WARNING",
            SafetyStatus::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for SafetyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
