//! Reliability index
//!
//! Share of SAFE classifications in the retained history, as a whole
//! percentage. Ordering and recency inside the window do not matter.

use crate::status::SafetyStatus;

/// Index reported before any reading has been scored
pub const DEFAULT_RELIABILITY: f64 = 94.0;

/// Reliability in [0, 100]; 94 for an empty history
pub fn reliability_index<I>(statuses: I) -> f64
where
    I: IntoIterator<Item = SafetyStatus>,
{
    let (safe, total) = statuses
        .into_iter()
        .fold((0usize, 0usize), |(safe, total), status| {
            (safe + usize::from(status == SafetyStatus::Safe), total + 1)
        });

    if total == 0 {
        return DEFAULT_RELIABILITY;
    }

    (100.0 * safe as f64 / total as f64).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_optimistic() {
        assert_eq!(reliability_index(Vec::new()), DEFAULT_RELIABILITY);
    }

    #[test]
    fn all_or_nothing() {
        assert_eq!(reliability_index(vec![SafetyStatus::Safe; 7]), 100.0);
        assert_eq!(
            reliability_index(vec![SafetyStatus::Warning, SafetyStatus::Critical]),
            0.0
        );
    }

    #[test]
    fn rounds_to_whole_percent() {
        let statuses = vec![SafetyStatus::Safe, SafetyStatus::Safe, SafetyStatus::Critical];
        assert_eq!(reliability_index(statuses), 67.0);
    }

    #[test]
    fn order_is_irrelevant() {
        let a = vec![SafetyStatus::Safe, SafetyStatus::Warning, SafetyStatus::Warning];
        let b = vec![SafetyStatus::Warning, SafetyStatus::Warning, SafetyStatus::Safe];
        assert_eq!(reliability_index(a), reliability_index(b));
    }
}
