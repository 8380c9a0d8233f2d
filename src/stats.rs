use serde::{Deserialize, Serialize};

use crate::history::History;

/// derived summaries of the retained history
///
/// all four fields are 0 when the history is empty. that value is a
/// sentinel, not a reading; renderers check `Snapshot::has_data` instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub current: f64,
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

impl Statistics {
    pub fn from_history(history: &History) -> Self {
        Self::compute(&history.temperatures())
    }

    /// full recomputation over `temperatures` (oldest first)
    pub fn compute(temperatures: &[f64]) -> Self {
        let Some(&current) = temperatures.last() else {
            return Self::default();
        };

        let sum: f64 = temperatures.iter().sum();
        let min = temperatures.iter().copied().fold(f64::INFINITY, f64::min);
        let max = temperatures.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            current,
            average: sum / temperatures.len() as f64,
            min,
            max,
        }
    }

    /// spread between the extremes; 0 for the sentinel and for a flat series
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}
