//! Reducing a credit history to one current estimate.

use super::store::{CreditRepository, History};
use crate::error::{CreditError, Result};
use crate::heuristic::HeuristicId;

/// Estimate reported for a heuristic with no observations.
pub const NEUTRAL_CREDIT: f64 = 0.0;

/// Reduces one heuristic's history into a scalar estimate.
///
/// Implementations are pure: they read the repository and never mutate it.
/// An empty history always yields [`NEUTRAL_CREDIT`].
pub trait CreditAggregation: Send + Sync {
    /// Returns a short name for logging.
    fn name(&self) -> &str;

    /// Current estimate for `heuristic`.
    fn aggregate(&self, repository: &CreditRepository, heuristic: HeuristicId) -> f64 {
        self.aggregate_history(&repository.history(heuristic))
    }

    /// Reduces an already-copied history.
    fn aggregate_history(&self, history: &History) -> f64;
}

/// Arithmetic mean of every observation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeanAggregation;

impl CreditAggregation for MeanAggregation {
    fn name(&self) -> &str {
        "mean"
    }

    fn aggregate_history(&self, history: &History) -> f64 {
        mean(history.values())
    }
}

/// Sum of every observation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SumAggregation;

impl CreditAggregation for SumAggregation {
    fn name(&self) -> &str {
        "sum"
    }

    fn aggregate_history(&self, history: &History) -> f64 {
        history.values().sum()
    }
}

/// Recency-weighted mean.
///
/// An observation `a` generations older than the repository's latest
/// generation weighs `decay^a`. With `decay = 1` this is the plain mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayingAggregation {
    decay: f64,
}

impl DecayingAggregation {
    /// # Errors
    ///
    /// [`CreditError::Configuration`] unless `decay` is in (0, 1].
    pub fn new(decay: f64) -> Result<Self> {
        if !(decay > 0.0 && decay <= 1.0) {
            return Err(CreditError::Configuration(format!(
                "decay must be in (0, 1], got {decay}"
            )));
        }
        Ok(Self { decay })
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }
}

impl CreditAggregation for DecayingAggregation {
    fn name(&self) -> &str {
        "decaying"
    }

    fn aggregate_history(&self, history: &History) -> f64 {
        let Some(latest) = history.latest_generation() else {
            return NEUTRAL_CREDIT;
        };
        let (weighted, total) = history.iter().fold((0.0, 0.0), |(sum, total), o| {
            let age = latest.saturating_sub(o.generation);
            let w = self.decay.powi(age.min(i32::MAX as usize) as i32);
            (sum + w * o.value, total + w)
        });
        // Very old observations can underflow to zero weight.
        if total > 0.0 {
            weighted / total
        } else {
            NEUTRAL_CREDIT
        }
    }
}

/// Mean over the last `window` generations.
///
/// The window is anchored at the repository's latest generation over all
/// heuristics, so a heuristic that has not been picked recently falls back
/// to [`NEUTRAL_CREDIT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowAggregation {
    window: usize,
}

impl WindowAggregation {
    /// # Errors
    ///
    /// [`CreditError::Configuration`] if `window` is zero.
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(CreditError::Configuration(
                "window must be positive".into(),
            ));
        }
        Ok(Self { window })
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl CreditAggregation for WindowAggregation {
    fn name(&self) -> &str {
        "window"
    }

    fn aggregate_history(&self, history: &History) -> f64 {
        let Some(latest) = history.latest_generation() else {
            return NEUTRAL_CREDIT;
        };
        mean(
            history
                .iter()
                .filter(|o| latest.saturating_sub(o.generation) < self.window)
                .map(|o| o.value),
        )
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        NEUTRAL_CREDIT
    } else {
        sum / count as f64
    }
}
