//! Quality indicators for sets of objective vectors.
//!
//! Every indicator implements [`QualityIndicator`]. The built-in ones are
//! gathered in the [`Indicator`] enum, which is what the credit definitions
//! hold:
//!
//! - [`Hypervolume`]: volume dominated up to a reference point (maximize)
//! - [`R2Indicator`]: mean Tchebycheff utility over weight vectors (minimize)
//! - [`AdditiveEpsilon`]: binary additive epsilon between two sets

mod epsilon;
mod hypervolume;
mod r2;
mod types;

pub use epsilon::{additive_epsilon, AdditiveEpsilon};
pub use hypervolume::Hypervolume;
pub use r2::{simplex_lattice, tchebycheff, R2Indicator};
pub use types::{Orientation, QualityIndicator};

/// Enum dispatch over the built-in indicators.
#[derive(Debug, Clone, PartialEq)]
pub enum Indicator {
    AdditiveEpsilon(AdditiveEpsilon),
    Hypervolume(Hypervolume),
    R2(R2Indicator),
}

impl QualityIndicator for Indicator {
    fn name(&self) -> &str {
        match self {
            Indicator::AdditiveEpsilon(i) => i.name(),
            Indicator::Hypervolume(i) => i.name(),
            Indicator::R2(i) => i.name(),
        }
    }

    fn num_objectives(&self) -> usize {
        match self {
            Indicator::AdditiveEpsilon(i) => i.num_objectives(),
            Indicator::Hypervolume(i) => i.num_objectives(),
            Indicator::R2(i) => i.num_objectives(),
        }
    }

    fn orientation(&self) -> Orientation {
        match self {
            Indicator::AdditiveEpsilon(i) => i.orientation(),
            Indicator::Hypervolume(i) => i.orientation(),
            Indicator::R2(i) => i.orientation(),
        }
    }

    fn evaluate(&self, set: &[&[f64]]) -> f64 {
        match self {
            Indicator::AdditiveEpsilon(i) => i.evaluate(set),
            Indicator::Hypervolume(i) => i.evaluate(set),
            Indicator::R2(i) => i.evaluate(set),
        }
    }

    fn gain(&self, before: &[&[f64]], after: &[&[f64]]) -> f64 {
        match self {
            Indicator::AdditiveEpsilon(i) => i.gain(before, after),
            Indicator::Hypervolume(i) => i.gain(before, after),
            Indicator::R2(i) => i.gain(before, after),
        }
    }
}

impl From<AdditiveEpsilon> for Indicator {
    fn from(i: AdditiveEpsilon) -> Self {
        Indicator::AdditiveEpsilon(i)
    }
}

impl From<Hypervolume> for Indicator {
    fn from(i: Hypervolume) -> Self {
        Indicator::Hypervolume(i)
    }
}

impl From<R2Indicator> for Indicator {
    fn from(i: R2Indicator) -> Self {
        Indicator::R2(i)
    }
}
