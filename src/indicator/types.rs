//! Quality indicator capability.

/// Whether larger or smaller indicator values are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Larger is better (e.g. hypervolume).
    Maximize,
    /// Smaller is better (e.g. R2, additive epsilon).
    Minimize,
}

impl Orientation {
    /// Signed improvement going from `before` to `after`; positive means better.
    pub fn improvement(self, before: f64, after: f64) -> f64 {
        match self {
            Orientation::Maximize => after - before,
            Orientation::Minimize => before - after,
        }
    }
}

/// A unary set-quality function over objective vectors.
///
/// Indicators are built once per run with their reference data (reference
/// point, ideal point, weight vectors) and are immutable afterwards, so a
/// single instance can be shared across threads and generations.
///
/// The empty set scores as if it contained only the reference point, which
/// keeps every value finite and makes "contribution of the only member"
/// well defined.
pub trait QualityIndicator: Send + Sync {
    /// Returns a short name such as `"HV"`.
    fn name(&self) -> &str;

    /// Number of objectives the reference data was built for.
    fn num_objectives(&self) -> usize;

    /// Direction in which this indicator improves.
    fn orientation(&self) -> Orientation;

    /// Evaluates a set of objective vectors.
    fn evaluate(&self, set: &[&[f64]]) -> f64;

    /// Improvement of the indicator from `before` to `after` (positive = better).
    fn gain(&self, before: &[&[f64]], after: &[&[f64]]) -> f64 {
        self.orientation()
            .improvement(self.evaluate(before), self.evaluate(after))
    }
}
