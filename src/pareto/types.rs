//! Objective-space view of a solution.

/// A solution viewed through its objective values.
///
/// The controller never inspects decision variables; every credit
/// definition and quality indicator works on objective vectors only.
/// All objectives are **minimized**.
///
/// # Implementing
///
/// ```ignore
/// #[derive(Clone)]
/// struct Candidate {
///     genes: Vec<f64>,
///     objectives: Vec<f64>,
/// }
///
/// impl ObjectiveVector for Candidate {
///     fn objectives(&self) -> &[f64] {
///         &self.objectives
///     }
/// }
/// ```
pub trait ObjectiveVector: Send + Sync {
    /// Returns the objective values of this solution.
    fn objectives(&self) -> &[f64];
}

impl ObjectiveVector for Vec<f64> {
    fn objectives(&self) -> &[f64] {
        self
    }
}

impl ObjectiveVector for Box<[f64]> {
    fn objectives(&self) -> &[f64] {
        self
    }
}

impl<T: ObjectiveVector> ObjectiveVector for &T {
    fn objectives(&self) -> &[f64] {
        (**self).objectives()
    }
}
