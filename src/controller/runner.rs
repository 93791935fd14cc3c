//! Select, reward, update cycle.

use crate::credit::{CreditDefinition, PopulationSnapshot};
use crate::error::{CreditError, Result};
use crate::heuristic::HeuristicId;
use crate::pareto::ObjectiveVector;
use crate::repository::{CreditAggregation, CreditRepository, MeanAggregation};
use crate::selector::HeuristicSelector;
use rand::Rng;
use tracing::instrument;

/// Drives adaptive operator selection one generation at a time.
///
/// Owns the selector, the credit repository, the aggregation strategy and
/// the credit definition. Every generation is one `select` followed by one
/// `reward`; calling them out of order fails with
/// [`CreditError::SelectionOrder`].
///
/// # Examples
///
/// ```
/// use u_hyperheur::controller::Controller;
/// use u_hyperheur::credit::{CreditConfig, CreditFactory, PopulationSnapshot, ProblemDescriptor};
/// use u_hyperheur::heuristic::HeuristicId;
/// use u_hyperheur::repository::MeanAggregation;
/// use u_hyperheur::selector::RandomSelect;
///
/// let credit = CreditFactory::create("OPDo", &CreditConfig::default(), &ProblemDescriptor::new(2))
///     .unwrap();
/// let selector = RandomSelect::new([HeuristicId::new(0), HeuristicId::new(1)]).unwrap();
/// let mut controller = Controller::new(selector, credit, MeanAggregation);
///
/// let mut rng = rand::rng();
/// let picked = controller.select(&mut rng).unwrap();
///
/// // ... apply `picked` to the parents ...
/// let parents = vec![vec![2.0, 2.0]];
/// let offspring = vec![vec![1.0, 1.0]];
/// let snapshot = PopulationSnapshot::new()
///     .with_parents(&parents)
///     .with_offspring(&offspring);
///
/// assert_eq!(controller.reward(&snapshot).unwrap(), 1.0);
/// assert_eq!(controller.repository().history(picked).len(), 1);
/// ```
#[derive(Debug)]
pub struct Controller<Sel, A = MeanAggregation> {
    selector: Sel,
    repository: CreditRepository,
    aggregation: A,
    credit: CreditDefinition,
    generation: usize,
    pending: Option<HeuristicId>,
}

impl<Sel, A> Controller<Sel, A>
where
    Sel: HeuristicSelector,
    A: CreditAggregation,
{
    pub fn new(selector: Sel, credit: CreditDefinition, aggregation: A) -> Self {
        Self {
            selector,
            repository: CreditRepository::new(),
            aggregation,
            credit,
            generation: 0,
            pending: None,
        }
    }

    /// Picks the heuristic to apply this generation.
    ///
    /// # Errors
    ///
    /// [`CreditError::SelectionOrder`] if the previous pick has not been
    /// rewarded yet.
    #[instrument(level = "debug", skip_all, fields(generation = self.generation))]
    pub fn select<R: Rng>(&mut self, rng: &mut R) -> Result<HeuristicId> {
        if let Some(pending) = self.pending {
            return Err(CreditError::SelectionOrder(format!(
                "heuristic {pending} was selected but not rewarded"
            )));
        }
        let heuristic = self.selector.next_heuristic(rng);
        self.pending = Some(heuristic);
        tracing::debug!(%heuristic, selector = self.selector.name(), "selected heuristic");
        Ok(heuristic)
    }

    /// Scores the pending heuristic's outcome, records it and refreshes the
    /// selector. Returns the credit.
    ///
    /// On error nothing is recorded and the selection stays pending, so the
    /// caller may retry with a corrected snapshot.
    ///
    /// # Errors
    ///
    /// - [`CreditError::SelectionOrder`] if nothing is pending
    /// - [`CreditError::InvalidSnapshot`] if the snapshot lacks what the
    ///   credit definition reads
    #[instrument(level = "debug", skip_all, fields(generation = self.generation))]
    pub fn reward<S: ObjectiveVector>(&mut self, snapshot: &PopulationSnapshot<'_, S>) -> Result<f64> {
        let heuristic = self.pending.ok_or_else(|| {
            CreditError::SelectionOrder("reward called without a pending selection".into())
        })?;
        let credit = self.credit.compute(snapshot).inspect_err(|err| {
            tracing::warn!(%heuristic, %err, "credit computation failed");
        })?;
        self.repository.record(heuristic, credit, self.generation)?;
        self.selector.update(&self.repository, &self.aggregation);

        tracing::debug!(
            %heuristic,
            credit,
            definition = %self.credit.name(),
            "rewarded heuristic"
        );
        self.pending = None;
        self.generation += 1;
        Ok(credit)
    }

    /// Current aggregated estimate of every candidate heuristic.
    pub fn estimates(&self) -> Vec<(HeuristicId, f64)> {
        self.selector
            .heuristics()
            .iter()
            .map(|&h| (h, self.aggregation.aggregate(&self.repository, h)))
            .collect()
    }

    /// Heuristic selected but not yet rewarded.
    pub fn pending(&self) -> Option<HeuristicId> {
        self.pending
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn selector(&self) -> &Sel {
        &self.selector
    }

    pub fn repository(&self) -> &CreditRepository {
        &self.repository
    }

    pub fn aggregation(&self) -> &A {
        &self.aggregation
    }

    pub fn credit_definition(&self) -> &CreditDefinition {
        &self.credit
    }
}
