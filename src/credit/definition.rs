//! Credit definitions: one scalar reward per heuristic application.
//!
//! Three families, differing in what the offspring is compared against:
//!
//! - **Offspring vs. parent** (`OP*`): each offspring against each parent;
//!   the application earns its best pair score.
//! - **Offspring vs. population** (`SI*`): did the application improve the
//!   neighbourhood, front, or archive as a whole.
//! - **Contribution to population** (`CS*`): what the offspring adds to the
//!   neighbourhood, front, or archive.
//!
//! Membership in a front or archive is decided by exact equality of
//! objective vectors. An offspring "enters" a set when its vector is in the
//! set after insertion but was not before.
//!
//! # References
//!
//! Hitomi & Selva (2017), "A Classification and Comparison of Credit
//! Assignment Strategies in Multiobjective Adaptive Operator Selection",
//! IEEE Transactions on Evolutionary Computation, 21(2)

use super::snapshot::{PopulationSnapshot, ReferenceSet, Stage};
use crate::error::{CreditError, Result};
use crate::indicator::{tchebycheff, Indicator, QualityIndicator};
use crate::pareto::{dominance, Dominance, ObjectiveVector};

/// A constructed credit definition.
///
/// Immutable after construction; one instance serves every generation of a
/// run and may be shared across threads.
#[derive(Debug, Clone, PartialEq)]
pub enum CreditDefinition {
    /// `OPDe`: 1 if the offspring beats the parent on the parent's subproblem.
    ParentDecomposition,

    /// `OPDo`: three-way Pareto comparison of offspring and parent.
    ParentDomination {
        satisfy: f64,
        neither: f64,
        disatisfy: f64,
    },

    /// `OPIAE` / `OPIHV` / `OPIR2`: binary indicator of offspring over parent.
    ///
    /// With `d` the indicator gain of adding the offspring to `{parent}`,
    /// the credit is `1 - exp(-d / kappa)`.
    ParentIndicator { indicator: Indicator, kappa: f64 },

    /// `SIDe`: summed relative Tchebycheff improvement over the neighbourhood.
    NeighborhoodImprovement,

    /// `SIDoPF` / `SIDoA`: `satisfy` if any offspring entered the set.
    SetEntry {
        set: ReferenceSet,
        satisfy: f64,
        disatisfy: f64,
    },

    /// `SI{AE,HV,R2}{PF,A}`: indicator gain of the set, before vs. after.
    SetImprovement {
        set: ReferenceSet,
        indicator: Indicator,
    },

    /// `CSDe`: per offspring, `satisfy` if it improves any neighbour.
    NeighborhoodContribution { satisfy: f64, disatisfy: f64 },

    /// `CSDoPF` / `CSDoA`: per offspring, `satisfy` if it entered the set.
    SetContribution {
        set: ReferenceSet,
        satisfy: f64,
        disatisfy: f64,
    },

    /// `CS{HV,R2}{PF,A}`: indicator of the set minus the set without the offspring.
    IndicatorContribution {
        set: ReferenceSet,
        indicator: Indicator,
    },
}

impl CreditDefinition {
    /// The name this definition is registered under, e.g. `"SIHVPF"`.
    pub fn name(&self) -> String {
        match self {
            CreditDefinition::ParentDecomposition => "OPDe".into(),
            CreditDefinition::ParentDomination { .. } => "OPDo".into(),
            CreditDefinition::ParentIndicator { indicator, .. } => {
                format!("OPI{}", indicator.name())
            }
            CreditDefinition::NeighborhoodImprovement => "SIDe".into(),
            CreditDefinition::SetEntry { set, .. } => format!("SIDo{}", set.suffix()),
            CreditDefinition::SetImprovement { set, indicator } => {
                format!("SI{}{}", indicator.name(), set.suffix())
            }
            CreditDefinition::NeighborhoodContribution { .. } => "CSDe".into(),
            CreditDefinition::SetContribution { set, .. } => format!("CSDo{}", set.suffix()),
            CreditDefinition::IndicatorContribution { set, indicator } => {
                format!("CS{}{}", indicator.name(), set.suffix())
            }
        }
    }

    /// The quality indicator this definition uses, if any.
    pub fn indicator(&self) -> Option<&Indicator> {
        match self {
            CreditDefinition::ParentIndicator { indicator, .. }
            | CreditDefinition::SetImprovement { indicator, .. }
            | CreditDefinition::IndicatorContribution { indicator, .. } => Some(indicator),
            _ => None,
        }
    }

    /// Computes the credit of one heuristic application.
    ///
    /// # Errors
    ///
    /// [`CreditError::InvalidSnapshot`] if the snapshot lacks data this
    /// definition needs, objective counts disagree with the indicator, or
    /// the resulting credit is not finite.
    pub fn compute<S: ObjectiveVector>(&self, snapshot: &PopulationSnapshot<'_, S>) -> Result<f64> {
        let credit: f64 = match self {
            CreditDefinition::ParentDecomposition => {
                let hood = snapshot.neighborhood()?;
                best_pair(snapshot, |o, p| {
                    let g_o = tchebycheff(o, hood.home_weights, hood.ideal_point);
                    let g_p = tchebycheff(p, hood.home_weights, hood.ideal_point);
                    if g_o < g_p {
                        1.0
                    } else {
                        0.0
                    }
                })?
            }

            CreditDefinition::ParentDomination {
                satisfy,
                neither,
                disatisfy,
            } => best_pair(snapshot, |o, p| match dominance(o, p) {
                Dominance::Left => *satisfy,
                Dominance::Right => *disatisfy,
                Dominance::Neither => *neither,
            })?,

            CreditDefinition::ParentIndicator { indicator, kappa } => {
                check_dimensions(indicator, snapshot.parents()?)?;
                check_dimensions(indicator, snapshot.offspring()?)?;
                best_pair(snapshot, |o, p| {
                    let gain = indicator.gain(&[p], &[p, o]).max(0.0);
                    1.0 - (-gain / kappa).exp()
                })?
            }

            CreditDefinition::NeighborhoodImprovement => {
                let hood = snapshot.neighborhood()?;
                let mut total = 0.0;
                for o in snapshot.offspring()? {
                    for (w, incumbent) in hood.weights.iter().zip(hood.incumbents) {
                        let g_inc = tchebycheff(incumbent.objectives(), w, hood.ideal_point);
                        let g_o = tchebycheff(o.objectives(), w, hood.ideal_point);
                        if g_inc > 0.0 {
                            total += ((g_inc - g_o) / g_inc).max(0.0);
                        }
                    }
                }
                total
            }

            CreditDefinition::SetEntry {
                set,
                satisfy,
                disatisfy,
            } => {
                let (before, after) = before_after(snapshot, *set)?;
                let any_entered = snapshot
                    .offspring()?
                    .iter()
                    .any(|o| entered(o.objectives(), &before, &after));
                if any_entered {
                    *satisfy
                } else {
                    *disatisfy
                }
            }

            CreditDefinition::SetImprovement { set, indicator } => {
                let (before, after) = before_after(snapshot, *set)?;
                check_set_dimensions(indicator, &before)?;
                check_set_dimensions(indicator, &after)?;
                indicator.gain(&before, &after)
            }

            CreditDefinition::NeighborhoodContribution { satisfy, disatisfy } => {
                let hood = snapshot.neighborhood()?;
                snapshot
                    .offspring()?
                    .iter()
                    .map(|o| {
                        let improves = hood.weights.iter().zip(hood.incumbents).any(|(w, inc)| {
                            tchebycheff(o.objectives(), w, hood.ideal_point)
                                < tchebycheff(inc.objectives(), w, hood.ideal_point)
                        });
                        if improves {
                            *satisfy
                        } else {
                            *disatisfy
                        }
                    })
                    .sum::<f64>()
            }

            CreditDefinition::SetContribution {
                set,
                satisfy,
                disatisfy,
            } => {
                let (before, after) = before_after(snapshot, *set)?;
                snapshot
                    .offspring()?
                    .iter()
                    .map(|o| {
                        if entered(o.objectives(), &before, &after) {
                            *satisfy
                        } else {
                            *disatisfy
                        }
                    })
                    .sum::<f64>()
            }

            CreditDefinition::IndicatorContribution { set, indicator } => {
                let (before, after) = before_after(snapshot, *set)?;
                check_set_dimensions(indicator, &after)?;
                let new_members: Vec<&[f64]> = snapshot
                    .offspring()?
                    .iter()
                    .map(|o| o.objectives())
                    .filter(|o| entered(o, &before, &after))
                    .collect();
                let without: Vec<&[f64]> = after
                    .iter()
                    .copied()
                    .filter(|member| !new_members.contains(member))
                    .collect();
                indicator.gain(&without, &after)
            }
        };

        if !credit.is_finite() {
            return Err(CreditError::InvalidSnapshot(format!(
                "{} produced a non-finite credit ({credit})",
                self.name()
            )));
        }
        Ok(credit)
    }

    /// Scores several snapshots with this definition.
    ///
    /// Runs in parallel with rayon when the `parallel` feature is enabled.
    /// Fails on the first invalid snapshot.
    pub fn compute_batch<S: ObjectiveVector>(
        &self,
        snapshots: &[PopulationSnapshot<'_, S>],
    ) -> Result<Vec<f64>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            snapshots.par_iter().map(|s| self.compute(s)).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            snapshots.iter().map(|s| self.compute(s)).collect()
        }
    }
}

/// Best score over all (offspring, parent) pairs.
fn best_pair<S, F>(snapshot: &PopulationSnapshot<'_, S>, score: F) -> Result<f64>
where
    S: ObjectiveVector,
    F: Fn(&[f64], &[f64]) -> f64,
{
    let parents = snapshot.parents()?;
    let offspring = snapshot.offspring()?;
    Ok(offspring
        .iter()
        .flat_map(|o| parents.iter().map(move |p| (o, p)))
        .map(|(o, p)| score(o.objectives(), p.objectives()))
        .fold(f64::NEG_INFINITY, f64::max))
}

fn before_after<'a, S: ObjectiveVector>(
    snapshot: &PopulationSnapshot<'a, S>,
    set: ReferenceSet,
) -> Result<(Vec<&'a [f64]>, Vec<&'a [f64]>)> {
    Ok((
        snapshot.set(set, Stage::Before)?,
        snapshot.set(set, Stage::After)?,
    ))
}

fn entered(objectives: &[f64], before: &[&[f64]], after: &[&[f64]]) -> bool {
    after.contains(&objectives) && !before.contains(&objectives)
}

fn check_dimensions<S: ObjectiveVector>(indicator: &Indicator, solutions: &[S]) -> Result<()> {
    let m = indicator.num_objectives();
    match solutions.iter().find(|s| s.objectives().len() != m) {
        Some(bad) => Err(CreditError::InvalidSnapshot(format!(
            "{} indicator expects {m} objectives, got {}",
            indicator.name(),
            bad.objectives().len()
        ))),
        None => Ok(()),
    }
}

fn check_set_dimensions(indicator: &Indicator, set: &[&[f64]]) -> Result<()> {
    let m = indicator.num_objectives();
    match set.iter().find(|s| s.len() != m) {
        Some(bad) => Err(CreditError::InvalidSnapshot(format!(
            "{} indicator expects {m} objectives, got {}",
            indicator.name(),
            bad.len()
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credit::Neighborhood;
    use crate::indicator::{AdditiveEpsilon, Hypervolume, R2Indicator};

    fn hv() -> Indicator {
        Hypervolume::new(vec![2.0, 2.0]).unwrap().into()
    }

    fn r2() -> Indicator {
        R2Indicator::new(vec![0.0, 0.0], vec![2.0, 2.0], 50).unwrap().into()
    }

    fn ae() -> Indicator {
        AdditiveEpsilon::new(vec![2.0, 2.0]).unwrap().into()
    }

    fn op_domination() -> CreditDefinition {
        CreditDefinition::ParentDomination {
            satisfy: 1.0,
            neither: 0.5,
            disatisfy: -1.0,
        }
    }

    fn pair(parent: Vec<f64>, child: Vec<f64>) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        (vec![parent], vec![child])
    }

    #[test]
    fn test_parent_domination_branches() {
        let def = op_domination();

        let (p, o) = pair(vec![1.0, 1.0], vec![0.5, 0.5]);
        let s = PopulationSnapshot::new().with_parents(&p).with_offspring(&o);
        assert_eq!(def.compute(&s).unwrap(), 1.0);

        let (p, o) = pair(vec![0.5, 0.5], vec![1.0, 1.0]);
        let s = PopulationSnapshot::new().with_parents(&p).with_offspring(&o);
        assert_eq!(def.compute(&s).unwrap(), -1.0);

        let (p, o) = pair(vec![0.5, 1.0], vec![1.0, 0.5]);
        let s = PopulationSnapshot::new().with_parents(&p).with_offspring(&o);
        assert_eq!(def.compute(&s).unwrap(), 0.5);
    }

    #[test]
    fn test_parent_domination_needs_parent() {
        let o = vec![vec![1.0, 1.0]];
        let s = PopulationSnapshot::new().with_offspring(&o);
        assert!(matches!(
            op_domination().compute(&s),
            Err(CreditError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_parent_indicator_identical_offspring_is_zero() {
        for indicator in [hv(), r2(), ae()] {
            let def = CreditDefinition::ParentIndicator {
                indicator,
                kappa: 0.05,
            };
            let (p, o) = pair(vec![0.7, 0.9], vec![0.7, 0.9]);
            let s = PopulationSnapshot::new().with_parents(&p).with_offspring(&o);
            assert_eq!(def.compute(&s).unwrap(), 0.0, "{}", def.name());
        }
    }

    #[test]
    fn test_parent_indicator_rewards_improvement() {
        let def = CreditDefinition::ParentIndicator {
            indicator: hv(),
            kappa: 0.05,
        };
        let (p, o) = pair(vec![1.0, 1.0], vec![0.5, 0.5]);
        let s = PopulationSnapshot::new().with_parents(&p).with_offspring(&o);
        let credit = def.compute(&s).unwrap();
        assert!(credit > 0.9 && credit < 1.0, "credit {credit}");

        // Dominated offspring adds no hypervolume.
        let (p, o) = pair(vec![0.5, 0.5], vec![1.0, 1.0]);
        let s = PopulationSnapshot::new().with_parents(&p).with_offspring(&o);
        assert_eq!(def.compute(&s).unwrap(), 0.0);
    }

    #[test]
    fn test_parent_indicator_additive_epsilon_rewards_dominating_offspring() {
        let def = CreditDefinition::ParentIndicator {
            indicator: ae(),
            kappa: 0.05,
        };
        let (p, o) = pair(vec![0.5, 0.9], vec![0.1, 0.9]);
        let s = PopulationSnapshot::new().with_parents(&p).with_offspring(&o);
        // gain 0.4 -> 1 - exp(-8)
        let credit = def.compute(&s).unwrap();
        assert!(credit > 0.99, "credit {credit}");

        let (p, o) = pair(vec![0.1, 0.9], vec![0.5, 0.9]);
        let s = PopulationSnapshot::new().with_parents(&p).with_offspring(&o);
        assert_eq!(def.compute(&s).unwrap(), 0.0);
    }

    #[test]
    fn test_parent_indicator_dimension_mismatch() {
        let def = CreditDefinition::ParentIndicator {
            indicator: hv(),
            kappa: 0.05,
        };
        let (p, o) = pair(vec![1.0, 1.0, 1.0], vec![0.5, 0.5, 0.5]);
        let s = PopulationSnapshot::new().with_parents(&p).with_offspring(&o);
        assert!(matches!(def.compute(&s), Err(CreditError::InvalidSnapshot(_))));
    }

    #[test]
    fn test_parent_decomposition() {
        let ideal = [0.0, 0.0];
        let home = [0.5, 0.5];
        let weights: Vec<Vec<f64>> = Vec::new();
        let incumbents: Vec<Vec<f64>> = Vec::new();
        let hood = Neighborhood::new(&ideal, &home, &weights, &incumbents);

        let (p, o) = pair(vec![0.8, 0.2], vec![0.6, 0.5]);
        let s = PopulationSnapshot::new()
            .with_parents(&p)
            .with_offspring(&o)
            .with_neighborhood(hood);
        // g(p) = 0.4, g(o) = 0.3
        assert_eq!(CreditDefinition::ParentDecomposition.compute(&s).unwrap(), 1.0);

        let (p, o) = pair(vec![0.6, 0.5], vec![0.8, 0.2]);
        let s = PopulationSnapshot::new()
            .with_parents(&p)
            .with_offspring(&o)
            .with_neighborhood(hood);
        assert_eq!(CreditDefinition::ParentDecomposition.compute(&s).unwrap(), 0.0);
    }

    #[test]
    fn test_parent_decomposition_rejects_dimension_mismatch() {
        let ideal = [0.0, 0.0];
        let home = [0.5, 0.5];
        let weights: Vec<Vec<f64>> = Vec::new();
        let incumbents: Vec<Vec<f64>> = Vec::new();
        let hood = Neighborhood::new(&ideal, &home, &weights, &incumbents);

        let (p, o) = pair(vec![0.5, 0.5, 0.1], vec![0.4, 0.4, 9.0]);
        let s = PopulationSnapshot::new()
            .with_parents(&p)
            .with_offspring(&o)
            .with_neighborhood(hood);
        assert!(matches!(
            CreditDefinition::ParentDecomposition.compute(&s),
            Err(CreditError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_neighborhood_improvement_and_contribution() {
        let ideal = [0.0, 0.0];
        let home = [0.5, 0.5];
        let weights = vec![vec![0.5, 0.5], vec![1.0, 0.0]];
        let incumbents = vec![vec![1.0, 1.0], vec![0.1, 0.9]];
        let hood = Neighborhood::new(&ideal, &home, &weights, &incumbents);
        let offspring = vec![vec![0.5, 0.5]];
        let s = PopulationSnapshot::new()
            .with_offspring(&offspring)
            .with_neighborhood(hood);

        // neighbour 0: g_inc = 0.5, g_o = 0.25 -> 0.5; neighbour 1: g_inc = 0.1, g_o = 0.5 -> 0
        let improvement = CreditDefinition::NeighborhoodImprovement.compute(&s).unwrap();
        assert!((improvement - 0.5).abs() < 1e-9);

        let contribution = CreditDefinition::NeighborhoodContribution {
            satisfy: 1.0,
            disatisfy: -0.5,
        };
        assert_eq!(contribution.compute(&s).unwrap(), 1.0);

        let worse = vec![vec![3.0, 3.0]];
        let s = PopulationSnapshot::new()
            .with_offspring(&worse)
            .with_neighborhood(hood);
        assert_eq!(contribution.compute(&s).unwrap(), -0.5);
        assert_eq!(CreditDefinition::NeighborhoodImprovement.compute(&s).unwrap(), 0.0);
    }

    #[test]
    fn test_set_entry_two_valued() {
        let def = CreditDefinition::SetEntry {
            set: ReferenceSet::ParetoFront,
            satisfy: 1.0,
            disatisfy: 0.0,
        };
        let before = vec![vec![1.0, 3.0], vec![3.0, 1.0]];
        let after = vec![vec![1.0, 3.0], vec![3.0, 1.0], vec![2.0, 2.0]];
        let offspring = vec![vec![2.0, 2.0]];
        let s = PopulationSnapshot::new()
            .with_offspring(&offspring)
            .with_front(&before, &after);
        assert_eq!(def.compute(&s).unwrap(), 1.0);

        let rejected = vec![vec![4.0, 4.0]];
        let s = PopulationSnapshot::new()
            .with_offspring(&rejected)
            .with_front(&before, &before);
        assert_eq!(def.compute(&s).unwrap(), 0.0);
    }

    #[test]
    fn test_duplicate_of_existing_member_did_not_enter() {
        let def = CreditDefinition::SetEntry {
            set: ReferenceSet::Archive,
            satisfy: 1.0,
            disatisfy: 0.0,
        };
        let archive = vec![vec![1.0, 3.0], vec![3.0, 1.0]];
        let offspring = vec![vec![1.0, 3.0]];
        let s = PopulationSnapshot::new()
            .with_offspring(&offspring)
            .with_archive(&archive, &archive);
        assert_eq!(def.compute(&s).unwrap(), 0.0);
    }

    #[test]
    fn test_set_improvement_hypervolume() {
        let def = CreditDefinition::SetImprovement {
            set: ReferenceSet::ParetoFront,
            indicator: hv(),
        };
        let before = vec![vec![1.0, 1.0]];
        let after = vec![vec![0.5, 0.5]];
        let offspring = vec![vec![0.5, 0.5]];
        let s = PopulationSnapshot::new()
            .with_offspring(&offspring)
            .with_front(&before, &after);
        // 1.5^2 - 1^2
        assert!((def.compute(&s).unwrap() - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_set_improvement_additive_epsilon() {
        let def = CreditDefinition::SetImprovement {
            set: ReferenceSet::ParetoFront,
            indicator: ae(),
        };
        let before = vec![vec![0.5, 0.9], vec![1.5, 0.95]];
        let after = vec![vec![0.1, 0.9], vec![0.2, 0.95]];
        let offspring = after.clone();
        let s = PopulationSnapshot::new()
            .with_offspring(&offspring)
            .with_front(&before, &after);
        assert!((def.compute(&s).unwrap() - 0.4).abs() < 1e-12);

        // An unchanged front earns nothing.
        let s = PopulationSnapshot::new()
            .with_offspring(&offspring)
            .with_front(&before, &before);
        assert_eq!(def.compute(&s).unwrap(), 0.0);
    }

    #[test]
    fn test_set_contribution_counts_offspring() {
        let def = CreditDefinition::SetContribution {
            set: ReferenceSet::ParetoFront,
            satisfy: 1.0,
            disatisfy: -1.0,
        };
        let before = vec![vec![1.0, 3.0], vec![3.0, 1.0]];
        let after = vec![vec![1.0, 3.0], vec![3.0, 1.0], vec![2.0, 2.0]];
        let offspring = vec![vec![2.0, 2.0], vec![4.0, 4.0]];
        let s = PopulationSnapshot::new()
            .with_offspring(&offspring)
            .with_front(&before, &after);
        assert_eq!(def.compute(&s).unwrap(), 0.0);
    }

    #[test]
    fn test_indicator_contribution() {
        let def = CreditDefinition::IndicatorContribution {
            set: ReferenceSet::ParetoFront,
            indicator: hv(),
        };
        let before = vec![vec![0.0, 1.0]];
        let after = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        let offspring = vec![vec![1.0, 0.0]];
        let s = PopulationSnapshot::new()
            .with_offspring(&offspring)
            .with_front(&before, &after);
        // HV(after) = 3, HV(after without offspring) = 2
        assert!((def.compute(&s).unwrap() - 1.0).abs() < 1e-12);

        // Sole member: contribution equals its whole hypervolume.
        let empty: Vec<Vec<f64>> = Vec::new();
        let only = vec![vec![1.0, 1.0]];
        let s = PopulationSnapshot::new()
            .with_offspring(&only)
            .with_front(&empty, &only);
        assert!((def.compute(&s).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_names() {
        let def = CreditDefinition::SetImprovement {
            set: ReferenceSet::Archive,
            indicator: r2(),
        };
        assert_eq!(def.name(), "SIR2A");
        assert_eq!(op_domination().name(), "OPDo");
        assert!(op_domination().indicator().is_none());
    }

    #[test]
    fn test_compute_batch() {
        let def = op_domination();
        let p = vec![vec![1.0, 1.0]];
        let better = vec![vec![0.5, 0.5]];
        let worse = vec![vec![2.0, 2.0]];
        let snapshots = vec![
            PopulationSnapshot::new().with_parents(&p).with_offspring(&better),
            PopulationSnapshot::new().with_parents(&p).with_offspring(&worse),
        ];
        assert_eq!(def.compute_batch(&snapshots).unwrap(), vec![1.0, -1.0]);
    }
}
