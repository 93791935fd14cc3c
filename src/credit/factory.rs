//! Credit definition factory.

use super::config::{CreditConfig, ProblemDescriptor, Properties};
use super::definition::CreditDefinition;
use super::snapshot::ReferenceSet;
use crate::error::{CreditError, Result};
use crate::indicator::{AdditiveEpsilon, Hypervolume, Indicator, R2Indicator};
use std::fmt;
use std::str::FromStr;

/// Registered credit definition names.
///
/// The set is closed: parsing any other name fails with
/// [`CreditError::UnknownCreditDefinition`].
///
/// ```
/// use u_hyperheur::credit::CreditKind;
///
/// let kind: CreditKind = "SIHVPF".parse().unwrap();
/// assert_eq!(kind, CreditKind::SIHVPF);
/// assert!("XYZ".parse::<CreditKind>().is_err());
/// ```
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CreditKind {
    OPDe,
    OPDo,
    OPIAE,
    OPIHV,
    OPIR2,
    SIDe,
    SIDoPF,
    SIDoA,
    SIAEPF,
    SIHVPF,
    SIR2PF,
    SIAEA,
    SIHVA,
    SIR2A,
    CSDe,
    CSDoPF,
    CSDoA,
    CSHVPF,
    CSHVA,
    CSR2PF,
    CSR2A,
}

impl CreditKind {
    /// Every registered kind, in table order.
    pub const ALL: [CreditKind; 21] = [
        CreditKind::OPDe,
        CreditKind::OPDo,
        CreditKind::OPIAE,
        CreditKind::OPIHV,
        CreditKind::OPIR2,
        CreditKind::SIDe,
        CreditKind::SIDoPF,
        CreditKind::SIDoA,
        CreditKind::SIAEPF,
        CreditKind::SIHVPF,
        CreditKind::SIR2PF,
        CreditKind::SIAEA,
        CreditKind::SIHVA,
        CreditKind::SIR2A,
        CreditKind::CSDe,
        CreditKind::CSDoPF,
        CreditKind::CSDoA,
        CreditKind::CSHVPF,
        CreditKind::CSHVA,
        CreditKind::CSR2PF,
        CreditKind::CSR2A,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CreditKind::OPDe => "OPDe",
            CreditKind::OPDo => "OPDo",
            CreditKind::OPIAE => "OPIAE",
            CreditKind::OPIHV => "OPIHV",
            CreditKind::OPIR2 => "OPIR2",
            CreditKind::SIDe => "SIDe",
            CreditKind::SIDoPF => "SIDoPF",
            CreditKind::SIDoA => "SIDoA",
            CreditKind::SIAEPF => "SIAEPF",
            CreditKind::SIHVPF => "SIHVPF",
            CreditKind::SIR2PF => "SIR2PF",
            CreditKind::SIAEA => "SIAEA",
            CreditKind::SIHVA => "SIHVA",
            CreditKind::SIR2A => "SIR2A",
            CreditKind::CSDe => "CSDe",
            CreditKind::CSDoPF => "CSDoPF",
            CreditKind::CSDoA => "CSDoA",
            CreditKind::CSHVPF => "CSHVPF",
            CreditKind::CSHVA => "CSHVA",
            CreditKind::CSR2PF => "CSR2PF",
            CreditKind::CSR2A => "CSR2A",
        }
    }
}

impl fmt::Display for CreditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CreditKind {
    type Err = CreditError;

    fn from_str(name: &str) -> Result<Self> {
        CreditKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| CreditError::UnknownCreditDefinition(name.to_string()))
    }
}

#[derive(Debug, Clone, Copy)]
enum IndicatorChoice {
    AdditiveEpsilon,
    Hypervolume,
    R2,
}

/// Builds credit definitions from a name, configuration, and problem.
///
/// Stateless: there is nothing to share between calls, so the factory is a
/// unit struct with associated functions.
///
/// # Examples
///
/// ```
/// use u_hyperheur::credit::{CreditConfig, CreditFactory, ProblemDescriptor};
///
/// let problem = ProblemDescriptor::new(2);
/// let def = CreditFactory::create("SIHVPF", &CreditConfig::default(), &problem).unwrap();
/// assert_eq!(def.name(), "SIHVPF");
///
/// assert!(CreditFactory::create("XYZ", &CreditConfig::default(), &problem).is_err());
/// ```
pub struct CreditFactory;

impl CreditFactory {
    /// Builds the definition registered under `name`.
    ///
    /// Indicator-backed definitions construct their indicator here, with the
    /// resolved reference point; R2 also takes the ideal point and weight
    /// vectors.
    ///
    /// # Errors
    ///
    /// - [`CreditError::UnknownCreditDefinition`] for an unregistered name
    /// - [`CreditError::Configuration`] for invalid parameters, or an R2-backed
    ///   definition on more than three objectives without
    ///   `num_reference_vectors`
    pub fn create(
        name: &str,
        config: &CreditConfig,
        problem: &ProblemDescriptor,
    ) -> Result<CreditDefinition> {
        let kind: CreditKind = name.parse()?;
        Self::create_kind(kind, config, problem)
    }

    /// Same as [`create`](Self::create), reading the configuration from properties.
    pub fn create_from_properties(
        name: &str,
        props: &Properties,
        problem: &ProblemDescriptor,
    ) -> Result<CreditDefinition> {
        let kind: CreditKind = name.parse()?;
        let config = CreditConfig::from_properties(props)?;
        Self::create_kind(kind, &config, problem)
    }

    /// Builds the definition for an already-parsed kind.
    pub fn create_kind(
        kind: CreditKind,
        config: &CreditConfig,
        problem: &ProblemDescriptor,
    ) -> Result<CreditDefinition> {
        config.validate()?;
        if problem.num_objectives == 0 {
            return Err(CreditError::Configuration(
                "problem must have at least one objective".into(),
            ));
        }

        use IndicatorChoice::{AdditiveEpsilon as AE, Hypervolume as HV, R2};
        use ReferenceSet::{Archive, ParetoFront};

        let indicator = |choice| build_indicator(choice, config, problem.num_objectives);
        let parent_indicator = |choice| -> Result<CreditDefinition> {
            Ok(CreditDefinition::ParentIndicator {
                indicator: indicator(choice)?,
                kappa: config.kappa,
            })
        };
        let set_improvement = |set, choice| -> Result<CreditDefinition> {
            Ok(CreditDefinition::SetImprovement {
                set,
                indicator: indicator(choice)?,
            })
        };
        let contribution = |set, choice| -> Result<CreditDefinition> {
            Ok(CreditDefinition::IndicatorContribution {
                set,
                indicator: indicator(choice)?,
            })
        };

        let definition = match kind {
            CreditKind::OPDe => CreditDefinition::ParentDecomposition,
            CreditKind::OPDo => CreditDefinition::ParentDomination {
                satisfy: config.satisfy,
                neither: config.neither,
                disatisfy: config.disatisfy,
            },
            CreditKind::OPIAE => parent_indicator(AE)?,
            CreditKind::OPIHV => parent_indicator(HV)?,
            CreditKind::OPIR2 => parent_indicator(R2)?,
            CreditKind::SIDe => CreditDefinition::NeighborhoodImprovement,
            CreditKind::SIDoPF => CreditDefinition::SetEntry {
                set: ParetoFront,
                satisfy: config.satisfy,
                disatisfy: config.disatisfy,
            },
            CreditKind::SIDoA => CreditDefinition::SetEntry {
                set: Archive,
                satisfy: config.satisfy,
                disatisfy: config.disatisfy,
            },
            CreditKind::SIAEPF => set_improvement(ParetoFront, AE)?,
            CreditKind::SIHVPF => set_improvement(ParetoFront, HV)?,
            CreditKind::SIR2PF => set_improvement(ParetoFront, R2)?,
            CreditKind::SIAEA => set_improvement(Archive, AE)?,
            CreditKind::SIHVA => set_improvement(Archive, HV)?,
            CreditKind::SIR2A => set_improvement(Archive, R2)?,
            CreditKind::CSDe => CreditDefinition::NeighborhoodContribution {
                satisfy: config.satisfy,
                disatisfy: config.disatisfy,
            },
            CreditKind::CSDoPF => CreditDefinition::SetContribution {
                set: ParetoFront,
                satisfy: config.satisfy,
                disatisfy: config.disatisfy,
            },
            CreditKind::CSDoA => CreditDefinition::SetContribution {
                set: Archive,
                satisfy: config.satisfy,
                disatisfy: config.disatisfy,
            },
            CreditKind::CSHVPF => contribution(ParetoFront, HV)?,
            CreditKind::CSHVA => contribution(Archive, HV)?,
            CreditKind::CSR2PF => contribution(ParetoFront, R2)?,
            CreditKind::CSR2A => contribution(Archive, R2)?,
        };

        tracing::debug!(
            credit = %kind,
            num_objectives = problem.num_objectives,
            "built credit definition"
        );
        Ok(definition)
    }
}

fn build_indicator(
    choice: IndicatorChoice,
    config: &CreditConfig,
    num_objectives: usize,
) -> Result<Indicator> {
    let ref_point = config.resolved_ref_point(num_objectives)?;
    let indicator = match choice {
        IndicatorChoice::Hypervolume => Hypervolume::new(ref_point)?.into(),
        IndicatorChoice::AdditiveEpsilon => AdditiveEpsilon::new(ref_point)?.into(),
        IndicatorChoice::R2 => R2Indicator::new(
            config.resolved_ideal_point(num_objectives)?,
            ref_point,
            config.resolved_reference_vectors(num_objectives)?,
        )?
        .into(),
    };
    Ok(indicator)
}
