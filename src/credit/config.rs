//! Credit definition configuration.
//!
//! [`CreditConfig`] holds the tunable parameters shared by all credit
//! definitions. It can be built in code with the `with_*` methods or read from
//! a flat string-keyed [`Properties`] map.

use crate::error::{CreditError, Result};
use std::collections::BTreeMap;

/// Property key for the credit given when a comparison is satisfied.
pub const KEY_SATISFY: &str = "satisfy";
/// Property key for the credit given when a comparison is not satisfied.
pub const KEY_DISATISFY: &str = "disatisfy";
/// Property key for the credit given when neither outcome holds.
pub const KEY_NEITHER: &str = "neither";
/// Property key for the hypervolume reference point.
pub const KEY_REF_POINT: &str = "ref_point";
/// Property key for the ideal point used by R2.
pub const KEY_IDEAL_POINT: &str = "ideal_point";
/// Property key for the number of R2 weight vectors.
pub const KEY_NUM_REFERENCE_VECTORS: &str = "num_reference_vectors";
/// Property key for the binary-indicator scaling factor.
pub const KEY_KAPPA: &str = "kappa";

/// Describes the problem being optimized, as far as credit assignment cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProblemDescriptor {
    /// Number of objectives (all minimized).
    pub num_objectives: usize,
}

impl ProblemDescriptor {
    pub fn new(num_objectives: usize) -> Self {
        Self { num_objectives }
    }
}

/// Flat string-keyed property map.
///
/// Arrays are written as comma- or whitespace-separated numbers, e.g.
/// `"2.0, 2.0, 2.0"`.
///
/// # Examples
///
/// ```
/// use u_hyperheur::credit::Properties;
///
/// let props: Properties = [("kappa", "0.1"), ("ref_point", "1.5, 1.5")]
///     .into_iter()
///     .collect();
/// assert_eq!(props.get_f64("kappa", 0.05).unwrap(), 0.1);
/// assert_eq!(props.get_f64_array("ref_point").unwrap(), Some(vec![1.5, 1.5]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Properties {
    values: BTreeMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Reads a number, falling back to `default` when the key is absent.
    pub fn get_f64(&self, key: &str, default: f64) -> Result<f64> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => parse_f64(key, raw),
        }
    }

    /// Reads a non-negative integer if present.
    pub fn get_usize(&self, key: &str) -> Result<Option<usize>> {
        self.get(key)
            .map(|raw| {
                raw.trim().parse::<usize>().map_err(|e| {
                    CreditError::Configuration(format!("{key}: cannot parse {raw:?} as integer: {e}"))
                })
            })
            .transpose()
    }

    /// Reads a list of numbers if present.
    pub fn get_f64_array(&self, key: &str) -> Result<Option<Vec<f64>>> {
        self.get(key)
            .map(|raw| {
                raw.split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|token| !token.is_empty())
                    .map(|token| parse_f64(key, token))
                    .collect::<Result<Vec<f64>>>()
            })
            .transpose()
    }
}

fn parse_f64(key: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| CreditError::Configuration(format!("{key}: cannot parse {raw:?} as number: {e}")))
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Parameters for building credit definitions.
///
/// # Defaults
///
/// | field | default |
/// |---|---|
/// | `satisfy` | 1.0 |
/// | `disatisfy` | 0.0 |
/// | `neither` | 0.0 |
/// | `ref_point` | 2.0 per objective |
/// | `ideal_point` | 0.0 per objective |
/// | `num_reference_vectors` | 50 (2 objectives), 91 (3 objectives), otherwise required |
/// | `kappa` | 0.05 |
///
/// # Examples
///
/// ```
/// use u_hyperheur::credit::CreditConfig;
///
/// let config = CreditConfig::default()
///     .with_outcomes(1.0, 0.0, 0.5)
///     .with_ref_point(vec![1.1, 1.1])
///     .with_kappa(0.1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreditConfig {
    /// Credit when the comparison is satisfied.
    pub satisfy: f64,

    /// Credit when the comparison fails.
    pub disatisfy: f64,

    /// Credit when neither outcome holds (mutual non-dominance).
    pub neither: f64,

    /// Hypervolume reference point; `None` means 2.0 per objective.
    pub ref_point: Option<Vec<f64>>,

    /// Ideal point for R2; `None` means the origin.
    pub ideal_point: Option<Vec<f64>>,

    /// Number of R2 weight vectors; `None` uses the per-dimension default.
    pub num_reference_vectors: Option<usize>,

    /// Scaling factor for binary indicator credits, > 0.
    pub kappa: f64,
}

impl Default for CreditConfig {
    fn default() -> Self {
        Self {
            satisfy: 1.0,
            disatisfy: 0.0,
            neither: 0.0,
            ref_point: None,
            ideal_point: None,
            num_reference_vectors: None,
            kappa: 0.05,
        }
    }
}

impl CreditConfig {
    /// Reads a configuration from properties; absent keys keep their defaults.
    pub fn from_properties(props: &Properties) -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            satisfy: props.get_f64(KEY_SATISFY, defaults.satisfy)?,
            disatisfy: props.get_f64(KEY_DISATISFY, defaults.disatisfy)?,
            neither: props.get_f64(KEY_NEITHER, defaults.neither)?,
            ref_point: props.get_f64_array(KEY_REF_POINT)?,
            ideal_point: props.get_f64_array(KEY_IDEAL_POINT)?,
            num_reference_vectors: props.get_usize(KEY_NUM_REFERENCE_VECTORS)?,
            kappa: props.get_f64(KEY_KAPPA, defaults.kappa)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the satisfy / disatisfy / neither credits.
    pub fn with_outcomes(mut self, satisfy: f64, disatisfy: f64, neither: f64) -> Self {
        self.satisfy = satisfy;
        self.disatisfy = disatisfy;
        self.neither = neither;
        self
    }

    pub fn with_ref_point(mut self, point: Vec<f64>) -> Self {
        self.ref_point = Some(point);
        self
    }

    pub fn with_ideal_point(mut self, point: Vec<f64>) -> Self {
        self.ideal_point = Some(point);
        self
    }

    pub fn with_num_reference_vectors(mut self, n: usize) -> Self {
        self.num_reference_vectors = Some(n);
        self
    }

    pub fn with_kappa(mut self, kappa: f64) -> Self {
        self.kappa = kappa;
        self
    }

    /// Validates dimension-independent parameters.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            (KEY_SATISFY, self.satisfy),
            (KEY_DISATISFY, self.disatisfy),
            (KEY_NEITHER, self.neither),
        ] {
            if !value.is_finite() {
                return Err(CreditError::Configuration(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if !(self.kappa > 0.0 && self.kappa.is_finite()) {
            return Err(CreditError::Configuration(format!(
                "kappa must be positive, got {}",
                self.kappa
            )));
        }
        if self.num_reference_vectors == Some(0) {
            return Err(CreditError::Configuration(
                "num_reference_vectors must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Reference point resolved for `num_objectives`.
    pub fn resolved_ref_point(&self, num_objectives: usize) -> Result<Vec<f64>> {
        resolve_point(KEY_REF_POINT, &self.ref_point, 2.0, num_objectives)
    }

    /// Ideal point resolved for `num_objectives`.
    pub fn resolved_ideal_point(&self, num_objectives: usize) -> Result<Vec<f64>> {
        resolve_point(KEY_IDEAL_POINT, &self.ideal_point, 0.0, num_objectives)
    }

    /// Number of R2 weight vectors resolved for `num_objectives`.
    pub fn resolved_reference_vectors(&self, num_objectives: usize) -> Result<usize> {
        match (self.num_reference_vectors, num_objectives) {
            (Some(n), _) => Ok(n),
            (None, 2) => Ok(50),
            (None, 3) => Ok(91),
            (None, m) => Err(CreditError::Configuration(format!(
                "{KEY_NUM_REFERENCE_VECTORS} must be set explicitly for {m} objectives"
            ))),
        }
    }
}

fn resolve_point(
    key: &str,
    given: &Option<Vec<f64>>,
    fill: f64,
    num_objectives: usize,
) -> Result<Vec<f64>> {
    match given {
        None => Ok(vec![fill; num_objectives]),
        Some(point) if point.len() == num_objectives => Ok(point.clone()),
        Some(point) => Err(CreditError::Configuration(format!(
            "{key} has {} coordinates but the problem has {num_objectives} objectives",
            point.len()
        ))),
    }
}
