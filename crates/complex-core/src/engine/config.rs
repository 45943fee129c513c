use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_CLASH_RADIUS: f64 = 5.0;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

/// What the assembler does with a fragment that cannot be loaded or is not a two-chain model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentErrorPolicy {
    /// Stop the assembly and return the error.
    #[default]
    Abort,
    /// Log a warning and treat the fragment as a failed attempt.
    Skip,
}

#[derive(Debug, Error)]
#[error("Invalid fragment error policy '{0}' (expected 'abort' or 'skip')")]
pub struct ParseFragmentErrorPolicyError(String);

impl FromStr for FragmentErrorPolicy {
    type Err = ParseFragmentErrorPolicyError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(FragmentErrorPolicy::Abort),
            "skip" => Ok(FragmentErrorPolicy::Skip),
            _ => Err(ParseFragmentErrorPolicyError(s.to_string())),
        }
    }
}

impl fmt::Display for FragmentErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FragmentErrorPolicy::Abort => write!(f, "abort"),
            FragmentErrorPolicy::Skip => write!(f, "skip"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdConfig {
    /// Maximum RMSD (Angstroms) for two chains to count as the same chain.
    pub rmsd: f64,
    /// Maximum number of key-atom contacts tolerated against one reference chain.
    pub clashes: usize,
    /// Contact distance (Angstroms) used when counting clashes.
    pub clash_radius: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchConfig {
    /// Hard cap on the number of fragment attempts, `None` for no cap.
    pub max_iterations: Option<usize>,
    pub on_fragment_error: FragmentErrorPolicy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyConfig {
    /// Number of chains the assembled complex should contain.
    pub stoichiometry: usize,
    pub thresholds: ThresholdConfig,
    pub search: SearchConfig,
}

#[derive(Default)]
pub struct AssemblyConfigBuilder {
    stoichiometry: Option<usize>,
    rmsd_threshold: Option<f64>,
    clash_threshold: Option<usize>,
    clash_radius: Option<f64>,
    max_iterations: Option<usize>,
    on_fragment_error: Option<FragmentErrorPolicy>,
}

impl AssemblyConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stoichiometry(mut self, chains: usize) -> Self {
        self.stoichiometry = Some(chains);
        self
    }
    pub fn rmsd_threshold(mut self, threshold: f64) -> Self {
        self.rmsd_threshold = Some(threshold);
        self
    }
    pub fn clash_threshold(mut self, threshold: usize) -> Self {
        self.clash_threshold = Some(threshold);
        self
    }
    pub fn clash_radius(mut self, radius: f64) -> Self {
        self.clash_radius = Some(radius);
        self
    }
    pub fn max_iterations(mut self, iterations: Option<usize>) -> Self {
        self.max_iterations = iterations;
        self
    }
    pub fn on_fragment_error(mut self, policy: FragmentErrorPolicy) -> Self {
        self.on_fragment_error = Some(policy);
        self
    }

    pub fn build(self) -> Result<AssemblyConfig, ConfigError> {
        let stoichiometry = self
            .stoichiometry
            .ok_or(ConfigError::MissingParameter("stoichiometry"))?;
        if stoichiometry == 0 {
            return Err(ConfigError::InvalidValue {
                parameter: "stoichiometry",
                reason: "must be at least 1".to_string(),
            });
        }

        let rmsd = self
            .rmsd_threshold
            .ok_or(ConfigError::MissingParameter("rmsd_threshold"))?;
        if !rmsd.is_finite() || rmsd < 0.0 {
            return Err(ConfigError::InvalidValue {
                parameter: "rmsd_threshold",
                reason: format!("must be a non-negative number, got {rmsd}"),
            });
        }

        let clash_radius = self.clash_radius.unwrap_or(DEFAULT_CLASH_RADIUS);
        if !clash_radius.is_finite() || clash_radius <= 0.0 {
            return Err(ConfigError::InvalidValue {
                parameter: "clash_radius",
                reason: format!("must be a positive number, got {clash_radius}"),
            });
        }

        if self.max_iterations == Some(0) {
            return Err(ConfigError::InvalidValue {
                parameter: "max_iterations",
                reason: "must be at least 1 when set".to_string(),
            });
        }

        Ok(AssemblyConfig {
            stoichiometry,
            thresholds: ThresholdConfig {
                rmsd,
                clashes: self
                    .clash_threshold
                    .ok_or(ConfigError::MissingParameter("clash_threshold"))?,
                clash_radius,
            },
            search: SearchConfig {
                max_iterations: self.max_iterations,
                on_fragment_error: self.on_fragment_error.unwrap_or_default(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_builder() -> AssemblyConfigBuilder {
        AssemblyConfigBuilder::new()
            .stoichiometry(4)
            .rmsd_threshold(2.0)
            .clash_threshold(30)
    }

    #[test]
    fn build_fills_optional_parameters_with_defaults() {
        let config = complete_builder().build().unwrap();
        assert_eq!(config.stoichiometry, 4);
        assert_eq!(config.thresholds.rmsd, 2.0);
        assert_eq!(config.thresholds.clashes, 30);
        assert_eq!(config.thresholds.clash_radius, DEFAULT_CLASH_RADIUS);
        assert_eq!(config.search.max_iterations, None);
        assert_eq!(config.search.on_fragment_error, FragmentErrorPolicy::Abort);
    }

    #[test]
    fn build_keeps_explicit_optional_parameters() {
        let config = complete_builder()
            .clash_radius(3.5)
            .max_iterations(Some(100))
            .on_fragment_error(FragmentErrorPolicy::Skip)
            .build()
            .unwrap();
        assert_eq!(config.thresholds.clash_radius, 3.5);
        assert_eq!(config.search.max_iterations, Some(100));
        assert_eq!(config.search.on_fragment_error, FragmentErrorPolicy::Skip);
    }

    #[test]
    fn build_reports_missing_parameters() {
        let err = AssemblyConfigBuilder::new()
            .rmsd_threshold(1.0)
            .clash_threshold(1)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter("stoichiometry"));

        let err = AssemblyConfigBuilder::new()
            .stoichiometry(2)
            .clash_threshold(1)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter("rmsd_threshold"));

        let err = AssemblyConfigBuilder::new()
            .stoichiometry(2)
            .rmsd_threshold(1.0)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter("clash_threshold"));
    }

    #[test]
    fn build_rejects_invalid_values() {
        assert!(matches!(
            complete_builder().stoichiometry(0).build(),
            Err(ConfigError::InvalidValue {
                parameter: "stoichiometry",
                ..
            })
        ));
        assert!(matches!(
            complete_builder().rmsd_threshold(-0.1).build(),
            Err(ConfigError::InvalidValue {
                parameter: "rmsd_threshold",
                ..
            })
        ));
        assert!(matches!(
            complete_builder().rmsd_threshold(f64::NAN).build(),
            Err(ConfigError::InvalidValue {
                parameter: "rmsd_threshold",
                ..
            })
        ));
        assert!(matches!(
            complete_builder().clash_radius(0.0).build(),
            Err(ConfigError::InvalidValue {
                parameter: "clash_radius",
                ..
            })
        ));
        assert!(matches!(
            complete_builder().max_iterations(Some(0)).build(),
            Err(ConfigError::InvalidValue {
                parameter: "max_iterations",
                ..
            })
        ));
    }

    #[test]
    fn zero_rmsd_threshold_is_allowed() {
        assert!(complete_builder().rmsd_threshold(0.0).build().is_ok());
    }

    #[test]
    fn fragment_error_policy_round_trips_through_strings() {
        assert_eq!(
            "Skip".parse::<FragmentErrorPolicy>().unwrap(),
            FragmentErrorPolicy::Skip
        );
        assert_eq!(
            "abort".parse::<FragmentErrorPolicy>().unwrap(),
            FragmentErrorPolicy::Abort
        );
        assert!("ignore".parse::<FragmentErrorPolicy>().is_err());
        assert_eq!(FragmentErrorPolicy::Skip.to_string(), "skip");
    }
}
