//! Multi-metric experiment plans.
//!
//! A plan evaluates several named metrics against one set of design
//! settings, the way an experiment is usually sized: one primary metric and
//! a few guardrails, all sharing traffic and test parameters. Plans are
//! usually loaded from a TOML file:
//!
//! ```toml
//! [design]
//! mde_start = 0.01
//! mde_end = 0.05
//! mde_step = 0.01
//! daily_traffic = 20000
//! traffic_fraction = 0.5
//!
//! [[metrics]]
//! name = "conversion"
//! metric_kind = "proportion"
//! baseline = 0.1
//!
//! [[metrics]]
//! name = "revenue"
//! metric_kind = "mean"
//! baseline = 25.0
//! variance = 400.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::error::{ConfigErr, ConfigFileErr};
use crate::config::types::{DesignSettings, ExperimentConfig, MetricKind};
use crate::error::AbcomputeErr;
use crate::sample_size::compute_ss_range::compute;
use crate::sample_size::types::ResultRow;

/// One metric of a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSpec {
    pub name: String,
    #[serde(default)]
    pub metric_kind: MetricKind,
    pub baseline: f64,
    /// Required for means; derived from the baseline for proportions
    #[serde(default)]
    pub variance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExperimentPlan {
    #[serde(default)]
    pub design: DesignSettings,
    #[serde(default)]
    pub metrics: Vec<MetricSpec>,
}

/// Sweep results for one metric of a plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRequirements {
    pub name: String,
    pub rows: Vec<ResultRow>,
}

impl DesignSettings {
    /// Resolve a metric against these settings into a validated config
    pub fn config_for(&self, metric: &MetricSpec) -> Result<ExperimentConfig, AbcomputeErr> {
        ExperimentConfig::builder(metric.metric_kind, metric.baseline)
            .maybe_variance(metric.variance)
            .design(*self)
            .build()
    }
}

impl ExperimentPlan {
    /// Load a plan from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AbcomputeErr> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigFileErr::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let plan = Self::from_toml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            n_metrics = plan.metrics.len(),
            "loaded experiment plan"
        );
        Ok(plan)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, AbcomputeErr> {
        Ok(toml::from_str(s).map_err(ConfigFileErr::Parse)?)
    }

    /// Evaluate every metric, in input order. Fails on the first metric
    /// whose config is invalid.
    pub fn evaluate(&self) -> Result<Vec<MetricRequirements>, AbcomputeErr> {
        if self.metrics.is_empty() {
            return Err(ConfigErr::NoMetrics.into());
        }
        self.metrics
            .iter()
            .map(|metric| -> Result<MetricRequirements, AbcomputeErr> {
                let config = self.design.config_for(metric).inspect_err(|e| {
                    tracing::warn!(metric = %metric.name, error = %e, "invalid metric config");
                })?;
                Ok(MetricRequirements {
                    name: metric.name.clone(),
                    rows: compute(&config)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::MdeMode;
    use crate::hypothesis_type::HypothesisType;

    const PLAN: &str = r#"
        [design]
        mde_start = 0.05
        mde_end = 0.05
        mde_step = 0.01
        daily_traffic = 10000
        traffic_fraction = 0.5

        [[metrics]]
        name = "conversion"
        baseline = 0.1
        variance = 0.09

        [[metrics]]
        name = "revenue"
        metric_kind = "mean"
        baseline = 10.0
        variance = 4.0
    "#;

    #[test]
    fn parse_plan() {
        let plan = ExperimentPlan::from_toml_str(PLAN).expect("failed to parse plan");
        assert_eq!(plan.metrics.len(), 2);
        assert_eq!(plan.metrics[0].metric_kind, MetricKind::Proportion);
        assert_eq!(plan.metrics[1].metric_kind, MetricKind::Mean);
        assert_eq!(plan.design.k, 1.0);
        assert_eq!(plan.design.mde_mode, MdeMode::Relative);
        assert_eq!(plan.design.hypothesis, HypothesisType::NotEqual);
    }

    #[test]
    fn evaluate_plan_in_order() {
        let plan = ExperimentPlan::from_toml_str(PLAN).unwrap();
        let results = plan.evaluate().expect("failed to evaluate plan");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "conversion");
        assert_eq!(results[0].rows[0].control_size, 57760);
        assert_eq!(results[1].name, "revenue");
        assert_eq!(results[1].rows[0].control_size, 252);
    }

    #[test]
    fn empty_plan_error() {
        let err = ExperimentPlan::default().evaluate().unwrap_err();
        assert_eq!(
            format!("{}", err),
            "invalid experiment config: plan must contain at least one metric"
        );
    }

    #[test]
    fn mean_metric_without_variance_fails() {
        let plan = ExperimentPlan::from_toml_str(
            r#"
            [[metrics]]
            name = "revenue"
            metric_kind = "mean"
            baseline = 10.0
            "#,
        )
        .unwrap();
        let err = plan.evaluate().unwrap_err();
        assert!(matches!(
            err,
            AbcomputeErr::InvalidConfig(ConfigErr::MissingVariance)
        ));
    }

    #[test]
    fn malformed_toml_error() {
        let err = ExperimentPlan::from_toml_str("[[metrics]]\nname = ").unwrap_err();
        assert!(matches!(err, AbcomputeErr::ConfigFile(ConfigFileErr::Parse(_))));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("plan.toml");
        std::fs::write(&path, PLAN).unwrap();
        let plan = ExperimentPlan::load(&path).expect("failed to load plan");
        assert_eq!(plan.metrics[1].name, "revenue");
    }

    #[test]
    fn missing_file_error() {
        let err = ExperimentPlan::load("/nonexistent/plan.toml").unwrap_err();
        assert!(matches!(
            err,
            AbcomputeErr::ConfigFile(ConfigFileErr::Io { .. })
        ));
    }
}
