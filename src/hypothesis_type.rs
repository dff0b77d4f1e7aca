use serde::{Deserialize, Serialize};

/// Alternative hypothesis of the test. `NotEqual` is the two-sided test;
/// the directional alternatives spend all of alpha in one tail.
#[derive(Default, Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HypothesisType {
    #[default]
    NotEqual,
    TrtGreater,
    TrtLess,
}

impl HypothesisType {
    pub fn is_two_sided(self) -> bool {
        matches!(self, HypothesisType::NotEqual)
    }

    /// Cumulative probability whose standard normal quantile is the
    /// critical value for significance level `alpha`
    pub fn critical_probability(self, alpha: f64) -> f64 {
        if self.is_two_sided() {
            1. - alpha / 2.
        } else {
            1. - alpha
        }
    }
}

impl std::str::FromStr for HypothesisType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "two-sided" | "not-equal" => Ok(HypothesisType::NotEqual),
            "greater" | "trt-greater" => Ok(HypothesisType::TrtGreater),
            "less" | "trt-less" => Ok(HypothesisType::TrtLess),
            other => Err(format!("unknown hypothesis type: {}", other)),
        }
    }
}
