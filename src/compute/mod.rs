//----------------------------------------
// compute mod
//----------------------------------------
pub use crate::config::types::{
    DesignSettings, ExperimentConfig, ExperimentConfigBuilder, MdeMode, MetricKind,
};
pub use crate::data::{MetricSummary, baseline_from_reader, load_baseline_csv};
pub use crate::hypothesis_type::HypothesisType;
pub use crate::normal::std_normal::std_normal_quantile;
pub use crate::output::{
    OutputFormat, format_thousands, render, render_plan, render_plan_table, render_table,
    to_json, write_csv, write_plan_csv,
};
pub use crate::plan::{ExperimentPlan, MetricRequirements, MetricSpec};
pub use crate::sample_size::compute_ss::{
    control_sample_size, mean_control_size, proportion_control_size, variant_sample_size,
    z_sum_squared,
};
pub use crate::sample_size::compute_ss_range::{compute, duration_days, mde_grid};
pub use crate::sample_size::types::ResultRow;
