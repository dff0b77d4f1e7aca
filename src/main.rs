use std::io::Write;
use std::path::PathBuf;

use abcompute::compute::{
    DesignSettings, ExperimentConfig, ExperimentPlan, HypothesisType, MdeMode, MetricKind,
    OutputFormat, compute, load_baseline_csv, render, render_plan,
};
use anyhow::{Context, bail};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Sample size calculator for A/B experiments
#[derive(Parser, Debug)]
#[command(name = "abcompute")]
#[command(author, version, about = "Sample size and duration planning for A/B experiments")]
struct Cli {
    /// Multi-metric plan (TOML); experiment flags below are ignored when given
    #[arg(long, conflicts_with = "data")]
    plan: Option<PathBuf>,

    /// CSV whose first column supplies the baseline (mean), plus the variance
    /// for mean metrics; proportions derive their variance from the baseline
    #[arg(long)]
    data: Option<PathBuf>,

    /// Metric kind: proportion or mean
    #[arg(long, default_value = "proportion")]
    metric: MetricKind,

    /// Control group expected value; overrides the value derived from --data
    #[arg(long)]
    baseline: Option<f64>,

    /// Metric variance; overrides the value derived from --data
    #[arg(long)]
    variance: Option<f64>,

    /// First MDE of the sweep
    #[arg(long)]
    mde_start: Option<f64>,

    /// Last MDE of the sweep (inclusive)
    #[arg(long)]
    mde_end: Option<f64>,

    /// MDE increment
    #[arg(long)]
    mde_step: Option<f64>,

    /// Interpret MDE as relative to the baseline or as an absolute difference
    #[arg(long)]
    mde_mode: Option<MdeMode>,

    /// Ratio of each treatment group's size to the control group's
    #[arg(short, long)]
    k: Option<f64>,

    /// Number of treatment groups, excluding control
    #[arg(long)]
    variants: Option<u32>,

    /// Eligible users per day
    #[arg(long)]
    daily_traffic: Option<u64>,

    /// Share of daily traffic allocated to the experiment, in (0, 1]
    #[arg(long)]
    traffic_fraction: Option<f64>,

    /// Significance level
    #[arg(long)]
    alpha: Option<f64>,

    /// Statistical power (1 - beta)
    #[arg(long)]
    power: Option<f64>,

    /// Alternative hypothesis: two-sided, greater or less
    #[arg(long)]
    hypothesis: Option<HypothesisType>,

    /// Output format: table, csv or json
    #[arg(long, default_value = "table")]
    format: OutputFormat,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn experiment_config(&self) -> anyhow::Result<ExperimentConfig> {
        let summary = match &self.data {
            Some(path) => Some(
                load_baseline_csv(path)
                    .with_context(|| format!("failed to derive baseline from {}", path.display()))?,
            ),
            None => None,
        };

        let Some(baseline) = self.baseline.or(summary.map(|s| s.mean)) else {
            bail!("either --baseline or --data must be given");
        };
        // A sample variance of 0/1 outcomes is not the Bernoulli variance
        let data_variance = match self.metric {
            MetricKind::Mean => summary.map(|s| s.variance),
            MetricKind::Proportion => None,
        };
        let maybe_variance = self.variance.or(data_variance);

        let mut design = DesignSettings::default();
        if let Some(mde_start) = self.mde_start {
            design.mde_start = mde_start;
        }
        if let Some(mde_end) = self.mde_end {
            design.mde_end = mde_end;
        }
        if let Some(mde_step) = self.mde_step {
            design.mde_step = mde_step;
        }
        if let Some(mde_mode) = self.mde_mode {
            design.mde_mode = mde_mode;
        }
        if let Some(k) = self.k {
            design.k = k;
        }
        if let Some(variants) = self.variants {
            design.num_variants = variants;
        }
        if let Some(daily_traffic) = self.daily_traffic {
            design.daily_traffic = daily_traffic;
        }
        if let Some(traffic_fraction) = self.traffic_fraction {
            design.traffic_fraction = traffic_fraction;
        }
        if let Some(alpha) = self.alpha {
            design.alpha = alpha;
        }
        if let Some(power) = self.power {
            design.power = power;
        }
        if let Some(hypothesis) = self.hypothesis {
            design.hypothesis = hypothesis;
        }

        let config = ExperimentConfig::builder(self.metric, baseline)
            .maybe_variance(maybe_variance)
            .design(design)
            .build()?;
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    // Logs go to stderr so stdout stays clean for CSV/JSON
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let rendered = match &cli.plan {
        Some(path) => {
            let plan = ExperimentPlan::load(path)
                .with_context(|| format!("failed to load plan {}", path.display()))?;
            let results = plan.evaluate()?;
            render_plan(cli.format, &results)?
        }
        None => {
            let config = cli.experiment_config()?;
            let rows = compute(&config)?;
            tracing::debug!(n_rows = rows.len(), "sweep complete");
            render(cli.format, &rows)?
        }
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote results");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
