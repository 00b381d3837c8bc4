//! Application configuration from CLI flags and environment.

use clap::Parser;

use factcalc_core::ComputeOptions;

/// FactCalc-rs — Parallel and distributed factorial calculator.
#[derive(Parser, Debug)]
#[command(name = "factcalc", version, about)]
pub struct AppConfig {
    /// Number to calculate the factorial of.
    #[arg(short, long, env = "FACTCALC_N", allow_negative_numbers = true)]
    pub number: Option<i64>,

    /// Number of threads per node (0 = all available cores).
    #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
    pub threads: i64,

    /// Number of cooperating nodes (1 = purely local).
    #[arg(short = 'w', long, default_value = "1", allow_negative_numbers = true)]
    pub nodes: i64,

    /// Print the generated factorial to the screen.
    #[arg(short, long)]
    pub print: bool,

    /// Start in interactive mode. Default if no number is given.
    #[arg(short, long)]
    pub interactive: bool,

    /// Quiet mode (only output the number).
    #[arg(short, long)]
    pub quiet: bool,

    /// Output file path.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Range length below which a task computes sequentially.
    #[arg(long, default_value = "16")]
    pub leaf_threshold: i64,

    /// Minimum range length worth distributing across nodes (0 = auto).
    #[arg(long, default_value = "0")]
    pub distribute_threshold: i64,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Computation options for these flags. Non-positive budgets are coerced
    /// rather than rejected: a thread count below 1 means "use every
    /// available core", a node count below 1 means "stay local".
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn compute_options(&self) -> ComputeOptions {
        ComputeOptions {
            thread_budget: self.threads.max(0) as usize,
            node_budget: self.nodes.max(1) as usize,
            leaf_threshold: self.leaf_threshold,
            distribute_threshold: self.distribute_threshold,
        }
        .normalize()
    }
}
