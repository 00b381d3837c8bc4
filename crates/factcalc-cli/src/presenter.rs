//! CLI result presenter.

use std::time::Duration;

use num_bigint::BigInt;

use factcalc_orchestration::interfaces::ResultPresenter;

use crate::output::{format_duration, format_number, format_result};

/// Presenter writing results to stdout: a confirmation line, plus the full
/// decimal expansion on request.
pub struct CLIResultPresenter {
    print: bool,
    quiet: bool,
}

impl CLIResultPresenter {
    #[must_use]
    pub fn new(print: bool, quiet: bool) -> Self {
        Self { print, quiet }
    }
}

impl ResultPresenter for CLIResultPresenter {
    fn present_result(&self, n: i64, result: &BigInt, duration: Duration) {
        if self.quiet {
            println!("{result}");
            return;
        }

        println!("Successfully generated {}!", format_number(n));
        println!("Duration: {}", format_duration(duration));

        if self.print {
            println!("{}", format_result(result, true));
        }
    }

    fn present_error(&self, error: &str) {
        eprintln!("Error: {error}");
    }
}
