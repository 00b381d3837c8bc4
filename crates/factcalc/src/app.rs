//! Application entry point and dispatch.

use std::io::{BufRead, Write};
use std::time::Instant;

use anyhow::{Context, Result};

use factcalc_cli::output::write_to_file;
use factcalc_cli::presenter::CLIResultPresenter;
use factcalc_orchestration::interfaces::ResultPresenter;
use factcalc_orchestration::orchestrator::compute;

use crate::config::AppConfig;
use crate::errors;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        factcalc_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    // Interactive mode when requested or when no number was given.
    let (number, print) = if config.interactive || config.number.is_none() {
        let stdin = std::io::stdin();
        interactive(&mut stdin.lock())?
    } else {
        (config.number.unwrap_or_default(), config.print)
    };

    let opts = config.compute_options();
    let presenter = CLIResultPresenter::new(print, config.quiet);

    let started = Instant::now();
    match compute(0, number, &opts) {
        Ok(value) => {
            presenter.present_result(number, &value, started.elapsed());
            if let Some(ref path) = config.output {
                write_to_file(path, &value)
                    .with_context(|| format!("failed to write result to {path}"))?;
            }
            Ok(())
        }
        Err(error) => {
            presenter.present_error(&error.to_string());
            std::process::exit(errors::exit_code(&error));
        }
    }
}

/// Prompt for the number and whether to print the result.
fn interactive(input: &mut dyn BufRead) -> Result<(i64, bool)> {
    print!("Enter number to complete factorial: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let number: i64 = line
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid number: {:?}", line.trim()))?;

    print!("Would you like to print the result? ");
    std::io::stdout().flush()?;
    line.clear();
    input.read_line(&mut line)?;
    let answer = line.trim();
    if answer.is_empty() {
        anyhow::bail!("no answer given");
    }
    let print = answer.starts_with('y') || answer.starts_with('Y');

    Ok((number, print))
}
