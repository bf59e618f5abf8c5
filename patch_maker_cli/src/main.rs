//! `patch-maker` entry point: load settings, calculate, print the result.

use std::io::Write as _;
use std::process::ExitCode;

use clap::Parser;

use patch_maker_cli::cli::CommandLine;
use patch_maker_cli::{logging, run::run, settings::load_settings};

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    let cli = CommandLine::parse();
    logging::set_up(cli.verbose)?;
    let settings = load_settings(cli.config_path.as_deref(), &cli.overrides)?;
    let outcome = run(&cli, &settings)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", outcome.rendered)?;
    stdout.flush()?;

    if settings.exit_code && outcome.changed {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
