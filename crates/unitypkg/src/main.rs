use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use unitypkg_archive::Error;

mod cli;

use cli::{Cli, Command};

const LOG_ENV: &str = "UNITYPKG_LOG";

fn init_tracing(quiet: bool, verbose: u8) {
    let level = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("unitypkg={level},unitypkg_archive={level},unitypkg_fs={level}")));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();

    if let Err(e) = installed {
        eprintln!("warning: logging disabled: {e}");
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    let options = cli.options();
    let result = match cli.command {
        Command::Extract(cmd) => cmd.run(&options),
        Command::View(cmd) => cmd.run(&options),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

fn report(err: &anyhow::Error) -> ExitCode {
    if let Some(Error::ArchiveNotFound { path }) = err.downcast_ref::<Error>() {
        eprintln!("error: no package found at '{}'", path.display());
        eprintln!();
        eprintln!("{}", cli::USAGE);
        return ExitCode::from(2);
    }

    eprintln!("error: {err:#}");
    ExitCode::FAILURE
}
