mod cli;
mod run;

use std::fs::File;

use clap::Parser;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode, WriteLogger};

use crate::cli::Cli;
use crate::run::{CliError, run};

fn init_logging(cli: &Cli) -> Result<(), CliError> {
    let level = cli.level_filter();
    match &cli.log {
        Some(path) => {
            let log_file = File::create(path).map_err(|source| CliError::LogFile {
                path: path.clone(),
                source,
            })?;
            WriteLogger::init(level, Config::default(), log_file)?;
        }
        None => {
            TermLogger::init(
                level,
                Config::default(),
                TerminalMode::Stderr,
                ColorChoice::Auto,
            )?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    match run(&cli) {
        Ok(report) => println!("{}", report.render()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
