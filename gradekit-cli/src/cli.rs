//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use gradekit::table::Table;
use simplelog::LevelFilter;

#[derive(Debug, Parser)]
#[command(
    name = "gradekit-cli",
    version,
    about = "Sort, filter and export a score table",
    long_about = "Load a score table from JSON, apply header sorts and a search term,\n\
                  print the visible rows and export the whole table as CSV."
)]
pub struct Cli {
    /// Table file in JSON.
    #[arg(value_name = "TABLE")]
    pub table: PathBuf,

    /// Column to sort by, as a label or zero-based index. Each repeat
    /// toggles the direction like another header click.
    #[arg(long = "sort", value_name = "COLUMN")]
    pub sort: Vec<String>,

    /// Only show rows containing this text (case-insensitive).
    #[arg(long = "filter", value_name = "TERM")]
    pub filter: Option<String>,

    /// Directory the CSV file is written to.
    #[arg(long = "out", value_name = "DIR", default_value = ".")]
    pub out: PathBuf,

    /// CSV file name (default: <table id>.csv).
    #[arg(long = "name", value_name = "FILE")]
    pub name: Option<String>,

    /// Write logs to a file instead of the terminal.
    #[arg(long = "log", value_name = "PATH")]
    pub log: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn level_filter(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Export file name for `table`.
    pub fn file_name(&self, table: &Table) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None if table.id().is_empty() => "export.csv".to_string(),
            None => format!("{}.csv", table.id()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_repeated_sort() {
        let cli = Cli::try_parse_from([
            "gradekit-cli",
            "scores.json",
            "--sort",
            "Score",
            "--sort",
            "Score",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.sort, vec!["Score", "Score"]);
        assert_eq!(cli.level_filter(), LevelFilter::Debug);
        assert_eq!(cli.out, PathBuf::from("."));
    }

    #[test]
    fn test_table_is_required() {
        assert!(Cli::try_parse_from(["gradekit-cli"]).is_err());
    }

    #[test]
    fn test_file_name() {
        let cli = Cli::try_parse_from(["gradekit-cli", "t.json"]).unwrap();
        assert_eq!(cli.file_name(&Table::new("grades", Vec::new())), "grades.csv");
        assert_eq!(cli.file_name(&Table::new("", Vec::new())), "export.csv");

        let named = Cli::try_parse_from(["gradekit-cli", "t.json", "--name", "out.csv"]).unwrap();
        assert_eq!(named.file_name(&Table::new("grades", Vec::new())), "out.csv");
    }
}
