use std::fs;
use std::path::{Path, PathBuf};

use gradekit::table::{
    Download, DownloadError, DownloadSink, FileSink, SortDirection, Table, encode_table,
};
use log::{debug, info};
use thiserror::Error;

use crate::cli::Cli;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse table {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Column '{0}' not found")]
    UnknownColumn(String),

    #[error("Column '{0}' is not sortable")]
    NotSortable(String),

    #[error("Export failed: {0}")]
    Export(#[from] DownloadError),

    #[error("Failed to create log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// What a run produced.
#[derive(Debug)]
pub struct Report {
    pub table: Table,
    pub written: PathBuf,
}

impl Report {
    /// Visible rows as text, one line per row, header first.
    pub fn render(&self) -> String {
        let header = self
            .table
            .columns()
            .iter()
            .map(|c| match c.direction {
                SortDirection::Ascending => format!("{} ^", c.label),
                SortDirection::Descending => format!("{} v", c.label),
                SortDirection::Unset => c.label.clone(),
            })
            .collect::<Vec<_>>()
            .join(" | ");

        let mut lines = vec![header];
        lines.extend(self.table.visible_rows().map(|row| row.cells.join(" | ")));
        lines.push(format!(
            "{} of {} rows shown, wrote {}",
            self.table.visible_count(),
            self.table.row_count(),
            self.written.display()
        ));
        lines.join("\n")
    }
}

pub fn load_table(path: &Path) -> Result<Table, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let table: Table = serde_json::from_str(&text).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        "Loaded table '{}' with {} rows from {}",
        table.id(),
        table.row_count(),
        path.display()
    );
    Ok(table)
}

/// Resolve a column by label, falling back to a zero-based index.
pub fn resolve_column(table: &Table, column: &str) -> Result<usize, CliError> {
    table
        .column_index(column)
        .or_else(|| {
            column
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|&i| i < table.column_count())
        })
        .ok_or_else(|| CliError::UnknownColumn(column.to_string()))
}

pub fn run(cli: &Cli) -> Result<Report, CliError> {
    let mut table = load_table(&cli.table)?;

    for column in &cli.sort {
        let index = resolve_column(&table, column)?;
        let direction = table
            .sort_by_column(index)
            .ok_or_else(|| CliError::NotSortable(column.clone()))?;
        info!("Sorted by {} ({:?})", column, direction);
    }

    if let Some(term) = &cli.filter {
        let visible = table.filter(term);
        info!("Filter '{}' matched {} rows", term, visible);
    }

    // Sink errors are fatal here.
    let name = cli.file_name(&table);
    let mut sink = FileSink::new(&cli.out);
    sink.offer(Download::csv(name.as_str(), encode_table(&table)?))?;
    let written = sink.dir().join(&name);

    Ok(Report { table, written })
}
