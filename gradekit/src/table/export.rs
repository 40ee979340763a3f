//! Delimited-text export.
//!
//! Every field is quoted, quotes are doubled, line breaks inside a cell are
//! dropped and two-character whitespace runs collapse to one space. The
//! output opens cleanly in common spreadsheet tools.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use log::{debug, warn};
use regex::Regex;
use thiserror::Error;

use super::state::Table;

/// Content label of exported files.
pub const CSV_CONTENT_TYPE: &str = "text/csv;charset=utf-8";

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\n|\r").expect("Invalid line break pattern"));

// Exactly two characters; longer runs are consumed two at a time.
static WHITESPACE_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s\s").expect("Invalid whitespace pattern"));

/// Cell text as it is written to the file.
///
/// Line breaks are dropped and whitespace pairs collapse to one space.
pub fn clean_cell(text: &str) -> String {
    let text = LINE_BREAK.replace_all(text, "");
    WHITESPACE_PAIR.replace_all(&text, " ").into_owned()
}

/// Write cleaned records, every field quoted, one `\n`-terminated line each.
/// The final terminator is dropped.
fn write_records<'a, R>(records: impl IntoIterator<Item = R>) -> Result<String, DownloadError>
where
    R: IntoIterator<Item = &'a str>,
{
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(Vec::new());

    for record in records {
        writer.write_record(record.into_iter().map(clean_cell))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    let mut text = String::from_utf8_lossy(&bytes).into_owned();
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// Encode one cell as a quoted field.
///
/// ```
/// use gradekit::table::encode_field;
///
/// let field = encode_field("He said \"hi\"\nthere").unwrap();
/// assert_eq!(field, "\"He said \"\"hi\"\"there\"");
/// ```
pub fn encode_field(text: &str) -> Result<String, DownloadError> {
    write_records([[text]])
}

/// Encode a row of cells, comma separated.
pub fn encode_row<'a>(cells: impl IntoIterator<Item = &'a str>) -> Result<String, DownloadError> {
    write_records([cells])
}

/// Encode the header row and every body row, hidden rows included.
///
/// Rows are joined with `\n` and there is no trailing newline.
pub fn encode_table(table: &Table) -> Result<String, DownloadError> {
    let header: Vec<&str> = table.columns().iter().map(|c| c.label.as_str()).collect();
    let body = table
        .rows()
        .iter()
        .map(|row| row.cells.iter().map(String::as_str).collect::<Vec<_>>());

    write_records(std::iter::once(header).chain(body))
}

/// A file offered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl Download {
    pub fn csv(filename: impl Into<String>, text: String) -> Self {
        Self {
            filename: filename.into(),
            content_type: CSV_CONTENT_TYPE,
            bytes: text.into_bytes(),
        }
    }

    /// Body as text. Exports are always UTF-8.
    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.bytes).unwrap_or_default()
    }
}

/// Errors a download sink can report.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The environment cannot deliver downloads.
    #[error("downloads are not supported here")]
    Unsupported,

    /// The file name would escape the target directory.
    #[error("invalid download file name '{0}'")]
    InvalidFilename(String),

    /// The table could not be encoded.
    #[error("failed to encode table: {0}")]
    Encode(#[from] csv::Error),

    /// Writing the file failed.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where downloads are delivered.
pub trait DownloadSink {
    /// Deliver a download to the user.
    fn offer(&mut self, download: Download) -> Result<(), DownloadError>;
}

/// Sink for environments without download support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDownload;

impl DownloadSink for NoDownload {
    fn offer(&mut self, _download: Download) -> Result<(), DownloadError> {
        Err(DownloadError::Unsupported)
    }
}

/// Sink that keeps downloads in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub downloads: Vec<Download>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Download> {
        self.downloads.last()
    }
}

impl DownloadSink for MemorySink {
    fn offer(&mut self, download: Download) -> Result<(), DownloadError> {
        self.downloads.push(download);
        Ok(())
    }
}

/// Sink that writes downloads into a directory.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, oldest first.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl DownloadSink for FileSink {
    fn offer(&mut self, download: Download) -> Result<(), DownloadError> {
        let name = Path::new(&download.filename);
        if download.filename.is_empty() || name.file_name() != Some(name.as_os_str()) {
            return Err(DownloadError::InvalidFilename(download.filename));
        }

        let path = self.dir.join(name);
        fs::write(&path, &download.bytes).map_err(|source| DownloadError::Io {
            path: path.clone(),
            source,
        })?;
        debug!("Wrote {} bytes to {}", download.bytes.len(), path.display());
        self.written.push(path);
        Ok(())
    }
}

/// Export a table and offer it to `sink` as `filename`.
///
/// Export never fails from the caller's point of view: a sink that cannot
/// deliver is logged and otherwise ignored, and the user can retry.
pub fn export_to_delimited_text(table: &Table, filename: &str, sink: &mut dyn DownloadSink) {
    let text = match encode_table(table) {
        Ok(text) => text,
        Err(e) => {
            warn!("Export of table {} could not be encoded: {}", table.id(), e);
            return;
        }
    };
    let download = Download::csv(filename, text);
    debug!(
        "Exporting table {} ({} rows) as {}",
        table.id(),
        table.row_count(),
        filename
    );
    if let Err(e) = sink.offer(download) {
        warn!("Export of table {} not delivered: {}", table.id(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quotes_are_doubled() {
        assert_eq!(encode_field(r#"a "b" c"#).unwrap(), r#""a ""b"" c""#);
    }

    #[test]
    fn test_line_breaks_removed() {
        assert_eq!(encode_field("a\r\nb\nc\rd").unwrap(), "\"abcd\"");
    }

    #[test]
    fn test_whitespace_pairs_collapse_two_at_a_time() {
        assert_eq!(encode_field("a  b").unwrap(), "\"a b\"");
        assert_eq!(encode_field("a   b").unwrap(), "\"a  b\"");
        assert_eq!(encode_field("a    b").unwrap(), "\"a  b\"");
        assert_eq!(encode_field("a\t b").unwrap(), "\"a b\"");
        assert_eq!(encode_field("a b").unwrap(), "\"a b\"");
    }

    #[test]
    fn test_line_break_removed_before_pairs() {
        // " \n " becomes "  " and then a single space.
        assert_eq!(encode_field("x \n y").unwrap(), "\"x y\"");
    }

    #[test]
    fn test_empty_cell_is_quoted() {
        assert_eq!(encode_field("").unwrap(), "\"\"");
        assert_eq!(encode_row(["", "1"]).unwrap(), "\"\",\"1\"");
    }

    #[test]
    fn test_separators_stay_inside_quotes() {
        assert_eq!(encode_row(["a,b", "c;d"]).unwrap(), "\"a,b\",\"c;d\"");
    }

    #[test]
    fn test_clean_cell() {
        assert_eq!(clean_cell("line\r\nbreak"), "linebreak");
        assert_eq!(clean_cell("a  b"), "a b");
    }
}
