//! Table interaction engine: sorting, live filtering and export.

mod export;
mod item;
mod sort;
mod state;

pub use export::{
    CSV_CONTENT_TYPE, Download, DownloadError, DownloadSink, FileSink, MemorySink, NoDownload,
    clean_cell, encode_field, encode_row, encode_table, export_to_delimited_text,
};
pub use item::{Column, Row, SortDirection, ValueType};
pub use sort::{collate, compare_cells, compare_numbers, numeric_key};
pub use state::Table;
