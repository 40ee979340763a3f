//! Table model: sorting and live filtering.

use log::{debug, trace};
use serde::Deserialize;

use super::item::{Column, Row, SortDirection};
use super::sort::sort_rows;

/// A sortable, filterable table.
///
/// `Table` holds the columns and rows of one rendered table:
/// - Header activation sorts by a column (stable, toggling direction)
/// - Search terms hide rows that do not contain the term
/// - Export reads every row regardless of visibility
///
/// Only one column carries a sort direction at a time.
///
/// # Example
///
/// ```
/// use gradekit::table::{Column, SortDirection, Table};
///
/// let mut table = Table::with_rows(
///     "scores",
///     vec![Column::new("Name").sortable(), Column::new("Score").sortable().numeric()],
///     vec![vec!["Bob".into(), "71".into()], vec!["Alice".into(), "92".into()]],
/// );
///
/// assert_eq!(table.sort_by_column(1), Some(SortDirection::Ascending));
/// assert_eq!(table.rows()[0].cell(0), "Bob");
///
/// table.filter("ali");
/// assert_eq!(table.visible_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "TableData")]
pub struct Table {
    /// Element id of the table.
    id: String,
    /// Column definitions.
    columns: Vec<Column>,
    /// Rows in display order.
    rows: Vec<Row>,
}

/// Serialized table layout: rows as plain cell arrays.
#[derive(Deserialize)]
struct TableData {
    #[serde(default)]
    id: String,
    columns: Vec<Column>,
    #[serde(default)]
    rows: Vec<Vec<String>>,
}

impl From<TableData> for Table {
    fn from(data: TableData) -> Self {
        Table::with_rows(data.id, data.columns, data.rows)
    }
}

impl Table {
    /// Create an empty table.
    pub fn new(id: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            id: id.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Create a table with initial rows. Row keys follow the given order.
    pub fn with_rows(id: impl Into<String>, columns: Vec<Column>, rows: Vec<Vec<String>>) -> Self {
        let mut table = Self::new(id, columns);
        for cells in rows {
            table.push_row(cells);
        }
        table
    }

    /// Append a row. Its key is its insertion position.
    ///
    /// Rows are never removed, so the count is the next unused key.
    pub fn push_row(&mut self, cells: Vec<String>) {
        let key = self.rows.len();
        self.rows.push(Row::new(key, cells));
    }

    /// Hide or show the row with `key`. Returns whether a row matched.
    pub(crate) fn set_row_hidden(&mut self, key: usize, hidden: bool) -> bool {
        match self.rows.iter_mut().find(|r| r.key == key) {
            Some(row) => {
                row.hidden = hidden;
                true
            }
            None => false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    // -------------------------------------------------------------------------
    // Access
    // -------------------------------------------------------------------------

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Index of the first column whose label matches, ignoring case.
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.label.eq_ignore_ascii_case(label.trim()))
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Rows in display order, hidden ones included.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|r| r.is_visible())
    }

    pub fn visible_count(&self) -> usize {
        self.visible_rows().count()
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// The active sort column and its direction.
    pub fn active_sort(&self) -> Option<(usize, SortDirection)> {
        self.columns
            .iter()
            .enumerate()
            .find(|(_, c)| c.direction.is_active())
            .map(|(i, c)| (i, c.direction))
    }

    /// Sort by a column, as if its header was activated.
    ///
    /// The column's direction toggles (ascending becomes descending, anything
    /// else becomes ascending), rows are stably reordered in place, and every
    /// other column is reset to unset. Returns the new direction, or `None`
    /// without touching anything when the column is missing or not sortable.
    pub fn sort_by_column(&mut self, column_index: usize) -> Option<SortDirection> {
        let column = self.columns.get(column_index)?;
        if !column.sortable {
            debug!(
                "Ignoring sort on non-sortable column {} of table {}",
                column_index, self.id
            );
            return None;
        }

        let direction = column.direction.toggled();
        let value_type = column.value_type;

        sort_rows(&mut self.rows, column_index, value_type, direction);

        for (i, col) in self.columns.iter_mut().enumerate() {
            col.direction = if i == column_index {
                direction
            } else {
                SortDirection::Unset
            };
        }

        debug!(
            "Sorted table {} by column {} ({:?}, {:?})",
            self.id, column_index, value_type, direction
        );
        Some(direction)
    }

    /// Reset every column to unset without reordering rows.
    pub fn clear_sort(&mut self) {
        for col in &mut self.columns {
            col.direction = SortDirection::Unset;
        }
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Show only rows whose text contains `term`, ignoring case.
    ///
    /// Visibility is the only thing that changes: row order and sort state
    /// stay as they were, so an empty term restores the previous view
    /// exactly. Returns the number of visible rows.
    pub fn filter(&mut self, term: &str) -> usize {
        let needle = term.to_lowercase();
        let mut visible = 0;

        for row in &mut self.rows {
            let shown = row.searchable_text().contains(&needle);
            trace!("Row {} {}", row.key, if shown { "shown" } else { "hidden" });
            row.hidden = !shown;
            if shown {
                visible += 1;
            }
        }

        debug!(
            "Filtered table {} with {:?}: {}/{} visible",
            self.id,
            term,
            visible,
            self.rows.len()
        );
        visible
    }
}
