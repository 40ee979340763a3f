//! Column and Row types.

use serde::Deserialize;

/// How a column's cells are compared when sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    Text,
    Number,
}

/// Sort state of a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Unset,
    Ascending,
    Descending,
}

impl SortDirection {
    /// Direction after a header activation: ascending flips to descending,
    /// anything else becomes ascending.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending | SortDirection::Unset => SortDirection::Ascending,
        }
    }

    pub fn is_active(self) -> bool {
        self != SortDirection::Unset
    }

    /// Markup value used in the `data-sort` attribute.
    pub fn as_attr(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
            SortDirection::Unset => "",
        }
    }

    pub fn from_attr(value: &str) -> Self {
        match value {
            "asc" => SortDirection::Ascending,
            "desc" => SortDirection::Descending,
            _ => SortDirection::Unset,
        }
    }

    /// Header class carrying the sort indicator.
    pub fn indicator_class(self) -> Option<&'static str> {
        match self {
            SortDirection::Ascending => Some("sort-asc"),
            SortDirection::Descending => Some("sort-desc"),
            SortDirection::Unset => None,
        }
    }
}

/// Column configuration.
///
/// # Examples
///
/// ```
/// use gradekit::table::Column;
///
/// let columns = vec![
///     Column::new("Student"),
///     Column::new("Name").sortable(),
///     Column::new("Score").sortable().numeric(),
/// ];
/// assert!(columns[2].sortable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Column {
    /// Header text, exported as the first row
    pub label: String,
    /// Whether header activation sorts by this column
    #[serde(default)]
    pub sortable: bool,
    /// Comparison semantics
    #[serde(default, rename = "type")]
    pub value_type: ValueType,
    /// Current sort state
    #[serde(default)]
    pub direction: SortDirection,
}

impl Column {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            sortable: false,
            value_type: ValueType::Text,
            direction: SortDirection::Unset,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Compare cells as numbers.
    pub fn numeric(mut self) -> Self {
        self.value_type = ValueType::Number;
        self
    }

    pub fn direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }
}

/// One record of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Position the row had when the table was built. Stable across sorts.
    pub key: usize,
    /// Cell texts, aligned to columns.
    pub cells: Vec<String>,
    /// Set by filtering; hidden rows keep their place.
    pub hidden: bool,
}

impl Row {
    pub fn new(key: usize, cells: Vec<String>) -> Self {
        Self {
            key,
            cells,
            hidden: false,
        }
    }

    /// Cell text, or `""` when the row is shorter than the column list.
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    /// Lower-cased concatenation of every cell. Computed on each call.
    pub fn searchable_text(&self) -> String {
        self.cells.concat().to_lowercase()
    }

    pub fn is_visible(&self) -> bool {
        !self.hidden
    }
}
