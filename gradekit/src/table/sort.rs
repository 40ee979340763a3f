//! Cell comparison and row ordering.

use std::cmp::Ordering;

use feruca::Collator;

use crate::utils::number::parse_leading_float;

use super::item::{Row, SortDirection, ValueType};

/// Locale-style text ordering.
///
/// Strings are compared with the Unicode Collation Algorithm over the CLDR
/// root order: accents and case only break ties, so `"Émile"` sorts before
/// `"Zoe"` and `"apple"` before `"Banana"`. Lower case sorts before upper
/// case, and remaining ties fall back to code point order.
pub fn collate(a: &str, b: &str) -> Ordering {
    Collator::default().collate(a, b)
}

/// Numeric sort key of a cell; NaN when the cell does not start with a number.
pub fn numeric_key(cell: &str) -> f64 {
    parse_leading_float(cell.trim()).unwrap_or(f64::NAN)
}

/// Total order over numeric keys.
///
/// NaN keys are equal to each other and greater than every number, so in an
/// ascending sort malformed cells gather at the end in their prior order.
pub fn compare_numbers(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Compare two cells under a column's value type, ascending.
pub fn compare_cells(value_type: ValueType, a: &str, b: &str) -> Ordering {
    match value_type {
        ValueType::Number => compare_numbers(numeric_key(a), numeric_key(b)),
        ValueType::Text => collate(a.trim(), b.trim()),
    }
}

/// Stable-sort `rows` by one column.
///
/// Descending order reverses the comparator, not the result, so rows with
/// equal keys keep their relative order in both directions.
pub(crate) fn sort_rows(
    rows: &mut Vec<Row>,
    column: usize,
    value_type: ValueType,
    direction: SortDirection,
) {
    let directed = |ord: Ordering| match direction {
        SortDirection::Descending => ord.reverse(),
        _ => ord,
    };

    match value_type {
        ValueType::Number => {
            // Parse each cell once.
            let mut keyed: Vec<(f64, Row)> = rows
                .drain(..)
                .map(|row| (numeric_key(row.cell(column)), row))
                .collect();
            keyed.sort_by(|a, b| directed(compare_numbers(a.0, b.0)));
            rows.extend(keyed.into_iter().map(|(_, row)| row));
        }
        ValueType::Text => {
            let mut collator = Collator::default();
            rows.sort_by(|a, b| {
                directed(collator.collate(a.cell(column).trim(), b.cell(column).trim()))
            });
        }
    }
}
