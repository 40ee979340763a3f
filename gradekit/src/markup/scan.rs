//! Build table and form models from document markup.

use gradedom::Element;
use log::trace;

use crate::table::{Column, SortDirection, Table, ValueType};
use crate::utils::number::parse_leading_float;
use crate::validation::{Field, Form};

/// Input types that never carry user data.
const NON_DATA_INPUTS: [&str; 4] = ["submit", "button", "reset", "hidden"];

/// Row holding a table's column headers: the last `tr` of its `thead`, or
/// its first row when there is no `thead`.
fn header_row(table: &Element) -> Option<&Element> {
    match table.walk().find(|el| el.is("thead")) {
        Some(thead) => thead.walk().filter(|el| el.is("tr")).last().or(Some(thead)),
        None => table.walk().find(|el| el.is("tr")),
    }
}

/// Header cells of a table, one per column.
fn header_cells(table: &Element) -> Vec<&Element> {
    header_row(table)
        .map(|row| row.select(|el| el.is("th")))
        .unwrap_or_default()
}

/// The table's `tbody`, if it has one.
fn body(table: &Element) -> Option<&Element> {
    table.walk().find(|el| el.is("tbody"))
}

/// Body rows: `tr` children of the `tbody`.
fn body_rows(table: &Element) -> Vec<&Element> {
    body(table)
        .map(|tbody| tbody.children.iter().filter(|el| el.is("tr")).collect())
        .unwrap_or_default()
}

/// Read a table element into a [`Table`].
///
/// Header cells with a `data-sort` attribute are sortable, and its value
/// (`asc`/`desc`) seeds the direction. `data-type="number"` makes a column
/// numeric. Row keys follow the order of the `tbody` rows, and rows hidden
/// in the markup stay hidden.
pub fn scan_table(el: &Element) -> Table {
    let columns = header_cells(el)
        .into_iter()
        .map(|th| {
            let mut column = Column::new(th.text_content().trim());
            if let Some(sort) = th.get_attr("data-sort") {
                column = column.sortable().direction(SortDirection::from_attr(sort));
            }
            if th.get_attr("data-type") == Some("number") {
                column.value_type = ValueType::Number;
            }
            column
        })
        .collect();

    let trs = body_rows(el);
    let rows = trs
        .iter()
        .map(|tr| {
            tr.children
                .iter()
                .filter(|cell| cell.is("td") || cell.is("th"))
                .map(Element::text_content)
                .collect()
        })
        .collect();

    let mut table = Table::with_rows(el.id.clone(), columns, rows);
    for (key, tr) in trs.iter().enumerate() {
        if tr.hidden {
            table.set_row_hidden(key, true);
        }
    }
    trace!(
        "Scanned table {}: {} columns, {} rows",
        table.id(),
        table.column_count(),
        table.row_count()
    );
    table
}

/// Element ids of a scanned table, used to write model state back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableBinding {
    /// Header cell ids by column position.
    pub header_ids: Vec<String>,
    /// The `tbody` id.
    pub body_id: Option<String>,
    /// Row element ids by row key.
    pub row_ids: Vec<String>,
}

/// Record the element ids of a table's header cells and rows.
///
/// Row keys assigned by [`scan_table`] index into `row_ids`.
pub fn bind_table(el: &Element) -> TableBinding {
    TableBinding {
        header_ids: header_cells(el).iter().map(|th| th.id.clone()).collect(),
        body_id: body(el).map(|tbody| tbody.id.clone()),
        row_ids: body_rows(el).iter().map(|tr| tr.id.clone()).collect(),
    }
}

/// Whether an element is a data-carrying form control.
pub(crate) fn is_field(el: &Element) -> bool {
    if el.is("select") || el.is("textarea") {
        return true;
    }
    el.is("input")
        && !el
            .get_attr("type")
            .is_some_and(|kind| NON_DATA_INPUTS.contains(&kind))
}

/// Read a form element into a [`Form`].
///
/// `input`, `select` and `textarea` controls become fields; `required`,
/// `type="number"`, `min` and `max` attributes become constraints. A
/// `data-confirm` attribute asks before a valid submission goes through.
pub fn scan_form(el: &Element) -> Form {
    let mut form = Form::new(el.id.clone());
    if let Some(message) = el.get_attr("data-confirm") {
        form = form.confirm(message);
    }

    for control in el.walk().filter(|c| is_field(c)) {
        let name = control.get_attr("name").unwrap_or(control.id.as_str());
        let numeric = control.is("input") && control.get_attr("type") == Some("number");

        let mut field = if numeric {
            Field::number(name)
        } else {
            Field::text(name)
        };
        field = field
            .id(control.id.clone())
            .value(control.get_attr("value").unwrap_or_default());

        if control.has_attr("required") {
            field = field.required();
        }
        if numeric {
            if let Some(min) = control.get_attr("min").and_then(parse_leading_float) {
                field = field.min(min);
            }
            if let Some(max) = control.get_attr("max").and_then(parse_leading_float) {
                field = field.max(max);
            }
        }

        form.push_field(field);
    }

    trace!("Scanned form {}: {} fields", form.id(), form.fields().len());
    form
}
