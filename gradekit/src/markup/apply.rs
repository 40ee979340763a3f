//! Write model state back onto document markup.

use std::collections::HashMap;

use gradedom::Element;
use log::trace;

use crate::table::{SortDirection, Table};
use crate::toast::ToastQueue;
use crate::validation::{Form, ValidationState};

use super::scan::TableBinding;

/// Reconcile a table's header indicators, row order and row visibility.
///
/// Rows the model does not know about stay in the body, after the known rows.
pub fn apply_table(table: &Table, binding: &TableBinding, root: &mut Element) {
    for (index, id) in binding.header_ids.iter().enumerate() {
        let (Some(column), Some(th)) = (table.column(index), root.find_mut(id)) else {
            continue;
        };
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            if let Some(class) = direction.indicator_class() {
                th.remove_class(class);
            }
        }
        if let Some(class) = column.direction.indicator_class() {
            th.add_class(class);
        }
        if column.sortable {
            th.set_attr("data-sort", column.direction.as_attr());
        }
    }

    let Some(tbody) = binding.body_id.as_deref().and_then(|id| root.find_mut(id)) else {
        return;
    };

    let mut known: HashMap<String, Element> = HashMap::new();
    let mut unknown = Vec::new();
    for child in std::mem::take(&mut tbody.children) {
        if binding.row_ids.contains(&child.id) {
            known.insert(child.id.clone(), child);
        } else {
            unknown.push(child);
        }
    }

    let mut ordered = Vec::with_capacity(table.row_count() + unknown.len());
    for row in table.rows() {
        let Some(mut tr) = binding.row_ids.get(row.key).and_then(|id| known.remove(id)) else {
            continue;
        };
        tr.hidden = row.hidden;
        ordered.push(tr);
    }
    ordered.extend(unknown);
    tbody.children = ordered;

    trace!("Applied table {} to markup", table.id());
}

/// Reconcile field indicator classes, values and feedback elements.
///
/// Existing `.invalid-feedback` elements are removed first, then one is
/// inserted directly after each invalid field, so a field never shows more
/// than one message.
pub fn apply_form(form: &Form, root: &mut Element) {
    let Some(form_el) = root.find_mut(form.id()) else {
        return;
    };

    form_el.remove_where(&|el: &Element| el.has_class("invalid-feedback"));

    for field in form.fields() {
        let Some(control) = form_el.find_mut(field.element_id()) else {
            continue;
        };
        for state in [ValidationState::Valid, ValidationState::Invalid] {
            if let Some(class) = state.indicator_class() {
                control.remove_class(class);
            }
        }
        if let Some(class) = field.state().indicator_class() {
            control.add_class(class);
        }
        control.set_attr("value", field.current_value());

        if let Some(message) = field.feedback()
            && let Some((parent, index)) = form_el.parent_of_mut(field.element_id())
        {
            let feedback = Element::div().class("invalid-feedback").text(message);
            parent.children.insert(index + 1, feedback);
        }
    }

    trace!("Applied form {} to markup", form.id());
}

/// Element ids of an inserted search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBoxIds {
    pub input: String,
    pub clear: String,
}

/// Insert a search box directly before a table.
///
/// The input names its table in `data-table` so a later scan binds it
/// wherever the table sits. Returns `None` when the table is missing or is the document root.
pub fn insert_search_box(
    root: &mut Element,
    table_id: &str,
    placeholder: &str,
) -> Option<SearchBoxIds> {
    let input = Element::input("text")
        .class("form-control")
        .class("table-search")
        .attr("placeholder", placeholder)
        .attr("data-table", table_id);
    let clear = Element::new("button")
        .class("btn")
        .class("btn-outline-secondary")
        .attr("type", "button")
        .attr("data-clear-search", "")
        .text("Clear");
    let ids = SearchBoxIds {
        input: input.id.clone(),
        clear: clear.id.clone(),
    };

    let wrapper = Element::div()
        .class("mb-3")
        .child(Element::div().class("input-group").child(input).child(clear));

    let (parent, index) = root.parent_of_mut(table_id)?;
    parent.children.insert(index, wrapper);
    Some(ids)
}

/// Replace the banners shown at the top of the first `.container`.
pub fn apply_toasts(queue: &ToastQueue, root: &mut Element) {
    root.remove_where(&|el: &Element| el.has_attr("data-toast"));

    let container_id = root
        .walk()
        .find(|el| el.has_class("container"))
        .map(|el| el.id.clone());
    let container = match container_id {
        Some(id) => root.find_mut(&id),
        None => Some(root),
    };

    if let Some(container) = container {
        for (index, toast) in queue.iter().enumerate() {
            container.children.insert(index, toast.element());
        }
    }
}
