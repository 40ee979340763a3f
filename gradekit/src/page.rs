//! A scanned document and its event dispatch.

use std::time::Instant;

use gradedom::{Element, Event, EventControl, Key, Modifiers};
use log::debug;
use thiserror::Error;

use crate::config::ToolkitConfig;
use crate::keybinds::{Keybinds, Shortcut};
use crate::markup::{
    SearchBoxIds, TableBinding, apply_form, apply_table, apply_toasts, bind_table,
    insert_search_box, scan_form, scan_table,
};
use crate::table::{DownloadSink, SortDirection, Table, export_to_delimited_text};
use crate::toast::{Toast, ToastLevel, ToastQueue};
use crate::validation::{Form, ValidationResult, Validator};

/// Errors from looking things up on a page.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("Table '{0}' not found")]
    UnknownTable(String),

    #[error("Form '{0}' not found")]
    UnknownForm(String),

    #[error("Search box '{0}' not found")]
    UnknownSearchBox(String),
}

/// What an event did.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatched {
    /// A header click sorted a table.
    Sorted {
        table: String,
        column: usize,
        direction: SortDirection,
    },
    /// A search box changed a table's visible rows.
    Filtered { table: String, visible: usize },
    /// A form submission was validated.
    Submitted { form: String, valid: bool },
    /// A valid submission was declined at its confirmation prompt.
    SubmitDeclined { form: String },
    /// A dialog was shown or hidden and its form was reset.
    ValidationReset { form: String },
    /// Focus moved to a search box.
    SearchFocused { input: String },
    /// The open dialog should be hidden by the presentation layer.
    DialogCloseRequested { dialog: String },
    /// Nothing on the page handles the event.
    Ignored,
}

impl Dispatched {
    /// How the originating event should continue.
    ///
    /// Failed submissions are cancelled outright; a handled shortcut only
    /// suppresses the browser's own binding.
    pub fn control(&self) -> EventControl {
        match self {
            Dispatched::Submitted { valid: false, .. } | Dispatched::SubmitDeclined { .. } => {
                EventControl::CANCEL
            }
            Dispatched::SearchFocused { .. } | Dispatched::DialogCloseRequested { .. } => {
                EventControl {
                    prevent_default: true,
                    stop_propagation: false,
                }
            }
            _ => EventControl::PROCEED,
        }
    }
}

/// Answers the confirmation prompt of a `data-confirm` form.
pub trait ConfirmPrompt {
    /// `true` lets the submission go through.
    fn confirm(&mut self, message: &str) -> bool;
}

/// Accepts every prompt. Used by [`Page::dispatch`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl ConfirmPrompt for AcceptAll {
    fn confirm(&mut self, _message: &str) -> bool {
        true
    }
}

impl<F> ConfirmPrompt for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Debug, Clone)]
struct BoundTable {
    table: Table,
    binding: TableBinding,
}

#[derive(Debug, Clone)]
struct SearchBox {
    input_id: String,
    clear_id: Option<String>,
    table_id: String,
    value: String,
}

#[derive(Debug, Clone)]
struct Dialog {
    id: String,
    form_id: Option<String>,
}

/// Tables, forms, search boxes and dialogs of one document.
///
/// Built by scanning an element tree; events are dispatched against the
/// models and [`render`](Page::render) writes the result back.
///
/// # Example
///
/// ```
/// use gradekit::prelude::*;
///
/// let mut root = Element::div().child(
///     Element::table()
///         .id("scores")
///         .child(Element::thead().child(
///             Element::tr().child(Element::th("Score").id("h-score").attr("data-sort", "")
///                 .attr("data-type", "number")),
///         ))
///         .child(Element::tbody()
///             .child(Element::tr().child(Element::td("71")))
///             .child(Element::tr().child(Element::td("9")))),
/// );
///
/// let mut page = Page::scan(&root, ToolkitConfig::default());
/// let done = page.dispatch(&Event::Click { target: "h-score".into() });
/// assert!(matches!(done, Dispatched::Sorted { direction: SortDirection::Ascending, .. }));
///
/// page.render(&mut root);
/// assert!(root.find("h-score").unwrap().has_class("sort-asc"));
/// ```
#[derive(Debug, Clone)]
pub struct Page {
    validator: Validator,
    keybinds: Keybinds,
    tables: Vec<BoundTable>,
    forms: Vec<Form>,
    search_boxes: Vec<SearchBox>,
    dialogs: Vec<Dialog>,
    open_dialog: Option<String>,
    focused: Option<String>,
    toasts: ToastQueue,
}

impl Page {
    /// Scan a document.
    pub fn scan(root: &Element, config: ToolkitConfig) -> Self {
        let mut page = Self {
            validator: Validator::new(config),
            keybinds: Keybinds::default(),
            tables: Vec::new(),
            forms: Vec::new(),
            search_boxes: Vec::new(),
            dialogs: Vec::new(),
            open_dialog: None,
            focused: None,
            toasts: ToastQueue::new(),
        };
        page.rescan(root);
        page
    }

    /// Replace the key bindings.
    pub fn with_keybinds(mut self, keybinds: Keybinds) -> Self {
        self.keybinds = keybinds;
        self
    }

    /// Discover tables, forms, search boxes and dialogs again.
    ///
    /// Used after new markup is injected. Model state is rebuilt from the
    /// markup, so call [`render`](Page::render) first to keep it. Search
    /// boxes holding text filter their tables again.
    pub fn rescan(&mut self, root: &Element) {
        self.tables = root
            .select(|el| el.is("table"))
            .into_iter()
            .map(|el| BoundTable {
                table: scan_table(el),
                binding: bind_table(el),
            })
            .collect();

        self.forms = root
            .select(|el| el.is("form"))
            .into_iter()
            .map(scan_form)
            .collect();

        self.search_boxes = root
            .select(|el| el.is("input") && el.has_class("table-search"))
            .into_iter()
            .filter_map(|input| scan_search_box(root, input))
            .collect();

        let active: Vec<(String, String)> = self
            .search_boxes
            .iter()
            .filter(|b| !b.value.is_empty())
            .map(|b| (b.table_id.clone(), b.value.clone()))
            .collect();
        for (table, term) in active {
            if let Ok(visible) = self.filter(&table, &term) {
                debug!("Search '{}' keeps {} rows of {} visible", term, visible, table);
            }
        }

        self.dialogs = root
            .select(|el| el.has_class("modal"))
            .into_iter()
            .map(|el| Dialog {
                id: el.id.clone(),
                form_id: el.walk().find(|c| c.is("form")).map(|f| f.id.clone()),
            })
            .collect();

        if let Some(open) = &self.open_dialog
            && !self.dialogs.iter().any(|d| &d.id == open)
        {
            self.open_dialog = None;
        }

        debug!(
            "Scanned page: {} tables, {} forms, {} search boxes, {} dialogs",
            self.tables.len(),
            self.forms.len(),
            self.search_boxes.len(),
            self.dialogs.len()
        );
    }

    pub fn config(&self) -> &ToolkitConfig {
        self.validator.config()
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter().map(|t| &t.table)
    }

    pub fn table(&self, id: &str) -> Result<&Table, PageError> {
        self.tables
            .iter()
            .find(|t| t.table.id() == id)
            .map(|t| &t.table)
            .ok_or_else(|| PageError::UnknownTable(id.to_string()))
    }

    pub fn table_mut(&mut self, id: &str) -> Result<&mut Table, PageError> {
        self.tables
            .iter_mut()
            .find(|t| t.table.id() == id)
            .map(|t| &mut t.table)
            .ok_or_else(|| PageError::UnknownTable(id.to_string()))
    }

    pub fn forms(&self) -> &[Form] {
        &self.forms
    }

    pub fn form(&self, id: &str) -> Result<&Form, PageError> {
        self.forms
            .iter()
            .find(|f| f.id() == id)
            .ok_or_else(|| PageError::UnknownForm(id.to_string()))
    }

    pub fn form_mut(&mut self, id: &str) -> Result<&mut Form, PageError> {
        self.forms
            .iter_mut()
            .find(|f| f.id() == id)
            .ok_or_else(|| PageError::UnknownForm(id.to_string()))
    }

    /// Table a search box filters.
    pub fn search_target(&self, input_id: &str) -> Result<&str, PageError> {
        self.search_box(input_id).map(|b| b.table_id.as_str())
    }

    /// Currently open dialog, if any.
    pub fn open_dialog(&self) -> Option<&str> {
        self.open_dialog.as_deref()
    }

    /// Element that last received focus from a shortcut.
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    fn search_box(&self, input_id: &str) -> Result<&SearchBox, PageError> {
        self.search_boxes
            .iter()
            .find(|b| b.input_id == input_id)
            .ok_or_else(|| PageError::UnknownSearchBox(input_id.to_string()))
    }

    /// Table and column owning a header cell.
    fn header(&self, id: &str) -> Option<(String, usize)> {
        self.tables.iter().find_map(|t| {
            t.binding
                .header_ids
                .iter()
                .position(|h| h == id)
                .map(|column| (t.table.id().to_string(), column))
        })
    }

    // -------------------------------------------------------------------------
    // Table operations
    // -------------------------------------------------------------------------

    /// Sort a table by column; `Ok(None)` when the column is not sortable.
    pub fn sort(
        &mut self,
        table_id: &str,
        column: usize,
    ) -> Result<Option<SortDirection>, PageError> {
        Ok(self.table_mut(table_id)?.sort_by_column(column))
    }

    /// Filter a table; returns the visible row count.
    pub fn filter(&mut self, table_id: &str, term: &str) -> Result<usize, PageError> {
        Ok(self.table_mut(table_id)?.filter(term))
    }

    /// Export a table, hidden rows included, to `sink`.
    pub fn export_table(
        &self,
        table_id: &str,
        filename: &str,
        sink: &mut dyn DownloadSink,
    ) -> Result<(), PageError> {
        export_to_delimited_text(self.table(table_id)?, filename, sink);
        Ok(())
    }

    /// Insert a search box before a table and bind it to that table only.
    ///
    /// Uses the configured placeholder when none is given.
    pub fn attach_search_box(
        &mut self,
        root: &mut Element,
        table_id: &str,
        placeholder: Option<&str>,
    ) -> Result<SearchBoxIds, PageError> {
        self.table(table_id)?;
        let placeholder = placeholder.unwrap_or(self.config().search_placeholder.as_str());
        let ids = insert_search_box(root, table_id, placeholder)
            .ok_or_else(|| PageError::UnknownTable(table_id.to_string()))?;

        self.search_boxes.push(SearchBox {
            input_id: ids.input.clone(),
            clear_id: Some(ids.clear.clone()),
            table_id: table_id.to_string(),
            value: String::new(),
        });
        debug!("Attached search box {} to table {}", ids.input, table_id);
        Ok(ids)
    }

    /// Set a search box's text and filter its table.
    pub fn search(&mut self, input_id: &str, value: &str) -> Result<usize, PageError> {
        let table_id = self.search_target(input_id)?.to_string();
        if let Some(search) = self.search_boxes.iter_mut().find(|b| b.input_id == input_id) {
            search.value = value.to_string();
        }
        self.filter(&table_id, value)
    }

    /// Empty a search box and show every row of its table again.
    pub fn clear_search(&mut self, input_id: &str) -> Result<usize, PageError> {
        self.search(input_id, "")
    }

    /// Move focus to the first search box.
    pub fn focus_search(&mut self) -> Option<String> {
        let input = self.search_boxes.first()?.input_id.clone();
        self.focused = Some(input.clone());
        Some(input)
    }

    // -------------------------------------------------------------------------
    // Form operations
    // -------------------------------------------------------------------------

    /// Validate a form; `false` means its submission must be suppressed.
    pub fn validate_form(&mut self, form_id: &str) -> Result<bool, PageError> {
        Ok(self.check_form(form_id)?.is_valid())
    }

    /// Prompt a valid submission of `form_id` should show, if the form asks.
    pub fn confirm_message(&self, form_id: &str) -> Result<Option<String>, PageError> {
        let form = self.form(form_id)?;
        Ok(form.confirm_text().map(|text| {
            if text.is_empty() {
                self.config().confirm_message.clone()
            } else {
                text.to_string()
            }
        }))
    }

    /// Validate a form and report every failing field.
    pub fn check_form(&mut self, form_id: &str) -> Result<ValidationResult, PageError> {
        let form = self
            .forms
            .iter_mut()
            .find(|f| f.id() == form_id)
            .ok_or_else(|| PageError::UnknownForm(form_id.to_string()))?;
        Ok(self.validator.check_form(form))
    }

    /// Clear validation state of a form without re-checking it.
    pub fn reset_validation(&mut self, form_id: &str) -> Result<(), PageError> {
        let form = self
            .forms
            .iter_mut()
            .find(|f| f.id() == form_id)
            .ok_or_else(|| PageError::UnknownForm(form_id.to_string()))?;
        self.validator.reset_validation(form);
        Ok(())
    }

    /// Set a field's value by element id. Returns whether a field matched.
    pub fn set_field_value(&mut self, element_id: &str, value: &str) -> bool {
        self.forms
            .iter_mut()
            .find_map(|f| f.by_element_id_mut(element_id))
            .map(|field| field.set_value(value))
            .is_some()
    }

    // -------------------------------------------------------------------------
    // Banners
    // -------------------------------------------------------------------------

    /// Show a banner for the configured duration.
    pub fn notify(&mut self, message: impl Into<String>, level: ToastLevel, now: Instant) {
        let toast = Toast {
            message: message.into(),
            level,
            duration: self.config().toast_duration,
        };
        self.toasts.push(toast, now);
    }

    /// Drop banners whose time is up.
    pub fn expire_toasts(&mut self, now: Instant) -> Vec<Toast> {
        self.toasts.expire(now)
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Run the operation an event maps to.
    ///
    /// Confirmation prompts are accepted; use
    /// [`dispatch_with`](Page::dispatch_with) to answer them.
    pub fn dispatch(&mut self, event: &Event) -> Dispatched {
        self.dispatch_with(event, &mut AcceptAll)
    }

    /// Run the operation an event maps to, asking `prompt` before a valid
    /// submission of a `data-confirm` form.
    pub fn dispatch_with(&mut self, event: &Event, prompt: &mut dyn ConfirmPrompt) -> Dispatched {
        let result = match event {
            Event::Click { target } => self.on_click(target),
            Event::Input { target, value } => self.on_input(target, value),
            Event::Submit { target } => self.on_submit(target, prompt),
            Event::DialogShown { target } => self.on_dialog_shown(target),
            Event::DialogHidden { target } => self.on_dialog_hidden(target),
            Event::Key { key, modifiers } => self.on_key(*key, *modifiers),
        };
        if result == Dispatched::Ignored {
            debug!("Ignored event {:?}", event);
        }
        result
    }

    fn on_click(&mut self, target: &str) -> Dispatched {
        if let Some((table, column)) = self.header(target) {
            return match self.sort(&table, column) {
                Ok(Some(direction)) => Dispatched::Sorted {
                    table,
                    column,
                    direction,
                },
                _ => Dispatched::Ignored,
            };
        }

        let clear = self
            .search_boxes
            .iter()
            .find(|b| b.clear_id.as_deref() == Some(target))
            .map(|b| b.input_id.clone());
        if let Some(input) = clear {
            return self.on_input(&input, "");
        }

        Dispatched::Ignored
    }

    fn on_input(&mut self, target: &str, value: &str) -> Dispatched {
        if let Ok(table) = self.search_target(target).map(str::to_string) {
            return match self.search(target, value) {
                Ok(visible) => Dispatched::Filtered { table, visible },
                Err(_) => Dispatched::Ignored,
            };
        }

        if self.set_field_value(target, value) {
            debug!("Field {} changed", target);
        }
        Dispatched::Ignored
    }

    fn on_submit(&mut self, target: &str, prompt: &mut dyn ConfirmPrompt) -> Dispatched {
        let Ok(valid) = self.validate_form(target) else {
            return Dispatched::Ignored;
        };

        if valid
            && let Ok(Some(message)) = self.confirm_message(target)
            && !prompt.confirm(&message)
        {
            debug!("Submission of {} declined", target);
            return Dispatched::SubmitDeclined {
                form: target.to_string(),
            };
        }

        Dispatched::Submitted {
            form: target.to_string(),
            valid,
        }
    }

    fn dialog_form(&self, dialog_id: &str) -> Option<String> {
        self.dialogs
            .iter()
            .find(|d| d.id == dialog_id)
            .and_then(|d| d.form_id.clone())
    }

    fn on_dialog_shown(&mut self, target: &str) -> Dispatched {
        if !self.dialogs.iter().any(|d| d.id == target) {
            return Dispatched::Ignored;
        }
        self.open_dialog = Some(target.to_string());

        let Some(form) = self.dialog_form(target) else {
            return Dispatched::Ignored;
        };
        match self.reset_validation(&form) {
            Ok(()) => Dispatched::ValidationReset { form },
            Err(_) => Dispatched::Ignored,
        }
    }

    fn on_dialog_hidden(&mut self, target: &str) -> Dispatched {
        if !self.dialogs.iter().any(|d| d.id == target) {
            return Dispatched::Ignored;
        }
        if self.open_dialog.as_deref() == Some(target) {
            self.open_dialog = None;
        }

        let Some(form) = self.dialog_form(target) else {
            return Dispatched::Ignored;
        };
        if let Ok(f) = self.form_mut(&form) {
            f.reset_values();
        }
        match self.reset_validation(&form) {
            Ok(()) => Dispatched::ValidationReset { form },
            Err(_) => Dispatched::Ignored,
        }
    }

    fn on_key(&mut self, key: Key, modifiers: Modifiers) -> Dispatched {
        match self.keybinds.lookup(key, modifiers) {
            Some(Shortcut::FocusSearch) => match self.focus_search() {
                Some(input) => Dispatched::SearchFocused { input },
                None => Dispatched::Ignored,
            },
            Some(Shortcut::CloseDialog) => match &self.open_dialog {
                Some(dialog) => Dispatched::DialogCloseRequested {
                    dialog: dialog.clone(),
                },
                None => Dispatched::Ignored,
            },
            None => Dispatched::Ignored,
        }
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Write every model back onto the document.
    pub fn render(&self, root: &mut Element) {
        for bound in &self.tables {
            apply_table(&bound.table, &bound.binding, root);
        }
        for form in &self.forms {
            apply_form(form, root);
        }
        for search in &self.search_boxes {
            if let Some(input) = root.find_mut(&search.input_id) {
                input.set_attr("value", search.value.as_str());
            }
        }
        for dialog in &self.dialogs {
            if let Some(el) = root.find_mut(&dialog.id) {
                if self.open_dialog.as_deref() == Some(dialog.id.as_str()) {
                    el.add_class("show");
                } else {
                    el.remove_class("show");
                }
            }
        }
        apply_toasts(&self.toasts, root);
    }
}

/// Bind a `.table-search` input to the table named by its `data-table`
/// attribute, or else to the table in its nearest `.table-responsive`
/// container.
fn scan_search_box(root: &Element, input: &Element) -> Option<SearchBox> {
    let table = match input.get_attr("data-table") {
        Some(table_id) => root.find(table_id).filter(|el| el.is("table"))?,
        None => {
            let container = root.closest(&input.id, |el| el.has_class("table-responsive"))?;
            container.walk().find(|el| el.is("table"))?
        }
    };
    let clear_id = root
        .closest(&input.id, |el| el.has_class("input-group"))
        .and_then(|group| group.walk().find(|el| el.has_attr("data-clear-search")))
        .map(|button| button.id.clone());

    Some(SearchBox {
        input_id: input.id.clone(),
        clear_id,
        table_id: table.id.clone(),
        value: input.get_attr("value").unwrap_or_default().to_string(),
    })
}
