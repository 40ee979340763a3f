pub mod config;
pub mod keybinds;
pub mod markup;
pub mod page;
pub mod table;
pub mod toast;
pub mod utils;
pub mod validation;

pub use config::{NumericBounds, ToolkitConfig};
pub use page::{AcceptAll, ConfirmPrompt, Dispatched, Page, PageError};

pub mod prelude {
    pub use crate::config::{NumericBounds, ToolkitConfig};
    pub use crate::keybinds::{KeyCombo, Keybinds, Shortcut};
    pub use crate::page::{AcceptAll, ConfirmPrompt, Dispatched, Page, PageError};
    pub use crate::table::{
        Column, Download, DownloadError, DownloadSink, FileSink, MemorySink, NoDownload, Row,
        SortDirection, Table, ValueType, export_to_delimited_text,
    };
    pub use crate::toast::{Toast, ToastLevel, ToastQueue};
    pub use crate::validation::{
        Field, FieldError, Form, ValidationResult, ValidationState, Validator,
    };

    pub use gradedom::{Element, Event, EventControl, Key, Modifiers};
}
