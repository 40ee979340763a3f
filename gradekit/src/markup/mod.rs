//! Markup adapter between the document tree and the engine models.
//!
//! Scanning reads tables and forms out of a [`gradedom::Element`] tree;
//! applying writes sort indicators, row order and visibility, validation
//! classes and feedback back onto it. The engines never see the tree.

mod apply;
mod scan;

pub use apply::{SearchBoxIds, apply_form, apply_table, apply_toasts, insert_search_box};
pub use scan::{TableBinding, bind_table, scan_form, scan_table};
