//! Form validation for Gradekit.
//!
//! Fields declare their constraints (`required`, numeric bounds) and a
//! [`Validator`] evaluates them, leaving a state and at most one feedback
//! message on each field.
//!
//! # Example
//!
//! ```
//! use gradekit::validation::{Field, Form, ValidationState, Validator};
//!
//! let validator = Validator::default();
//! let mut form = Form::new("score-form")
//!     .field(Field::text("course").required().value("CS101"))
//!     .field(Field::number("score").required().value("87.5"));
//!
//! if validator.validate_form(&mut form) {
//!     // Proceed with submission
//! }
//! assert_eq!(form.fields()[1].state(), ValidationState::Valid);
//!
//! validator.reset_validation(&mut form);
//! assert_eq!(form.fields()[1].state(), ValidationState::Untouched);
//! ```

mod field;
mod form;
mod result;
mod validator;

pub use field::{Field, ValidationState};
pub use form::Form;
pub use result::{FieldError, ValidationResult};
pub use validator::Validator;
