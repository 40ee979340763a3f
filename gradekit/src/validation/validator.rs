//! Field and form validation.

use log::debug;

use crate::config::ToolkitConfig;
use crate::utils::number::parse_leading_float;

use super::field::{Field, ValidationState};
use super::form::Form;
use super::result::{FieldError, ValidationResult};

/// Runs field constraints and records the outcome on the fields.
///
/// # Example
///
/// ```
/// use gradekit::validation::{Field, Form, Validator};
///
/// let validator = Validator::default();
/// let mut form = Form::new("grade")
///     .field(Field::text("student").required().value("S001"))
///     .field(Field::number("score").value("100.01"));
///
/// assert!(!validator.validate_form(&mut form));
/// assert_eq!(
///     form.get("score").and_then(|f| f.feedback()),
///     Some("Value must be between 0 and 100")
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ToolkitConfig,
}

impl Validator {
    pub fn new(config: ToolkitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    /// Check a field's constraints without touching it.
    ///
    /// Blank required fields fail with the required message. Non-empty
    /// numeric values must parse and lie within the field's bounds; a value
    /// that does not parse is outside any bounds. Everything else passes.
    pub fn check_field(&self, field: &Field) -> Result<(), String> {
        let value = field.current_value();

        if field.is_required() && value.trim().is_empty() {
            return Err(self.config.required_message.clone());
        }

        if field.is_numeric() && !value.is_empty() {
            let bounds = field.bounds(self.config.default_bounds);
            let in_range = parse_leading_float(value).is_some_and(|v| bounds.contains(v));
            if !in_range {
                return Err(self.config.format_range_message(bounds));
            }
        }

        Ok(())
    }

    /// Validate one field and update its state and feedback.
    pub fn validate_field(&self, field: &mut Field) -> ValidationState {
        match self.check_field(field) {
            Ok(()) => field.mark_valid(),
            Err(msg) => {
                debug!("Field {} invalid: {}", field.name(), msg);
                field.mark_invalid(msg);
            }
        }
        field.state()
    }

    /// Validate every constrained field of a form.
    ///
    /// Every field is evaluated and annotated, even after a failure, so all
    /// problems show at once. Fields with no constraint are left untouched.
    pub fn check_form(&self, form: &mut Form) -> ValidationResult {
        let mut errors = Vec::new();

        for field in form.fields_mut().iter_mut().filter(|f| f.is_constrained()) {
            if self.validate_field(field) == ValidationState::Invalid {
                errors.push(FieldError {
                    field_name: field.name().to_string(),
                    element_id: field.element_id().to_string(),
                    message: field.feedback().unwrap_or_default().to_string(),
                });
            }
        }

        let result = ValidationResult::from(errors);
        form.set_last_validation_result(result.is_valid());
        debug!(
            "Validated form {}: {} invalid field(s)",
            form.id(),
            result.errors().len()
        );
        result
    }

    /// Validate a form; `false` means the submission must be suppressed.
    pub fn validate_form(&self, form: &mut Form) -> bool {
        self.check_form(form).is_valid()
    }

    /// Clear indicators and feedback on every field without re-checking.
    pub fn reset_validation(&self, form: &mut Form) {
        for field in form.fields_mut() {
            field.clear_validation();
        }
        debug!("Reset validation of form {}", form.id());
    }
}
