//! Form fields and their validation state.

use crate::config::NumericBounds;
use crate::table::ValueType;

/// Outcome of the last validation of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationState {
    /// Not validated since the form was presented or reset.
    #[default]
    Untouched,
    Valid,
    Invalid,
}

impl ValidationState {
    /// Indicator class shown on the field, if any.
    pub fn indicator_class(self) -> Option<&'static str> {
        match self {
            ValidationState::Untouched => None,
            ValidationState::Valid => Some("is-valid"),
            ValidationState::Invalid => Some("is-invalid"),
        }
    }
}

/// A single input control of a form.
///
/// # Example
///
/// ```
/// use gradekit::validation::Field;
///
/// let score = Field::number("score").required().max(150.0).value("120");
/// assert!(score.is_constrained());
/// assert_eq!(score.current_value(), "120");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Element id of the control.
    id: String,
    /// Submitted name.
    name: String,
    /// Current value.
    value: String,
    /// Value restored when the form is reset.
    default_value: String,
    required: bool,
    value_type: ValueType,
    min: Option<f64>,
    max: Option<f64>,
    state: ValidationState,
    /// One-line feedback shown after the field.
    feedback: Option<String>,
}

impl Field {
    fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            value: String::new(),
            default_value: String::new(),
            required: false,
            value_type,
            min: None,
            max: None,
            state: ValidationState::Untouched,
            feedback: None,
        }
    }

    /// Create a text field. Its element id defaults to the name.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Text)
    }

    /// Create a numeric field. Its element id defaults to the name.
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Number)
    }

    // -------------------------------------------------------------------------
    // Builders
    // -------------------------------------------------------------------------

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Set the initial value, which is also the reset value.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.default_value = value.clone();
        self.value = value;
        self
    }

    // -------------------------------------------------------------------------
    // Access
    // -------------------------------------------------------------------------

    pub fn element_id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current_value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Restore the initial value.
    pub fn reset_value(&mut self) {
        self.value = self.default_value.clone();
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_numeric(&self) -> bool {
        self.value_type == ValueType::Number
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Whether form validation looks at this field at all.
    pub fn is_constrained(&self) -> bool {
        self.required || self.is_numeric()
    }

    /// Effective bounds; each missing side falls back to `defaults`.
    pub fn bounds(&self, defaults: NumericBounds) -> NumericBounds {
        NumericBounds::new(
            self.min.unwrap_or(defaults.min),
            self.max.unwrap_or(defaults.max),
        )
    }

    pub fn state(&self) -> ValidationState {
        self.state
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    // -------------------------------------------------------------------------
    // Marking
    // -------------------------------------------------------------------------

    /// Mark invalid, replacing any previous feedback.
    pub fn mark_invalid(&mut self, message: impl Into<String>) {
        self.state = ValidationState::Invalid;
        self.feedback = Some(message.into());
    }

    /// Mark valid and drop any feedback.
    pub fn mark_valid(&mut self) {
        self.state = ValidationState::Valid;
        self.feedback = None;
    }

    /// Back to untouched with no feedback.
    pub fn clear_validation(&mut self) {
        self.state = ValidationState::Untouched;
        self.feedback = None;
    }
}
