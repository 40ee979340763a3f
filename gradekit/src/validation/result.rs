/// A field that failed its check on submit, with the feedback shown under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The control's `name`, or its id when it has none.
    pub field_name: String,
    /// Id of the control that gets `is-invalid` and the feedback element.
    pub element_id: String,
    /// Required or range message.
    pub message: String,
}

/// Outcome of one submission attempt.
///
/// Every field is checked, so `Invalid` lists all failing fields in form
/// order rather than stopping at the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidationResult {
    /// The submission may proceed.
    #[default]
    Valid,
    /// The submission is suppressed.
    Invalid(Vec<FieldError>),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Failing fields in form order; empty when valid.
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Valid => &[],
            Self::Invalid(errors) => errors,
        }
    }

    /// Feedback for a field by name, if it failed.
    pub fn message_for(&self, field_name: &str) -> Option<&str> {
        self.errors()
            .iter()
            .find(|e| e.field_name == field_name)
            .map(|e| e.message.as_str())
    }

    /// Control to focus after a failed submit: the first one in the form.
    pub fn first_invalid_element(&self) -> Option<&str> {
        self.errors().first().map(|e| e.element_id.as_str())
    }
}

impl From<Vec<FieldError>> for ValidationResult {
    fn from(errors: Vec<FieldError>) -> Self {
        if errors.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(errors)
        }
    }
}
