use super::field::Field;

/// An ordered set of fields submitted together.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Form {
    id: String,
    fields: Vec<Field>,
    /// Outcome of the most recent submission attempt.
    last_validation_result: Option<bool>,
    /// Prompt shown before a valid submission; empty means the default.
    confirm: Option<String>,
}

impl Form {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
            last_validation_result: None,
            confirm: None,
        }
    }

    /// Ask for confirmation before a valid submission goes through.
    ///
    /// An empty message falls back to `ToolkitConfig::confirm_message`.
    pub fn confirm(mut self, message: impl Into<String>) -> Self {
        self.confirm = Some(message.into());
        self
    }

    /// Confirmation text as given in the markup, if the form asks.
    pub fn confirm_text(&self) -> Option<&str> {
        self.confirm.as_deref()
    }

    /// Add a field.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn push_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut [Field] {
        &mut self.fields
    }

    /// Field by submitted name.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name() == name)
    }

    /// Field by element id.
    pub fn by_element_id_mut(&mut self, id: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.element_id() == id)
    }

    pub fn last_validation_result(&self) -> Option<bool> {
        self.last_validation_result
    }

    pub(crate) fn set_last_validation_result(&mut self, valid: bool) {
        self.last_validation_result = Some(valid);
    }

    /// Restore every field's initial value.
    pub fn reset_values(&mut self) {
        for field in &mut self.fields {
            field.reset_value();
        }
    }
}
