//! Toolkit configuration.

use std::time::Duration;

use crate::utils::number::format_number;

/// Default duration for banner messages.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(5);

/// Inclusive numeric range a numeric field must fall in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericBounds {
    pub min: f64,
    pub max: f64,
}

impl NumericBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies in `[min, max]`. NaN never does.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for NumericBounds {
    /// Score semantics: a percentage from 0 to 100.
    fn default() -> Self {
        Self::new(0.0, 100.0)
    }
}

/// Settings shared by the table and validation engines.
///
/// Numeric fields that declare no `min`/`max` fall back to
/// [`default_bounds`](Self::default_bounds), one side at a time.
#[derive(Debug, Clone)]
pub struct ToolkitConfig {
    /// Bounds for numeric fields without explicit `min`/`max`.
    pub default_bounds: NumericBounds,

    /// Feedback shown when a required field is blank.
    pub required_message: String,

    /// Feedback shown when a numeric field is out of range.
    /// `{min}` and `{max}` are substituted.
    pub range_message: String,

    /// Placeholder for search boxes attached without one.
    pub search_placeholder: String,

    /// How long banner messages stay visible.
    pub toast_duration: Duration,

    /// Prompt for `data-confirm` forms that give no text of their own.
    pub confirm_message: String,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            default_bounds: NumericBounds::default(),
            required_message: "This field is required".to_string(),
            range_message: "Value must be between {min} and {max}".to_string(),
            search_placeholder: "Search...".to_string(),
            toast_duration: DEFAULT_TOAST_DURATION,
            confirm_message: "Are you sure you want to do this?".to_string(),
        }
    }
}

impl ToolkitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback bounds for numeric fields.
    pub fn default_bounds(mut self, min: f64, max: f64) -> Self {
        self.default_bounds = NumericBounds::new(min, max);
        self
    }

    pub fn required_message(mut self, msg: impl Into<String>) -> Self {
        self.required_message = msg.into();
        self
    }

    pub fn range_message(mut self, template: impl Into<String>) -> Self {
        self.range_message = template.into();
        self
    }

    pub fn search_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.search_placeholder = placeholder.into();
        self
    }

    pub fn toast_duration(mut self, duration: Duration) -> Self {
        self.toast_duration = duration;
        self
    }

    pub fn confirm_message(mut self, msg: impl Into<String>) -> Self {
        self.confirm_message = msg.into();
        self
    }

    /// Render the out-of-range message for concrete bounds.
    pub fn format_range_message(&self, bounds: NumericBounds) -> String {
        self.range_message
            .replace("{min}", &format_number(bounds.min))
            .replace("{max}", &format_number(bounds.max))
    }
}
