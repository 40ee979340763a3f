use gradekit::ToolkitConfig;
use gradekit::validation::{Field, Form, ValidationState, Validator};

fn validate(field: Field) -> (ValidationState, Option<String>) {
    let mut field = field;
    let state = Validator::default().validate_field(&mut field);
    (state, field.feedback().map(str::to_string))
}

// ============================================================================
// Fields
// ============================================================================

#[test]
fn test_numeric_upper_bound_is_inclusive() {
    let (state, feedback) = validate(Field::number("score").value("100"));
    assert_eq!(state, ValidationState::Valid);
    assert_eq!(feedback, None);
}

#[test]
fn test_numeric_just_above_bound_is_invalid() {
    let (state, feedback) = validate(Field::number("score").value("100.01"));
    assert_eq!(state, ValidationState::Invalid);
    assert_eq!(feedback.as_deref(), Some("Value must be between 0 and 100"));
}

#[test]
fn test_numeric_lower_bound() {
    assert_eq!(validate(Field::number("s").value("0")).0, ValidationState::Valid);
    assert_eq!(validate(Field::number("s").value("-0.5")).0, ValidationState::Invalid);
}

#[test]
fn test_empty_optional_field_is_valid() {
    assert_eq!(validate(Field::number("s")).0, ValidationState::Valid);
    assert_eq!(validate(Field::text("t")).0, ValidationState::Valid);
}

#[test]
fn test_required_blank_is_invalid() {
    let (state, feedback) = validate(Field::text("name").required());
    assert_eq!(state, ValidationState::Invalid);
    assert_eq!(feedback.as_deref(), Some("This field is required"));
}

#[test]
fn test_required_numeric_blank_reports_required() {
    let (_, feedback) = validate(Field::number("score").required().value(" "));
    assert_eq!(feedback.as_deref(), Some("This field is required"));
}

#[test]
fn test_unparseable_number_is_out_of_range() {
    let (state, feedback) = validate(Field::number("score").value("abc"));
    assert_eq!(state, ValidationState::Invalid);
    assert_eq!(feedback.as_deref(), Some("Value must be between 0 and 100"));
}

#[test]
fn test_explicit_bounds_replace_defaults_per_side() {
    assert_eq!(
        validate(Field::number("s").max(150.0).value("120")).0,
        ValidationState::Valid
    );
    assert_eq!(
        validate(Field::number("s").min(50.0).value("20")).0,
        ValidationState::Invalid
    );
    let (_, feedback) = validate(Field::number("s").min(50.0).value("200"));
    assert_eq!(feedback.as_deref(), Some("Value must be between 50 and 100"));
}

#[test]
fn test_configured_default_bounds() {
    let validator = Validator::new(ToolkitConfig::new().default_bounds(0.0, 4.0));
    let mut gpa = Field::number("gpa").value("4.5");
    assert_eq!(validator.validate_field(&mut gpa), ValidationState::Invalid);
    assert_eq!(gpa.feedback(), Some("Value must be between 0 and 4"));
}

#[test]
fn test_feedback_is_replaced_not_appended() {
    let validator = Validator::default();
    let mut field = Field::number("score").required();
    validator.validate_field(&mut field);
    assert_eq!(field.feedback(), Some("This field is required"));

    field.set_value("150");
    validator.validate_field(&mut field);
    assert_eq!(field.feedback(), Some("Value must be between 0 and 100"));

    field.set_value("50");
    validator.validate_field(&mut field);
    assert_eq!(field.feedback(), None);
    assert_eq!(field.state(), ValidationState::Valid);
}

// ============================================================================
// Forms
// ============================================================================

fn grade_form() -> Form {
    Form::new("grade")
        .field(Field::text("student").required().value("S001"))
        .field(Field::text("course").required().value("CS101"))
        .field(Field::number("score").required().value("140"))
        .field(Field::number("bonus").value("5"))
        .field(Field::text("note"))
}

#[test]
fn test_form_reports_only_invalid_fields() {
    let validator = Validator::default();
    let mut form = grade_form();

    assert!(!validator.validate_form(&mut form));
    assert_eq!(form.last_validation_result(), Some(false));

    let with_feedback: Vec<&str> = form
        .fields()
        .iter()
        .filter(|f| f.feedback().is_some())
        .map(|f| f.name())
        .collect();
    assert_eq!(with_feedback, vec!["score"]);
}

#[test]
fn test_form_does_not_short_circuit() {
    let validator = Validator::default();
    let mut form = Form::new("f")
        .field(Field::text("a").required())
        .field(Field::number("b").value("-1"))
        .field(Field::text("c").required().value("ok"));

    let result = validator.check_form(&mut form);
    assert!(result.is_invalid());
    let names: Vec<&str> = result.errors().iter().map(|e| e.field_name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(result.first_invalid_element(), Some("a"));
    assert_eq!(result.message_for("a"), Some("This field is required"));
    assert_eq!(result.message_for("b"), Some("Value must be between 0 and 100"));
    assert_eq!(result.message_for("c"), None);
    assert_eq!(form.get("c").unwrap().state(), ValidationState::Valid);
}

#[test]
fn test_unconstrained_fields_stay_untouched() {
    let validator = Validator::default();
    let mut form = grade_form();
    validator.validate_form(&mut form);
    assert_eq!(form.get("note").unwrap().state(), ValidationState::Untouched);
}

#[test]
fn test_valid_form() {
    let validator = Validator::default();
    let mut form = grade_form();
    form.get_mut("score").unwrap().set_value("88");
    assert!(validator.validate_form(&mut form));
    assert_eq!(form.last_validation_result(), Some(true));
    assert!(validator.check_form(&mut form).errors().is_empty());
}

#[test]
fn test_each_attempt_revalidates_from_scratch() {
    let validator = Validator::default();
    let mut form = grade_form();
    assert!(!validator.validate_form(&mut form));
    form.get_mut("score").unwrap().set_value("60");
    assert!(validator.validate_form(&mut form));
}

#[test]
fn test_reset_clears_without_rechecking() {
    let validator = Validator::default();
    let mut form = grade_form();
    validator.validate_form(&mut form);

    validator.reset_validation(&mut form);
    for field in form.fields() {
        assert_eq!(field.state(), ValidationState::Untouched);
        assert_eq!(field.feedback(), None);
    }
    // Still out of range; reset does not look at values.
    assert_eq!(form.get("score").unwrap().current_value(), "140");
}

#[test]
fn test_reset_values_restores_initial_values() {
    let mut form = grade_form();
    form.get_mut("score").unwrap().set_value("12");
    form.reset_values();
    assert_eq!(form.get("score").unwrap().current_value(), "140");
}
