use std::collections::HashMap;

/// Field name -> human readable problem
pub type FieldErrors = HashMap<String, String>;

/// Payload constraints checked at the transport boundary, before handler logic runs
pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}

/// Record an error when `value` is present and its length (in characters) is out of bounds
pub fn check_length(errors: &mut FieldErrors, field: &str, value: Option<&str>, min: usize, max: usize) {
    let Some(value) = value else { return };
    let len = value.chars().count();
    if len < min {
        errors.insert(
            field.to_string(),
            format!("String should have at least {} character{}", min, if min == 1 { "" } else { "s" }),
        );
    } else if len > max {
        errors.insert(field.to_string(), format!("String should have at most {} characters", max));
    }
}

pub fn into_result(errors: FieldErrors) -> Result<(), FieldErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
