use crate::{fail, KernelError};

pub(crate) fn bounded_text(
    value: String,
    label: &str,
    min: usize,
    max: usize,
) -> error_stack::Result<String, KernelError> {
    let value = value.trim().to_string();
    let length = value.chars().count();
    if length < min {
        return Err(fail(
            KernelError::Validation,
            format!("{label} must have more or equal than {min} characters"),
        ));
    }
    if length > max {
        return Err(fail(
            KernelError::Validation,
            format!("{label} must have less or equal than {max} characters"),
        ));
    }
    Ok(value)
}

pub(crate) fn bounded_number(
    value: i32,
    label: &str,
    min: i32,
    max: i32,
) -> error_stack::Result<i32, KernelError> {
    if value < min {
        return Err(fail(
            KernelError::Validation,
            format!("{label} must not be below {min}"),
        ));
    }
    if value > max {
        return Err(fail(
            KernelError::Validation,
            format!("{label} must not be above {max}"),
        ));
    }
    Ok(value)
}
