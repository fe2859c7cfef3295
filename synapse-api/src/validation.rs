//! Validation Traits
//!
//! Common validation patterns extracted from route handlers and services.
//! These traits reduce boilerplate and improve consistency.

use crate::error::{ApiError, ApiResult};

/// Trait for validating non-empty strings.
///
/// # Example
/// ```ignore
/// use synapse_api::validation::ValidateNonEmpty;
///
/// fn create_brain(name: &str) -> ApiResult<()> {
///     name.validate_non_empty("name")?;
///     // ... rest of logic
/// }
/// ```
pub trait ValidateNonEmpty {
    /// Validate that the value is non-empty.
    ///
    /// # Errors
    /// Returns `ApiError::missing_field` if the value is empty or whitespace-only.
    fn validate_non_empty(&self, field_name: &str) -> ApiResult<()>;
}

impl ValidateNonEmpty for str {
    fn validate_non_empty(&self, field_name: &str) -> ApiResult<()> {
        if self.trim().is_empty() {
            return Err(ApiError::missing_field(field_name));
        }
        Ok(())
    }
}

impl ValidateNonEmpty for &str {
    fn validate_non_empty(&self, field_name: &str) -> ApiResult<()> {
        (*self).validate_non_empty(field_name)
    }
}

impl ValidateNonEmpty for String {
    fn validate_non_empty(&self, field_name: &str) -> ApiResult<()> {
        self.as_str().validate_non_empty(field_name)
    }
}

impl<T: ValidateNonEmpty> ValidateNonEmpty for Option<T> {
    fn validate_non_empty(&self, field_name: &str) -> ApiResult<()> {
        match self {
            Some(value) => value.validate_non_empty(field_name),
            None => Err(ApiError::missing_field(field_name)),
        }
    }
}

/// Trait for validating character-length bounds on user-supplied strings.
///
/// Lengths are counted in characters, not bytes, so multi-byte input is not
/// rejected early.
pub trait ValidateLength {
    /// Validate that the trimmed value has between `min` and `max` characters
    /// inclusive.
    fn validate_char_len(&self, field_name: &str, min: usize, max: usize) -> ApiResult<()>;
}

impl ValidateLength for str {
    fn validate_char_len(&self, field_name: &str, min: usize, max: usize) -> ApiResult<()> {
        let len = self.trim().chars().count();
        if len < min || len > max {
            return Err(ApiError::invalid_range(field_name, min, max).with_detail(format!(
                "'{}' has {} characters",
                field_name, len
            )));
        }
        Ok(())
    }
}

impl ValidateLength for String {
    fn validate_char_len(&self, field_name: &str, min: usize, max: usize) -> ApiResult<()> {
        self.as_str().validate_char_len(field_name, min, max)
    }
}

/// Trait for validating numeric ranges.
///
/// # Example
/// ```ignore
/// use synapse_api::validation::ValidateRange;
///
/// fn set_max_tokens(max_tokens: i32) -> ApiResult<()> {
///     max_tokens.validate_range("max_tokens", 100, 4096)?;
///     // ... rest of logic
/// }
/// ```
pub trait ValidateRange {
    /// Validate that the value is within an inclusive range.
    fn validate_range(&self, field_name: &str, min: Self, max: Self) -> ApiResult<()>
    where
        Self: Sized;
}

macro_rules! impl_validate_range {
    ($($t:ty),*) => {
        $(
            impl ValidateRange for $t {
                fn validate_range(&self, field_name: &str, min: Self, max: Self) -> ApiResult<()> {
                    if *self < min || *self > max {
                        return Err(ApiError::invalid_range(field_name, min, max));
                    }
                    Ok(())
                }
            }
        )*
    };
}

impl_validate_range!(i32, i64, u32, u64, usize, f32, f64);
