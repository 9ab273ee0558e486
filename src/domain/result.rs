//! Result type alias for polystore
//!
//! This module provides a convenient Result type alias that uses
//! PolystoreError as the error type.

use super::errors::PolystoreError;

/// Result type alias for polystore operations
///
/// Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use polystore::domain::result::Result;
/// use polystore::domain::errors::PolystoreError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(PolystoreError::Validation("invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, PolystoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::PolystoreError;

    #[test]
    fn test_result_ok() {
        let result: Result<i32> = Ok(42);
        assert!(result.is_ok());
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(PolystoreError::Validation("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
