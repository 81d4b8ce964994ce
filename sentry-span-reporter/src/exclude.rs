// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::metric::{ErrorCode, ErrorInfo};

/// Check whether an error is administratively suppressed by its code.
///
/// An empty exclusion set excludes nothing, and a code-less error can never
/// match the set. Membership uses the exact, discriminant-aware equality of
/// [`ErrorCode`]: `404` and `"404"` are distinct codes.
pub fn is_excluded(error: Option<&ErrorInfo>, exclude_codes: &[ErrorCode]) -> bool {
    if exclude_codes.is_empty() {
        return false;
    }
    let Some(code) = error.and_then(|error| error.code.as_ref()) else {
        return false;
    };
    exclude_codes.contains(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_code(code: impl Into<ErrorCode>) -> ErrorInfo {
        ErrorInfo {
            code: Some(code.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_config_excludes_nothing() {
        assert!(!is_excluded(Some(&with_code(404)), &[]));
        assert!(!is_excluded(Some(&with_code("VALIDATION_ERROR")), &[]));
    }

    #[test]
    fn test_numeric_codes() {
        let codes = vec![ErrorCode::from(404), ErrorCode::from(500)];
        assert!(is_excluded(Some(&with_code(404)), &codes));
        assert!(is_excluded(Some(&with_code(500)), &codes));
        assert!(!is_excluded(Some(&with_code(400)), &codes));
        assert!(!is_excluded(Some(&with_code(503)), &codes));
    }

    #[test]
    fn test_string_codes() {
        let codes = vec![
            ErrorCode::from("VALIDATION_ERROR"),
            ErrorCode::from("NOT_FOUND"),
        ];
        assert!(is_excluded(Some(&with_code("VALIDATION_ERROR")), &codes));
        assert!(is_excluded(Some(&with_code("NOT_FOUND")), &codes));
        assert!(!is_excluded(Some(&with_code("INTERNAL_ERROR")), &codes));
        assert!(!is_excluded(Some(&with_code("TIMEOUT")), &codes));
    }

    #[test]
    fn test_mixed_codes() {
        let codes = vec![
            ErrorCode::from(404),
            ErrorCode::from("VALIDATION_ERROR"),
            ErrorCode::from(500),
            ErrorCode::from("NOT_FOUND"),
        ];
        assert!(is_excluded(Some(&with_code(404)), &codes));
        assert!(is_excluded(Some(&with_code("VALIDATION_ERROR")), &codes));
        assert!(!is_excluded(Some(&with_code(400)), &codes));
        assert!(!is_excluded(Some(&with_code("TIMEOUT")), &codes));
    }

    #[test]
    fn test_no_cross_type_match() {
        let codes = vec![ErrorCode::from(404)];
        assert!(!is_excluded(Some(&with_code("404")), &codes));
    }

    #[test]
    fn test_code_less_error_never_excluded() {
        let codes = vec![ErrorCode::from(404), ErrorCode::from(500)];
        assert!(!is_excluded(Some(&ErrorInfo::default()), &codes));
        assert!(!is_excluded(None, &codes));
    }
}
