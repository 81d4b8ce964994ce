// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// One entry of a tracing event batch. Produced by the host runtime's
/// instrumentation layer; a record may or may not carry an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    #[serde(rename = "requestID", default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<HashMap<String, Value>>,
}

/// Upstream producers emit the service either as a bare name or as a
/// descriptor object. Resolution to a plain name happens in
/// [`crate::identity::service_name`], not at the call sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceField {
    Name(String),
    Descriptor { name: Option<String> },
}

impl ServiceField {
    pub fn name(&self) -> Option<&str> {
        match self {
            ServiceField::Name(name) => Some(name),
            ServiceField::Descriptor { name } => name.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Error payload attached to a failed span.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<StackField>,
}

/// Error codes arrive as numbers or strings. The derived equality is
/// discriminant-exact: a numeric code never matches a string code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode {
    Number(i64),
    Text(String),
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::Number(code) => write!(f, "{code}"),
            ErrorCode::Text(code) => write!(f, "{code}"),
        }
    }
}

impl From<i64> for ErrorCode {
    fn from(code: i64) -> Self {
        ErrorCode::Number(code)
    }
}

impl From<&str> for ErrorCode {
    fn from(code: &str) -> Self {
        ErrorCode::Text(code.to_string())
    }
}

impl From<String> for ErrorCode {
    fn from(code: String) -> Self {
        ErrorCode::Text(code)
    }
}

/// Stack representation as emitted upstream: a single preformatted string or
/// a sequence of frame lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StackField {
    Raw(String),
    Frames(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_with_string_service() {
        let record: MetricRecord = serde_json::from_value(json!({
            "requestID": "r1",
            "service": "svc",
            "action": { "name": "svc.act" },
        }))
        .unwrap();
        assert_eq!(record.request_id.as_deref(), Some("r1"));
        assert_eq!(record.service, Some(ServiceField::Name("svc".to_string())));
        assert!(record.error.is_none());
    }

    #[test]
    fn test_record_with_service_descriptor() {
        let record: MetricRecord = serde_json::from_value(json!({
            "service": { "name": "svc", "version": 2 },
        }))
        .unwrap();
        assert_eq!(record.service.unwrap().name(), Some("svc"));
    }

    #[test]
    fn test_error_code_shapes() {
        let numeric: ErrorInfo = serde_json::from_value(json!({ "code": 404 })).unwrap();
        let text: ErrorInfo = serde_json::from_value(json!({ "code": "E_NOT_FOUND" })).unwrap();
        assert_eq!(numeric.code, Some(ErrorCode::Number(404)));
        assert_eq!(text.code, Some(ErrorCode::Text("E_NOT_FOUND".to_string())));
    }

    #[test]
    fn test_error_code_no_cross_type_equality() {
        assert_ne!(ErrorCode::Number(404), ErrorCode::Text("404".to_string()));
        assert_eq!(ErrorCode::Number(404), ErrorCode::from(404));
        assert_eq!(ErrorCode::Text("404".to_string()), ErrorCode::from("404"));
    }

    #[test]
    fn test_stack_shapes() {
        let raw: ErrorInfo = serde_json::from_value(json!({ "stack": "line" })).unwrap();
        let frames: ErrorInfo =
            serde_json::from_value(json!({ "stack": ["line1", "line2"] })).unwrap();
        assert_eq!(raw.stack, Some(StackField::Raw("line".to_string())));
        assert_eq!(
            frames.stack,
            Some(StackField::Frames(vec![
                "line1".to_string(),
                "line2".to_string()
            ]))
        );
    }
}
