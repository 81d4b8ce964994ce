// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::identity::{service_name, span_name};
use crate::metric::MetricRecord;
use crate::stack::normalize_stack;
use sentry::protocol::{Event, Exception, Level, User, Value};
use tracing::debug;

// Tag value for identity fields the record does not resolve. All five tags
// are always present on a report.
const UNKNOWN_TAG_VALUE: &str = "unknown";

/// Assemble the tagged exception report for a failed span.
///
/// Returns `None` for records without an error; those are never reported.
/// The input record is only read, never modified.
///
/// A normalized, non-null stack selects exception capture; without one the
/// report degrades to a message capture at level `error`.
pub fn build_report(metric: &MetricRecord, user_meta_key: Option<&str>) -> Option<Event<'static>> {
    let error = metric.error.as_ref()?;

    let mut event = Event {
        level: Level::Error,
        ..Default::default()
    };

    let tags = &mut event.tags;
    tags.insert("id".to_string(), tag_value(metric.request_id.clone()));
    tags.insert("service".to_string(), tag_value(service_name(metric)));
    tags.insert("span".to_string(), tag_value(span_name(metric)));
    tags.insert("type".to_string(), tag_value(error.error_type.clone()));
    tags.insert(
        "code".to_string(),
        tag_value(error.code.as_ref().map(ToString::to_string)),
    );

    if let Some(data) = &error.data {
        event.extra.insert("data".to_string(), data.clone());
    }

    if let Some(value) = user_meta_key.and_then(|key| metric.meta.as_ref()?.get(key)) {
        event.user = user_from_meta(value);
    }

    match normalize_stack(error.stack.as_ref()) {
        Some(frames) => {
            let joined = frames.join("\n");
            let exception = Exception {
                ty: error.name.clone().unwrap_or_else(|| "Error".to_string()),
                value: error.message.clone(),
                stacktrace: sentry_backtrace::parse_stacktrace(&joined),
                ..Default::default()
            };
            if exception.stacktrace.is_none() && !joined.is_empty() {
                // Producer stacks that don't parse into frames stay visible
                // on the report instead of being dropped.
                event.extra
                    .insert("stacktrace".to_string(), Value::String(joined));
            }
            event.exception = vec![exception].into();
        }
        None => {
            event.message = Some(error.message.clone().unwrap_or_default());
        }
    }

    Some(event)
}

fn tag_value(value: Option<String>) -> String {
    value.unwrap_or_else(|| UNKNOWN_TAG_VALUE.to_string())
}

fn user_from_meta(value: &Value) -> Option<User> {
    match value {
        Value::Object(_) => match serde_json::from_value::<User>(value.clone()) {
            Ok(user) => Some(user),
            Err(err) => {
                debug!("user meta entry does not fit the user shape: {err}");
                None
            }
        },
        Value::String(id) => Some(User {
            id: Some(id.clone()),
            ..Default::default()
        }),
        _ => None,
    }
}
