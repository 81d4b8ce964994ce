// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::metric::MetricRecord;

/// Resolve the service name of a metric record.
///
/// The explicit `service` field wins, whether it arrived as a bare name or as
/// a descriptor object. Without it, the service is derived from the action's
/// fully qualified name by dropping the trailing action segment.
pub fn service_name(metric: &MetricRecord) -> Option<String> {
    if let Some(service) = &metric.service {
        return service.name().map(str::to_string);
    }
    let action_name = metric.action.as_ref()?.name.as_deref()?;
    let mut parts: Vec<&str> = action_name.split('.').collect();
    parts.pop();
    Some(parts.join("."))
}

/// Resolve the span label: the action name when an action is present,
/// otherwise the record's own `name`.
pub fn span_name(metric: &MetricRecord) -> Option<String> {
    match &metric.action {
        Some(action) => action.name.clone(),
        None => metric.name.clone(),
    }
}
