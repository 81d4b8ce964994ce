// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::metric::ErrorCode;
use sentry::ClientOptions;
use std::env;

/// Event name carrying finished tracing spans, as emitted by the host
/// runtime's tracing exporter.
pub const DEFAULT_TRACING_EVENT_NAME: &str = "$tracing.spans";

/// Reporter configuration, supplied by the host.
///
/// The default value has no DSN and thus disables reporting entirely; the
/// pipeline stays a no-op until a DSN is configured.
#[derive(Debug, Clone)]
pub struct ReporterConfig {
    /// Sentry DSN. Absent means reporting is disabled.
    pub dsn: Option<String>,
    /// Name of the tracing event the pipeline filters on.
    pub tracing_event_name: String,
    /// Additional options passed through verbatim to client initialization.
    pub options: ClientOptions,
    /// Key of the `meta` entry holding user-identifying data.
    pub user_meta_key: Option<String>,
    /// Error codes never reported.
    pub exclude_error_codes: Vec<ErrorCode>,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            tracing_event_name: DEFAULT_TRACING_EVENT_NAME.to_string(),
            options: ClientOptions::default(),
            user_meta_key: None,
            exclude_error_codes: Vec::new(),
        }
    }
}

impl ReporterConfig {
    const SENTRY_DSN: &'static str = "SENTRY_DSN";
    const SENTRY_TRACING_EVENT_NAME: &'static str = "SENTRY_TRACING_EVENT_NAME";
    const SENTRY_USER_META_KEY: &'static str = "SENTRY_USER_META_KEY";
    const SENTRY_EXCLUDE_ERROR_CODES: &'static str = "SENTRY_EXCLUDE_ERROR_CODES";

    /// Build a configuration from the environment, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            dsn: str_not_empty(Self::SENTRY_DSN),
            tracing_event_name: str_not_empty(Self::SENTRY_TRACING_EVENT_NAME)
                .unwrap_or(default.tracing_event_name),
            options: default.options,
            user_meta_key: str_not_empty(Self::SENTRY_USER_META_KEY),
            exclude_error_codes: str_not_empty(Self::SENTRY_EXCLUDE_ERROR_CODES)
                .map(|raw| parse_exclude_codes(&raw))
                .unwrap_or_default(),
        }
    }
}

fn str_not_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

/// Parse a comma-separated exclusion list. Entries that parse as integers
/// become numeric codes, everything else stays a string code.
pub(crate) fn parse_exclude_codes(raw: &str) -> Vec<ErrorCode> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.parse::<i64>() {
            Ok(code) => ErrorCode::Number(code),
            Err(_) => ErrorCode::Text(entry.to_string()),
        })
        .collect()
}
