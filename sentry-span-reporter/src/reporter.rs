// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::config::ReporterConfig;
use crate::exclude::is_excluded;
use crate::metric::MetricRecord;
use crate::report::build_report;
use anyhow::Context;
use sentry::{Client, Hub};
use std::sync::Arc;
use tracing::{debug, trace};

type ShouldReport = dyn Fn(&MetricRecord) -> bool + Send + Sync;

/// Receives tracing event batches from the host runtime and forwards failed
/// spans to Sentry.
///
/// The reporter owns its hub handle; no ambient/global hub is touched. The
/// client is initialized at most once, at construction, and only when a DSN
/// is configured. Without a DSN every batch is a silent no-op.
pub struct SpanReporter {
    config: ReporterConfig,
    hub: Arc<Hub>,
    should_report: Option<Box<ShouldReport>>,
}

impl SpanReporter {
    /// Create a reporter from the given configuration.
    ///
    /// Fails only on a malformed DSN; an absent DSN is a valid, expected
    /// configuration that leaves the reporter permanently not ready.
    pub fn new(config: ReporterConfig) -> anyhow::Result<Self> {
        let client = match &config.dsn {
            Some(dsn) => {
                let mut options = config.options.clone();
                options.dsn = Some(
                    dsn.parse()
                        .with_context(|| format!("invalid Sentry DSN: {dsn}"))?,
                );
                debug!("initializing Sentry client for span error reporting");
                // apply_defaults wires up the default transport and
                // integrations the same way sentry::init would.
                Some(Arc::new(Client::from_config(sentry::apply_defaults(
                    options,
                ))))
            }
            None => {
                debug!("no Sentry DSN configured, span error reporting is disabled");
                None
            }
        };
        let hub = Arc::new(Hub::new(client, Arc::new(Default::default())));
        Ok(Self {
            config,
            hub,
            should_report: None,
        })
    }

    /// Install a caller-supplied reporting policy. An otherwise-eligible
    /// error is reported only when the predicate returns `true`.
    pub fn with_should_report<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&MetricRecord) -> bool + Send + Sync + 'static,
    {
        self.should_report = Some(Box::new(predicate));
        self
    }

    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// The underlying hub handle, for composition with other integrations.
    pub fn hub(&self) -> Arc<Hub> {
        Arc::clone(&self.hub)
    }

    /// Whether the backend connection was initialized with a DSN.
    pub fn is_ready(&self) -> bool {
        self.hub.client().is_some()
    }

    /// Event handler entry point. Only the configured tracing event name is
    /// processed; every other event name is ignored outright.
    pub fn handle_event(&self, event_name: &str, batch: &[MetricRecord]) {
        if event_name != self.config.tracing_event_name {
            return;
        }
        self.on_tracing_event(batch);
    }

    /// Evaluate one batch of metric records, in order.
    pub fn on_tracing_event(&self, batch: &[MetricRecord]) {
        for metric in batch {
            if metric.error.is_none() {
                continue;
            }
            if !self.is_ready() {
                continue;
            }
            if is_excluded(metric.error.as_ref(), &self.config.exclude_error_codes) {
                debug!("span error suppressed by exclusion list");
                continue;
            }
            if let Some(should_report) = &self.should_report {
                if !should_report(metric) {
                    debug!("span error suppressed by reporting policy");
                    continue;
                }
            }
            self.send_report(metric);
        }
    }

    fn send_report(&self, metric: &MetricRecord) {
        if let Some(event) = build_report(metric, self.config.user_meta_key.as_deref()) {
            let event_id = self.hub.capture_event(event);
            trace!("captured span error event {event_id}");
        }
    }

    /// Flush pending submissions. Returns `true` once everything queued has
    /// been handed to the transport, or immediately when not ready.
    pub fn flush(&self) -> bool {
        match self.hub.client() {
            Some(client) => client.flush(None),
            None => true,
        }
    }

    /// Flush pending submissions and close the connection. No-op when the
    /// client was never initialized.
    pub fn shutdown(&self) {
        let Some(client) = self.hub.client() else {
            return;
        };
        if !client.flush(None) {
            debug!("Sentry flush timed out during shutdown");
        }
        client.close(None);
    }
}
