// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::metric::StackField;

/// Normalize a stack representation into its canonical sequence form.
///
/// An absent stack, or a bare empty string, cannot be reported as a trace and
/// normalizes to `None`. A non-empty string wraps into a one-element sequence.
/// A sequence passes through unchanged, empty or not.
pub fn normalize_stack(stack: Option<&StackField>) -> Option<Vec<String>> {
    match stack {
        None => None,
        Some(StackField::Raw(raw)) if raw.is_empty() => None,
        Some(StackField::Raw(raw)) => Some(vec![raw.clone()]),
        Some(StackField::Frames(frames)) => Some(frames.clone()),
    }
}
