// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Deterministic, collision-resistant DNS-1123 label generation.

use crate::constants::dns::{HASH_LENGTH, LABEL_MAX_LENGTH};
use crate::error::{ConvergeError, Result};
use regex::Regex;
use std::sync::LazyLock;
use xxhash_rust::xxh64::xxh64;

static INVALID_DNS1123_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9-]+").expect("static regex is valid"));

static DNS1123_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("static regex is valid")
});

/// Derives object names from free text, optionally under a fixed prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceNamer {
    prefix: String,
}

impl ResourceNamer {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Sanitize `name` into a DNS-1123 label, truncated to 63 characters.
    /// Distinct inputs may produce the same label.
    pub fn dns1123_label(&self, name: &str) -> Result<String> {
        let sanitized = self.sanitize(name)?;
        Ok(truncate(&sanitized, LABEL_MAX_LENGTH).to_string())
    }

    /// Sanitize `name` into a DNS-1123 label that ends with a hash of the
    /// raw name, so inputs sharing a truncated form still differ.
    ///
    /// The hash covers the unprefixed, unsanitized input: `"NAME"` becomes
    /// `name-4cfd3574` and, with prefix `with-prefix`, `"name"` becomes
    /// `with-prefix-name-6c5f7b2e`.
    pub fn unique_dns1123_label(&self, name: &str) -> Result<String> {
        let sanitized = self.sanitize(name)?;
        let hash = format!("{:016x}", xxh64(name.as_bytes(), 0));
        // room for the separator plus the hash
        let head = truncate(&sanitized, LABEL_MAX_LENGTH - HASH_LENGTH - 1);

        Ok(format!("{}-{}", head, &hash[..HASH_LENGTH]))
    }

    fn sanitize(&self, name: &str) -> Result<String> {
        let full = if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}-{}", self.prefix.trim_end_matches('-'), name)
        };

        let lowered = full.to_lowercase();
        let replaced = INVALID_DNS1123_CHARS.replace_all(&lowered, "-");
        let trimmed = replaced.trim_matches('-');

        if trimmed.is_empty() {
            return Err(ConvergeError::InvalidInput(format!(
                "cannot derive a DNS-1123 label from prefix {:?} and name {:?}",
                self.prefix, name
            )));
        }

        Ok(trimmed.to_string())
    }
}

/// Cut to `max` characters from the right, dropping any hyphen left dangling.
/// The input is ASCII after sanitizing, so byte slicing is safe.
fn truncate(s: &str, max: usize) -> &str {
    s[..s.len().min(max)].trim_end_matches('-')
}

/// Free-function form of [`ResourceNamer::unique_dns1123_label`].
pub fn unique_label(prefix: &str, raw_name: &str) -> Result<String> {
    ResourceNamer::new(prefix).unique_dns1123_label(raw_name)
}

/// Check that `s` is a valid DNS-1123 label.
pub fn is_dns1123_label(s: &str) -> bool {
    s.len() <= LABEL_MAX_LENGTH && DNS1123_LABEL.is_match(s)
}
