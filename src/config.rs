// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Ownership policy configuration for metadata merging.

use crate::constants::annotations::KUBECTL_PREFIX;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Predicate over label and annotation keys.
#[derive(Clone)]
pub enum KeyMatcher {
    Nothing,
    Everything,
    Prefixes(Vec<String>),
    Keys(BTreeSet<String>),
    Custom(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl KeyMatcher {
    pub fn prefix(prefix: impl Into<String>) -> Self {
        KeyMatcher::Prefixes(vec![prefix.into()])
    }

    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        KeyMatcher::Keys(keys.into_iter().map(Into::into).collect())
    }

    pub fn custom(f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        KeyMatcher::Custom(Arc::new(f))
    }

    pub fn matches(&self, key: &str) -> bool {
        match self {
            KeyMatcher::Nothing => false,
            KeyMatcher::Everything => true,
            KeyMatcher::Prefixes(prefixes) => prefixes.iter().any(|p| key.starts_with(p.as_str())),
            KeyMatcher::Keys(keys) => keys.contains(key),
            KeyMatcher::Custom(f) => f(key),
        }
    }
}

impl fmt::Debug for KeyMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMatcher::Nothing => f.write_str("Nothing"),
            KeyMatcher::Everything => f.write_str("Everything"),
            KeyMatcher::Prefixes(p) => f.debug_tuple("Prefixes").field(p).finish(),
            KeyMatcher::Keys(k) => f.debug_tuple("Keys").field(k).finish(),
            KeyMatcher::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Which keys the operator owns on a metadata map.
///
/// Keys matched by `managed` are authoritative from the desired object: when
/// the desired object drops them they are removed from the live one. Every
/// other live-only key is foreign and carried over untouched. Annotations
/// matched by `preserved_annotations` always keep their live value, whatever
/// the desired object says.
#[derive(Debug, Clone)]
pub struct OwnershipPolicy {
    pub managed: KeyMatcher,
    pub preserved_annotations: KeyMatcher,
}

impl OwnershipPolicy {
    pub fn new(managed: KeyMatcher, preserved_annotations: KeyMatcher) -> Self {
        Self {
            managed,
            preserved_annotations,
        }
    }

    /// Policy for top-level object metadata: foreign keys are kept.
    pub fn object_metadata() -> Self {
        Self::new(KeyMatcher::Nothing, KeyMatcher::prefix(KUBECTL_PREFIX))
    }

    /// Policy for pod templates: the operator owns the whole template
    /// metadata except for kubectl annotations.
    pub fn pod_template() -> Self {
        Self::new(KeyMatcher::Everything, KeyMatcher::prefix(KUBECTL_PREFIX))
    }
}

/// Configuration threaded into the [`ResourceConverger`](crate::converge::ResourceConverger).
#[derive(Debug, Clone)]
pub struct ConvergeConfig {
    /// Applied to `metadata.labels` and `metadata.annotations`
    pub metadata: OwnershipPolicy,
    /// Applied to `spec.template.metadata` of workloads
    pub pod_template: OwnershipPolicy,
}

impl Default for ConvergeConfig {
    fn default() -> Self {
        Self {
            metadata: OwnershipPolicy::object_metadata(),
            pod_template: OwnershipPolicy::pod_template(),
        }
    }
}
