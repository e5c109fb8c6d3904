// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Ownership-aware merging of labels and annotations.

use crate::config::OwnershipPolicy;
use kube::api::ObjectMeta;
use std::collections::BTreeMap;

type Map = BTreeMap<String, String>;

/// Labels and annotations of one object, as stored on `ObjectMeta`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataSet {
    pub labels: Option<Map>,
    pub annotations: Option<Map>,
}

impl MetadataSet {
    pub fn from_meta(meta: &ObjectMeta) -> Self {
        Self {
            labels: meta.labels.clone(),
            annotations: meta.annotations.clone(),
        }
    }

    /// Write the maps back onto `meta`.
    pub fn apply_to(self, meta: &mut ObjectMeta) {
        meta.labels = self.labels;
        meta.annotations = self.annotations;
    }
}

/// Merge desired metadata over live metadata under `policy`.
pub fn merge_metadata(desired: &MetadataSet, live: &MetadataSet, policy: &OwnershipPolicy) -> MetadataSet {
    MetadataSet {
        labels: merge_labels(desired.labels.as_ref(), live.labels.as_ref(), policy),
        annotations: merge_annotations(desired.annotations.as_ref(), live.annotations.as_ref(), policy),
    }
}

/// Desired labels win. Live-only labels survive unless the operator manages them.
pub fn merge_labels(desired: Option<&Map>, live: Option<&Map>, policy: &OwnershipPolicy) -> Option<Map> {
    let mut merged = desired.cloned().unwrap_or_default();

    for (key, value) in live.into_iter().flatten() {
        if !merged.contains_key(key) && !policy.managed.matches(key) {
            merged.insert(key.clone(), value.clone());
        }
    }

    finish(merged, desired)
}

/// Same as [`merge_labels`], and annotations matching
/// `policy.preserved_annotations` keep their live value whenever the live
/// object carries them.
pub fn merge_annotations(desired: Option<&Map>, live: Option<&Map>, policy: &OwnershipPolicy) -> Option<Map> {
    let mut merged = desired.cloned().unwrap_or_default();

    for (key, value) in live.into_iter().flatten() {
        let keep = policy.preserved_annotations.matches(key)
            || (!merged.contains_key(key) && !policy.managed.matches(key));
        if keep {
            merged.insert(key.clone(), value.clone());
        }
    }

    finish(merged, desired)
}

// An unset desired map that merges to nothing stays unset, so the submitted
// object does not flip `null` to `{}`.
fn finish(merged: Map, desired: Option<&Map>) -> Option<Map> {
    if merged.is_empty() && desired.is_none() {
        None
    } else {
        Some(merged)
    }
}

/// Merge labels/annotations of `live` into `desired` in place and carry over
/// the live resource version.
pub fn merge_object_meta(desired: &mut ObjectMeta, live: &ObjectMeta, policy: &OwnershipPolicy) {
    let merged = merge_metadata(&MetadataSet::from_meta(desired), &MetadataSet::from_meta(live), policy);
    merged.apply_to(desired);
    desired.resource_version = live.resource_version.clone();
}
