// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

use super::{merge_pod_template_meta, Converge};
use crate::config::OwnershipPolicy;
use k8s_openapi::api::apps::v1::StatefulSet;

impl Converge for StatefulSet {
    const IMMUTABLE_FIELDS: &'static [&'static str] = &["spec.persistentVolumeClaimRetentionPolicy"];

    /// Changing the retention policy of a running set would change what
    /// happens to its volumes on scale-down, so the live one is kept.
    fn preserve_immutable_fields(&mut self, live: &Self) {
        let live_policy = live
            .spec
            .as_ref()
            .and_then(|s| s.persistent_volume_claim_retention_policy.clone());

        if let Some(spec) = self.spec.as_mut() {
            spec.persistent_volume_claim_retention_policy = live_policy;
        }
    }

    fn merge_pod_template(&mut self, live: &Self, policy: &OwnershipPolicy) {
        if let (Some(spec), Some(live_spec)) = (self.spec.as_mut(), live.spec.as_ref()) {
            merge_pod_template_meta(&mut spec.template, &live_spec.template, policy);
        }
    }
}
