// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

use super::{merge_pod_template_meta, Converge};
use crate::config::OwnershipPolicy;
use k8s_openapi::api::apps::v1::DaemonSet;

impl Converge for DaemonSet {
    const IMMUTABLE_FIELDS: &'static [&'static str] = &["spec.selector"];

    fn preserve_immutable_fields(&mut self, live: &Self) {
        if let (Some(spec), Some(live_spec)) = (self.spec.as_mut(), live.spec.as_ref()) {
            spec.selector = live_spec.selector.clone();
        }
    }

    fn merge_pod_template(&mut self, live: &Self, policy: &OwnershipPolicy) {
        if let (Some(spec), Some(live_spec)) = (self.spec.as_mut(), live.spec.as_ref()) {
            merge_pod_template_meta(&mut spec.template, &live_spec.template, policy);
        }
    }
}
