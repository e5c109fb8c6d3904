// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Services keep their server-assigned addressing across updates.

use super::Converge;
use k8s_openapi::api::core::v1::Service;

impl Converge for Service {
    const IMMUTABLE_FIELDS: &'static [&'static str] = &[
        "spec.clusterIP",
        "spec.clusterIPs",
        "spec.ipFamilies",
        "spec.ipFamilyPolicy",
    ];

    fn preserve_immutable_fields(&mut self, live: &Self) {
        if self.spec.is_none() && live.spec.is_none() {
            return;
        }

        let live_spec = live.spec.clone().unwrap_or_default();
        let spec = self.spec.get_or_insert_with(Default::default);
        spec.cluster_ip = live_spec.cluster_ip;
        spec.cluster_ips = live_spec.cluster_ips;
        spec.ip_families = live_spec.ip_families;
        spec.ip_family_policy = live_spec.ip_family_policy;
    }
}
