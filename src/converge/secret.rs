// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

use super::Converge;
use k8s_openapi::api::core::v1::Secret;

impl Converge for Secret {
    /// The API server rejects any change of a Secret's type.
    const IMMUTABLE_FIELDS: &'static [&'static str] = &["type"];

    fn preserve_immutable_fields(&mut self, live: &Self) {
        self.type_ = live.type_.clone();
    }
}
