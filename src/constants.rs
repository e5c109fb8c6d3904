// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Annotation prefixes owned by actors outside the operator
pub mod annotations {
    /// Written by `kubectl rollout restart` and friends; never overwritten by reconciliation
    pub const KUBECTL_PREFIX: &str = "kubectl.kubernetes.io/";
}

/// DNS label limits (RFC 1123)
pub mod dns {
    /// Maximum length of a DNS-1123 label
    pub const LABEL_MAX_LENGTH: usize = 63;
    /// Number of hex characters taken from the name hash
    pub const HASH_LENGTH: usize = 8;
}

/// JSON pointer of the finalizer list on any object
pub const FINALIZERS_PATH: [&str; 2] = ["metadata", "finalizers"];
