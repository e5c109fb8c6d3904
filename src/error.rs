// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::fmt;
use thiserror::Error;

/// The API call that failed, recorded on [`ConvergeError::Api`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Get,
    Create,
    Replace,
    Patch,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Replace => "replace",
            Operation::Patch => "patch",
        };
        f.write_str(op)
    }
}

#[derive(Error, Debug)]
pub enum ConvergeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Kubernetes API error during {operation} of {kind} {namespace}/{name}: {source}")]
    Api {
        kind: String,
        namespace: String,
        name: String,
        operation: Operation,
        #[source]
        source: kube::Error,
    },

    #[error("Conflict updating {kind} {namespace}/{name}: resource version {resource_version} is stale")]
    Conflict {
        kind: String,
        namespace: String,
        name: String,
        resource_version: String,
    },

    #[error("Service {namespace}/{name} not found")]
    NotFound { namespace: String, name: String },

    #[error("Service {name} was requested in namespace {expected} but lives in {actual}")]
    CrossNamespace {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("Service {namespace}/{name} does not select the required labels: {}", .mismatched.join(", "))]
    SelectorMismatch {
        namespace: String,
        name: String,
        mismatched: Vec<String>,
    },

    #[error("Failed to serialize patch: {0}")]
    PatchSerialization(#[from] serde_json::Error),
}

impl ConvergeError {
    /// True when the failure is an optimistic-concurrency conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, ConvergeError::Conflict { .. })
    }

    /// True when re-fetching the object and trying again may succeed:
    /// conflicts, throttling, server errors and transport failures.
    pub fn is_retryable(&self) -> bool {
        match self {
            ConvergeError::Conflict { .. } => true,
            ConvergeError::Api {
                source: kube::Error::Api(resp),
                ..
            } => matches!(resp.code, 409 | 429) || resp.code >= 500,
            ConvergeError::Api {
                source: kube::Error::HyperError(_) | kube::Error::Service(_),
                ..
            } => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvergeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use kube::core::ErrorResponse;

    fn api_error(code: u16) -> ConvergeError {
        ConvergeError::Api {
            kind: "Service".to_string(),
            namespace: "default".to_string(),
            name: "web".to_string(),
            operation: Operation::Replace,
            source: kube::Error::Api(ErrorResponse {
                status: "Failure".to_string(),
                message: "boom".to_string(),
                reason: "InternalError".to_string(),
                code,
            }),
        }
    }

    #[test]
    fn test_conflict_is_retryable() {
        let err = ConvergeError::Conflict {
            kind: "Service".to_string(),
            namespace: "default".to_string(),
            name: "web".to_string(),
            resource_version: "42".to_string(),
        };
        assert!(err.is_conflict());
        assert!(err.is_retryable());
    }

    #[test]
    fn test_server_errors_are_retryable() {
        assert!(api_error(500).is_retryable());
        assert!(api_error(429).is_retryable());
        assert!(!api_error(422).is_retryable());
        assert!(!api_error(500).is_conflict());
    }

    #[test]
    fn test_only_transport_failures_are_retryable() {
        let with_source = |source: kube::Error| ConvergeError::Api {
            kind: "Service".to_string(),
            namespace: "default".to_string(),
            name: "web".to_string(),
            operation: Operation::Get,
            source,
        };

        assert!(with_source(kube::Error::Service("connection reset".into())).is_retryable());

        let decode = serde_json::from_str::<u32>("not a number").unwrap_err();
        assert!(!with_source(kube::Error::SerdeError(decode)).is_retryable());
    }

    #[test]
    fn test_validation_errors_are_terminal() {
        let err = ConvergeError::SelectorMismatch {
            namespace: "ns".to_string(),
            name: "svc".to_string(),
            mismatched: vec!["app".to_string()],
        };
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("app"));
    }

    #[test]
    fn test_api_error_display_carries_context() {
        let msg = api_error(500).to_string();
        assert!(msg.contains("replace"));
        assert!(msg.contains("Service default/web"));
    }
}
