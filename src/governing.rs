// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Validation of user-supplied governing Services.

use crate::api::ObjectApi;
use crate::error::{ConvergeError, Operation, Result};
use k8s_openapi::api::core::v1::Service;
use kube::ResourceExt;
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

/// Check that `service_name` exists in `namespace` and that its selector
/// matches every pair in `selector_labels`. Extra selector keys are fine.
///
/// `api` must be scoped to `namespace`. Read-only.
#[instrument(skip(api, selector_labels))]
pub async fn ensure_governing_service<A>(
    api: &A,
    namespace: &str,
    service_name: &str,
    selector_labels: &BTreeMap<String, String>,
) -> Result<()>
where
    A: ObjectApi<Service> + ?Sized,
{
    if namespace.is_empty() || service_name.is_empty() {
        return Err(ConvergeError::InvalidInput(
            "governing service requires a namespace and a name".to_string(),
        ));
    }

    let service = api
        .get_opt(service_name)
        .await
        .map_err(|source| ConvergeError::Api {
            kind: "Service".to_string(),
            namespace: namespace.to_string(),
            name: service_name.to_string(),
            operation: Operation::Get,
            source,
        })?
        .ok_or_else(|| ConvergeError::NotFound {
            namespace: namespace.to_string(),
            name: service_name.to_string(),
        })?;

    let actual = service.namespace().unwrap_or_default();
    if actual != namespace {
        warn!(
            "Governing service {} found in namespace {:?}, expected {}",
            service_name, actual, namespace
        );
        return Err(ConvergeError::CrossNamespace {
            name: service_name.to_string(),
            expected: namespace.to_string(),
            actual,
        });
    }

    let mismatched = mismatched_selector_keys(&service, selector_labels);
    if !mismatched.is_empty() {
        return Err(ConvergeError::SelectorMismatch {
            namespace: namespace.to_string(),
            name: service_name.to_string(),
            mismatched,
        });
    }

    debug!("Governing service {}/{} selects the expected pods", namespace, service_name);
    Ok(())
}

/// Required keys the service selector lacks or maps to a different value.
fn mismatched_selector_keys(service: &Service, required: &BTreeMap<String, String>) -> Vec<String> {
    let selector = service.spec.as_ref().and_then(|s| s.selector.as_ref());

    required
        .iter()
        .filter(|(key, value)| selector.and_then(|s| s.get(*key)) != Some(*value))
        .map(|(key, _)| key.clone())
        .collect()
}
