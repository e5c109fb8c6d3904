// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! JSON Patch construction for adding and removing finalizers.
//!
//! Removal addresses the finalizer by index, so a patch is only valid against
//! the list it was built from. Callers must build it from a fresh read and
//! apply it before anything else touches the object.

use crate::api::ObjectApi;
use crate::constants::FINALIZERS_PATH;
use crate::error::{ConvergeError, Operation, Result};
use json_patch::{AddOperation, Patch, PatchOperation, RemoveOperation};
use jsonptr::PointerBuf;
use kube::{Resource, ResourceExt};
use serde_json::Value;
use tracing::{debug, info, instrument};

/// Patch adding `name` to `current`. Empty when already present.
pub fn add_finalizer_patch(current: &[String], name: &str) -> Result<Vec<u8>> {
    if current.iter().any(|f| f == name) {
        return Ok(Vec::new());
    }

    let op = if current.is_empty() {
        AddOperation {
            path: PointerBuf::from_tokens(FINALIZERS_PATH),
            value: Value::Array(vec![Value::String(name.to_string())]),
        }
    } else {
        // append instead of replacing the list other controllers may be adding to
        AddOperation {
            path: PointerBuf::from_tokens(FINALIZERS_PATH.into_iter().chain(["-"])),
            value: Value::String(name.to_string()),
        }
    };

    serialize(vec![PatchOperation::Add(op)])
}

/// Patch removing `name` from `current` by position. Empty when absent.
pub fn remove_finalizer_patch(current: &[String], name: &str) -> Result<Vec<u8>> {
    let Some(index) = current.iter().position(|f| f == name) else {
        return Ok(Vec::new());
    };

    let index = index.to_string();
    let op = RemoveOperation {
        path: PointerBuf::from_tokens(FINALIZERS_PATH.into_iter().chain([index.as_str()])),
    };

    serialize(vec![PatchOperation::Remove(op)])
}

fn serialize(ops: Vec<PatchOperation>) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&Patch(ops))?)
}

/// Add `finalizer` to `obj` unless it is already there.
/// Returns the patched object, or `None` when no call was needed.
#[instrument(skip(api, obj), fields(kind = %K::kind(&()), name = %obj.name_any()))]
pub async fn ensure_finalizer<K, A>(api: &A, obj: &K, finalizer: &str) -> Result<Option<K>>
where
    K: Resource<DynamicType = ()> + Send + Sync + 'static,
    A: ObjectApi<K> + ?Sized,
{
    let patch = add_finalizer_patch(obj.finalizers(), finalizer)?;
    apply(api, obj, patch).await
}

/// Remove `finalizer` from `obj` if present.
/// `obj` must be the most recent read of the object.
#[instrument(skip(api, obj), fields(kind = %K::kind(&()), name = %obj.name_any()))]
pub async fn remove_finalizer<K, A>(api: &A, obj: &K, finalizer: &str) -> Result<Option<K>>
where
    K: Resource<DynamicType = ()> + Send + Sync + 'static,
    A: ObjectApi<K> + ?Sized,
{
    let patch = remove_finalizer_patch(obj.finalizers(), finalizer)?;
    apply(api, obj, patch).await
}

async fn apply<K, A>(api: &A, obj: &K, patch: Vec<u8>) -> Result<Option<K>>
where
    K: Resource<DynamicType = ()> + Send + Sync + 'static,
    A: ObjectApi<K> + ?Sized,
{
    let name = obj.name_any();
    if patch.is_empty() {
        debug!("Finalizers of {} already up to date", name);
        return Ok(None);
    }

    let patched = api
        .json_patch(&name, &patch)
        .await
        .map_err(|source| ConvergeError::Api {
            kind: K::kind(&()).to_string(),
            namespace: obj.namespace().unwrap_or_default(),
            name: name.clone(),
            operation: Operation::Patch,
            source,
        })?;

    info!("Patched finalizers of {}", name);
    Ok(Some(patched))
}
