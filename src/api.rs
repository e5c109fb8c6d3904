// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The namespaced get/create/replace/patch capability the converger drives.

use async_trait::async_trait;
use kube::{
    api::{Patch, PatchParams, PostParams},
    Api, Resource,
};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

/// Access to objects of kind `K` in a single namespace, keyed by name.
#[async_trait]
pub trait ObjectApi<K>: Send + Sync
where
    K: Send + Sync + 'static,
{
    /// Fetch an object, `Ok(None)` when it does not exist.
    async fn get_opt(&self, name: &str) -> kube::Result<Option<K>>;

    async fn create(&self, obj: &K) -> kube::Result<K>;

    /// Replace an object; the server rejects stale `metadata.resourceVersion`s with 409.
    async fn replace(&self, name: &str, obj: &K) -> kube::Result<K>;

    /// Apply a serialized JSON Patch document.
    async fn json_patch(&self, name: &str, patch: &[u8]) -> kube::Result<K>;
}

#[async_trait]
impl<K> ObjectApi<K> for Api<K>
where
    K: Resource + Clone + Serialize + DeserializeOwned + Debug + Send + Sync + 'static,
{
    async fn get_opt(&self, name: &str) -> kube::Result<Option<K>> {
        Api::get_opt(self, name).await
    }

    async fn create(&self, obj: &K) -> kube::Result<K> {
        Api::create(self, &PostParams::default(), obj).await
    }

    async fn replace(&self, name: &str, obj: &K) -> kube::Result<K> {
        Api::replace(self, name, &PostParams::default(), obj).await
    }

    async fn json_patch(&self, name: &str, patch: &[u8]) -> kube::Result<K> {
        let ops = serde_json::from_slice(patch).map_err(kube::Error::SerdeError)?;
        self.patch(name, &PatchParams::default(), &Patch::Json::<()>(ops))
            .await
    }
}
