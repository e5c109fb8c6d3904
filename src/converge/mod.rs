// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Create-or-update of managed objects.
//!
//! Every kind runs the same state machine: read the live object, create the
//! desired one if it is missing, otherwise merge metadata, restore the
//! kind's immutable fields from the live object and replace it under the
//! live resource version. One read and at most one write per call.

pub mod daemonset;
pub mod endpoints;
pub mod secret;
pub mod service;
pub mod statefulset;

use crate::api::ObjectApi;
use crate::config::{ConvergeConfig, OwnershipPolicy};
use crate::error::{ConvergeError, Operation, Result};
use crate::metadata::{merge_metadata, merge_object_meta, MetadataSet};
use k8s_openapi::api::apps::v1::{DaemonSet, StatefulSet};
use k8s_openapi::api::core::v1::{Endpoints, PodTemplateSpec, Secret, Service};
use kube::{Resource, ResourceExt};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::fmt::Debug;
use tracing::{debug, field::Empty, info, instrument};

/// A kind the converger knows how to update safely.
pub trait Converge:
    Resource<DynamicType = ()> + Clone + Serialize + DeserializeOwned + Debug + Send + Sync + 'static
{
    /// Paths whose live value survives every update.
    const IMMUTABLE_FIELDS: &'static [&'static str];

    /// Overwrite [`Self::IMMUTABLE_FIELDS`] with the values from `live`.
    fn preserve_immutable_fields(&mut self, live: &Self);

    /// Merge pod template metadata with the live object, for workloads.
    fn merge_pod_template(&mut self, _live: &Self, _policy: &OwnershipPolicy) {}
}

/// Namespace, name and kind of a managed object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceIdentity {
    pub namespace: String,
    pub name: String,
    pub kind: String,
}

impl ResourceIdentity {
    pub fn of<K: Resource<DynamicType = ()>>(obj: &K) -> Result<Self> {
        let kind = K::kind(&()).to_string();
        let name = match obj.meta().name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                return Err(ConvergeError::InvalidInput(format!(
                    "desired {} has no name",
                    kind
                )))
            }
        };

        Ok(Self {
            namespace: obj.namespace().unwrap_or_default(),
            name,
            kind,
        })
    }

    fn api_error(&self, operation: Operation, source: kube::Error) -> ConvergeError {
        ConvergeError::Api {
            kind: self.kind.clone(),
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            operation,
            source,
        }
    }
}

impl fmt::Display for ResourceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.kind, self.namespace, self.name)
    }
}

/// Drives create-or-update for the managed kinds. Holds no state besides
/// its configuration, so one instance can be shared across workers.
#[derive(Debug, Clone, Default)]
pub struct ResourceConverger {
    config: ConvergeConfig,
}

impl ResourceConverger {
    pub fn new(config: ConvergeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConvergeConfig {
        &self.config
    }

    /// The object submitted when `desired` replaces `live`.
    pub fn prepare_update<K: Converge>(&self, desired: &K, live: &K) -> K {
        let mut obj = desired.clone();
        merge_object_meta(obj.meta_mut(), live.meta(), &self.config.metadata);
        obj.merge_pod_template(live, &self.config.pod_template);
        obj.preserve_immutable_fields(live);
        obj
    }

    /// Create `desired` or update the live object towards it.
    ///
    /// A stale resource version on update is returned as
    /// [`ConvergeError::Conflict`]; re-fetching and retrying is up to the caller.
    #[instrument(skip(self, api, desired), fields(kind = %K::kind(&()), namespace = Empty, name = Empty))]
    pub async fn create_or_update<K, A>(&self, api: &A, desired: &K) -> Result<K>
    where
        K: Converge,
        A: ObjectApi<K> + ?Sized,
    {
        let id = ResourceIdentity::of(desired)?;
        let span = tracing::Span::current();
        span.record("namespace", id.namespace.as_str());
        span.record("name", id.name.as_str());

        let live = api
            .get_opt(&id.name)
            .await
            .map_err(|e| id.api_error(Operation::Get, e))?;

        let Some(live) = live else {
            info!("Creating {}", id);
            return api
                .create(desired)
                .await
                .map_err(|e| id.api_error(Operation::Create, e));
        };

        let obj = self.prepare_update(desired, &live);
        let resource_version = live.resource_version().unwrap_or_default();
        debug!(
            "Updating {} at resource version {}, keeping {:?} from the live object",
            id,
            resource_version,
            K::IMMUTABLE_FIELDS
        );

        let updated = api.replace(&id.name, &obj).await.map_err(|e| match e {
            kube::Error::Api(resp) if resp.code == 409 => ConvergeError::Conflict {
                kind: id.kind.clone(),
                namespace: id.namespace.clone(),
                name: id.name.clone(),
                resource_version: resource_version.clone(),
            },
            e => id.api_error(Operation::Replace, e),
        })?;

        info!("Updated {}", id);
        Ok(updated)
    }

    pub async fn create_or_update_service<A>(&self, api: &A, desired: &Service) -> Result<Service>
    where
        A: ObjectApi<Service> + ?Sized,
    {
        self.create_or_update(api, desired).await
    }

    pub async fn create_or_update_endpoints<A>(&self, api: &A, desired: &Endpoints) -> Result<Endpoints>
    where
        A: ObjectApi<Endpoints> + ?Sized,
    {
        self.create_or_update(api, desired).await
    }

    pub async fn create_or_update_statefulset<A>(&self, api: &A, desired: &StatefulSet) -> Result<StatefulSet>
    where
        A: ObjectApi<StatefulSet> + ?Sized,
    {
        self.create_or_update(api, desired).await
    }

    pub async fn create_or_update_secret<A>(&self, api: &A, desired: &Secret) -> Result<Secret>
    where
        A: ObjectApi<Secret> + ?Sized,
    {
        self.create_or_update(api, desired).await
    }

    pub async fn create_or_update_daemonset<A>(&self, api: &A, desired: &DaemonSet) -> Result<DaemonSet>
    where
        A: ObjectApi<DaemonSet> + ?Sized,
    {
        self.create_or_update(api, desired).await
    }
}

/// Merge pod template labels and annotations of `live` into `desired`.
pub(crate) fn merge_pod_template_meta(
    desired: &mut PodTemplateSpec,
    live: &PodTemplateSpec,
    policy: &OwnershipPolicy,
) {
    let desired_set = desired.metadata.as_ref().map(MetadataSet::from_meta).unwrap_or_default();
    let live_set = live.metadata.as_ref().map(MetadataSet::from_meta).unwrap_or_default();

    let merged = merge_metadata(&desired_set, &live_set, policy);
    if desired.metadata.is_none() && merged == MetadataSet::default() {
        return;
    }
    merged.apply_to(desired.metadata.get_or_insert_with(Default::default));
}
