// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod api;
pub mod config;
pub mod constants;
pub mod converge;
pub mod error;
pub mod finalizers;
pub mod governing;
pub mod metadata;
pub mod naming;

#[cfg(test)]
mod test_utils;

pub use api::ObjectApi;
pub use config::{ConvergeConfig, KeyMatcher, OwnershipPolicy};
pub use converge::{Converge, ResourceConverger, ResourceIdentity};
pub use error::{ConvergeError, Result};
pub use finalizers::{add_finalizer_patch, ensure_finalizer, remove_finalizer, remove_finalizer_patch};
pub use governing::ensure_governing_service;
pub use metadata::{merge_metadata, MetadataSet};
pub use naming::{unique_label, ResourceNamer};
