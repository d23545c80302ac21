use async_trait::async_trait;
use thiserror::Error;

use crate::resources::crd::v1beta1::http_trigger::HttpTrigger;

pub mod cluster;
pub mod memory;

pub use self::{cluster::KubeTriggerStore, memory::MemoryTriggerStore};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Trigger doesn't exist!")]
    NotFound,
    #[error("Trigger already exists!")]
    AlreadyExists,
    #[error("Trigger was modified by another writer!")]
    Conflict,
    #[error("Trigger is missing metadata!")]
    MissingObjectMetadata,
    #[error("Kubernetes api call failed! Reason: {}", .0)]
    Api(kube::Error),
}

impl StoreError {
    /// Whether repeating the same call later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Conflict | StoreError::Api(_))
    }
}

/// CRUD over namespaced trigger records, keyed by name.
///
/// `NotFound` is a regular outcome here, `get` reports it as `None` and
/// `delete` as [`StoreError::NotFound`] so callers branch on it explicitly.
#[async_trait]
pub trait TriggerStore: Send + Sync {
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<HttpTrigger>, StoreError>;

    async fn create(&self, trigger: &HttpTrigger) -> Result<HttpTrigger, StoreError>;

    /// Fails with [`StoreError::Conflict`] when `trigger` carries a stale
    /// resource version.
    async fn update(&self, trigger: &HttpTrigger) -> Result<HttpTrigger, StoreError>;

    async fn delete(&self, namespace: &str, name: &str) -> Result<(), StoreError>;
}
