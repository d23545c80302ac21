use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;

use crate::{helpers::RequireMetadata, resources::crd::v1beta1::http_trigger::HttpTrigger};

use super::{StoreError, TriggerStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Get { namespace: String, name: String },
    Create { namespace: String, name: String },
    Update { namespace: String, name: String },
    Delete { namespace: String, name: String },
}

impl StoreCall {
    pub fn is_write(&self) -> bool {
        !matches!(self, StoreCall::Get { .. })
    }
}

#[derive(Default)]
struct MemoryState {
    triggers: BTreeMap<(String, String), HttpTrigger>,
    last_version: u64,
    calls: Vec<StoreCall>,
    injected_failure: Option<StoreError>,
}

impl MemoryState {
    fn next_version(&mut self) -> String {
        self.last_version += 1;
        self.last_version.to_string()
    }
}

/// In-process trigger store behaving like the api server where it matters
/// to the reconciler: versions are reassigned on every write and updates
/// carrying a stale version are rejected. Every call is recorded.
#[derive(Default)]
pub struct MemoryTriggerStore {
    state: Mutex<MemoryState>,
}

impl MemoryTriggerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store, triggers without a resource version get one assigned.
    pub fn with_triggers(triggers: impl IntoIterator<Item = HttpTrigger>) -> Self {
        let store = Self::default();
        {
            let mut state = store.lock();
            for mut trigger in triggers {
                let key = (
                    trigger.metadata.namespace.clone().unwrap_or_default(),
                    trigger.metadata.name.clone().unwrap_or_default(),
                );
                if trigger.metadata.resource_version.is_none() {
                    trigger.metadata.resource_version = Some(state.next_version());
                }
                state.triggers.insert(key, trigger);
            }
        }

        store
    }

    /// Makes the next call fail with `error`, whatever its kind.
    pub fn fail_next(&self, error: StoreError) {
        self.lock().injected_failure = Some(error);
    }

    pub fn triggers(&self, namespace: &str) -> Vec<HttpTrigger> {
        self.lock()
            .triggers
            .iter()
            .filter(|((ns, _), _)| ns == namespace)
            .map(|(_, trigger)| trigger.clone())
            .collect()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    pub fn writes(&self) -> Vec<StoreCall> {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.is_write())
            .cloned()
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, call: StoreCall) -> Result<MutexGuard<'_, MemoryState>, StoreError> {
        let mut state = self.lock();
        state.calls.push(call);

        let failure = state.injected_failure.take();
        match failure {
            Some(error) => Err(error),
            None => Ok(state),
        }
    }
}

fn trigger_key(trigger: &HttpTrigger) -> Result<(String, String), StoreError> {
    Ok((
        trigger
            .require_namespace_or(StoreError::MissingObjectMetadata)?
            .to_owned(),
        trigger.require_name_or(StoreError::MissingObjectMetadata)?.to_owned(),
    ))
}

#[async_trait]
impl TriggerStore for MemoryTriggerStore {
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<HttpTrigger>, StoreError> {
        let state = self.begin(StoreCall::Get {
            namespace: namespace.to_owned(),
            name: name.to_owned(),
        })?;

        Ok(state
            .triggers
            .get(&(namespace.to_owned(), name.to_owned()))
            .cloned())
    }

    async fn create(&self, trigger: &HttpTrigger) -> Result<HttpTrigger, StoreError> {
        let (namespace, name) = trigger_key(trigger)?;
        let mut state = self.begin(StoreCall::Create {
            namespace: namespace.clone(),
            name: name.clone(),
        })?;

        let key = (namespace, name);
        if state.triggers.contains_key(&key) {
            return Err(StoreError::AlreadyExists);
        }

        let mut created = trigger.clone();
        created.metadata.resource_version = Some(state.next_version());
        created.metadata.deletion_timestamp = None;
        state.triggers.insert(key, created.clone());

        Ok(created)
    }

    async fn update(&self, trigger: &HttpTrigger) -> Result<HttpTrigger, StoreError> {
        let (namespace, name) = trigger_key(trigger)?;
        let mut state = self.begin(StoreCall::Update {
            namespace: namespace.clone(),
            name: name.clone(),
        })?;

        let key = (namespace, name);
        let stored = state.triggers.get(&key).ok_or(StoreError::NotFound)?;
        if stored.metadata.resource_version != trigger.metadata.resource_version {
            return Err(StoreError::Conflict);
        }

        let mut updated = trigger.clone();
        updated.metadata.deletion_timestamp = stored.metadata.deletion_timestamp.clone();
        updated.metadata.resource_version = Some(state.next_version());
        state.triggers.insert(key, updated.clone());

        Ok(updated)
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<(), StoreError> {
        let mut state = self.begin(StoreCall::Delete {
            namespace: namespace.to_owned(),
            name: name.to_owned(),
        })?;

        state
            .triggers
            .remove(&(namespace.to_owned(), name.to_owned()))
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}
