use log::{debug, info};

use crate::{
    helpers::RequireMetadata,
    resources::{crd::v1beta1::function::Function, intent::TriggerIntent},
    store::{StoreError, TriggerStore},
    trigger::{
        comparator::trigger_changed,
        desired::{build_trigger, merge_trigger},
    },
};

use self::error::ReconcilerError;

pub mod error;

pub const DEFAULT_LOG_TARGET: &str = "http_trigger::reconciler";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// delete event for a function that had no trigger
    Absent,
    Created,
    Updated,
    /// the existing trigger already matched
    Unchanged,
    Deleted,
}

/// Keeps the trigger of each function in line with the function's
/// routing intent.
///
/// Every call performs at most one read and one write against the store and
/// is safe to repeat with the same input. Store errors are returned as-is
/// and never retried here, except for the `AlreadyExists` race on create and
/// the `NotFound` race on delete which both mean the goal was reached.
pub struct FunctionReconciler<S> {
    store: S,
    log_target: &'static str,
}

impl<S: TriggerStore> FunctionReconciler<S> {
    pub fn new(store: S) -> Self {
        Self::with_log_target(store, DEFAULT_LOG_TARGET)
    }

    pub fn with_log_target(store: S, log_target: &'static str) -> Self {
        Self { store, log_target }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn reconcile(
        &self,
        function: &Function,
        intent: &TriggerIntent,
        is_delete: bool,
    ) -> Result<ReconcileOutcome, ReconcilerError> {
        let namespace = function.require_namespace_or(ReconcilerError::MissingObjectMetadata)?;
        let name = function.require_name_or(ReconcilerError::MissingObjectMetadata)?;

        let existing = self
            .store
            .get(namespace, name)
            .await
            .map_err(ReconcilerError::Store)?;

        match (existing, is_delete) {
            (None, true) => {
                debug!(target: self.log_target, "Trigger '{name}' in '{namespace}' is already gone");
                Ok(ReconcileOutcome::Absent)
            }
            (None, false) => self.create_trigger(namespace, name, intent).await,
            (Some(_), true) => self.delete_trigger(namespace, name).await,
            (Some(existing), false) => {
                let desired = merge_trigger(&existing, name, intent);

                if !trigger_changed(&existing, &desired) {
                    debug!(target: self.log_target, "Trigger '{name}' in '{namespace}' is up to date");
                    return Ok(ReconcileOutcome::Unchanged);
                }

                info!(target: self.log_target, "Updating trigger '{name}' in '{namespace}'...");
                self.store
                    .update(&desired)
                    .await
                    .map_err(ReconcilerError::Store)?;

                Ok(ReconcileOutcome::Updated)
            }
        }
    }

    async fn create_trigger(
        &self,
        namespace: &str,
        name: &str,
        intent: &TriggerIntent,
    ) -> Result<ReconcileOutcome, ReconcilerError> {
        info!(target: self.log_target, "Creating trigger '{name}' in '{namespace}'...");

        match self.store.create(&build_trigger(namespace, name, intent)).await {
            Ok(_) => Ok(ReconcileOutcome::Created),
            Err(StoreError::AlreadyExists) => {
                debug!(target: self.log_target, "Trigger '{name}' in '{namespace}' was created concurrently");
                Ok(ReconcileOutcome::Created)
            }
            Err(err) => Err(ReconcilerError::Store(err)),
        }
    }

    async fn delete_trigger(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<ReconcileOutcome, ReconcilerError> {
        info!(target: self.log_target, "Removing trigger '{name}' from '{namespace}'...");

        match self.store.delete(namespace, name).await {
            Ok(()) => Ok(ReconcileOutcome::Deleted),
            Err(StoreError::NotFound) => {
                debug!(target: self.log_target, "Trigger '{name}' in '{namespace}' was removed concurrently");
                Ok(ReconcileOutcome::Deleted)
            }
            Err(err) => Err(ReconcilerError::Store(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use k8s_openapi::{apimachinery::pkg::apis::meta::v1::Time, chrono::Utc};
    use kube::core::{ErrorResponse, ObjectMeta};

    use crate::{
        resources::{
            crd::v1beta1::{function::Function, http_trigger::HttpTrigger},
            intent::TriggerIntent,
        },
        store::{memory::StoreCall, MemoryTriggerStore, StoreError, TriggerStore},
        trigger::desired::build_trigger,
    };

    use super::{error::ReconcilerError, FunctionReconciler, ReconcileOutcome};

    fn function(namespace: &str, name: &str) -> Function {
        Function {
            metadata: ObjectMeta {
                namespace: Some(namespace.to_owned()),
                name: Some(name.to_owned()),
                ..Default::default()
            },
            spec: Default::default(),
        }
    }

    fn intent() -> TriggerIntent {
        TriggerIntent::new("foo.example.com", "/", false)
    }

    fn unavailable() -> StoreError {
        StoreError::Api(kube::Error::Api(ErrorResponse {
            status: "Failure".to_owned(),
            message: "the server is currently unable to handle the request".to_owned(),
            reason: "ServiceUnavailable".to_owned(),
            code: 503,
        }))
    }

    #[tokio::test]
    async fn delete_of_absent_trigger_is_noop() {
        let reconciler = FunctionReconciler::new(MemoryTriggerStore::new());

        let outcome = reconciler
            .reconcile(&function("myns", "foo"), &intent(), true)
            .await
            .unwrap();

        assert_eq!(outcome, ReconcileOutcome::Absent);
        assert!(reconciler.store().writes().is_empty());
    }

    #[tokio::test]
    async fn missing_trigger_is_created() {
        let reconciler = FunctionReconciler::new(MemoryTriggerStore::new());

        let outcome = reconciler
            .reconcile(&function("myns", "foo"), &intent(), false)
            .await
            .unwrap();

        let triggers = reconciler.store().triggers("myns");
        assert_eq!(outcome, ReconcileOutcome::Created);
        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0].metadata.namespace.as_deref(), Some("myns"));
        assert_eq!(triggers[0].metadata.name.as_deref(), Some("foo"));
        assert_eq!(triggers[0].spec.function_name, "foo");
        assert_eq!(triggers[0].spec.host_name, "foo.example.com");
    }

    #[tokio::test]
    async fn existing_trigger_is_deleted() {
        let store = MemoryTriggerStore::with_triggers([build_trigger("myns", "foo", &intent())]);
        let reconciler = FunctionReconciler::new(store);

        let outcome = reconciler
            .reconcile(&function("myns", "foo"), &intent(), true)
            .await
            .unwrap();

        assert_eq!(outcome, ReconcileOutcome::Deleted);
        assert!(reconciler.store().triggers("myns").is_empty());
    }

    #[tokio::test]
    async fn matching_trigger_is_not_rewritten() {
        let mut existing = build_trigger("myns", "foo", &intent());
        existing.metadata.resource_version = Some("7".to_owned());
        existing.metadata.deletion_timestamp = Some(Time(Utc::now()));
        let reconciler = FunctionReconciler::new(MemoryTriggerStore::with_triggers([existing]));

        let outcome = reconciler
            .reconcile(&function("myns", "foo"), &intent(), false)
            .await
            .unwrap();

        assert_eq!(outcome, ReconcileOutcome::Unchanged);
        assert!(reconciler.store().writes().is_empty());
    }

    #[tokio::test]
    async fn drifted_trigger_is_updated_in_place() {
        let mut existing = build_trigger(
            "myns",
            "foo",
            &TriggerIntent::new("old.example.com", "/old", true),
        );
        existing.spec.gateway = Some("nginx".to_owned());
        let reconciler = FunctionReconciler::new(MemoryTriggerStore::with_triggers([existing]));

        let outcome = reconciler
            .reconcile(&function("myns", "foo"), &intent(), false)
            .await
            .unwrap();

        let triggers = reconciler.store().triggers("myns");
        assert_eq!(outcome, ReconcileOutcome::Updated);
        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0].spec.host_name, "foo.example.com");
        assert_eq!(triggers[0].spec.path, "/");
        assert!(!triggers[0].spec.tls_acme);
        assert_eq!(triggers[0].spec.gateway.as_deref(), Some("nginx"));
    }

    #[tokio::test]
    async fn repeated_events_are_idempotent() {
        let reconciler = FunctionReconciler::new(MemoryTriggerStore::new());
        let function = function("myns", "foo");

        let first = reconciler.reconcile(&function, &intent(), false).await.unwrap();
        let second = reconciler.reconcile(&function, &intent(), false).await.unwrap();
        let deleted = reconciler.reconcile(&function, &intent(), true).await.unwrap();
        let deleted_again = reconciler.reconcile(&function, &intent(), true).await.unwrap();

        assert_eq!(
            [first, second, deleted, deleted_again],
            [
                ReconcileOutcome::Created,
                ReconcileOutcome::Unchanged,
                ReconcileOutcome::Deleted,
                ReconcileOutcome::Absent
            ]
        );
        assert_eq!(reconciler.store().writes().len(), 2);
    }

    #[tokio::test]
    async fn functions_are_isolated_by_namespace() {
        let store = MemoryTriggerStore::with_triggers([build_trigger("other", "foo", &intent())]);
        let reconciler = FunctionReconciler::new(store);

        reconciler
            .reconcile(&function("myns", "foo"), &intent(), true)
            .await
            .unwrap();

        assert_eq!(reconciler.store().triggers("other").len(), 1);
    }

    #[tokio::test]
    async fn create_race_counts_as_success() {
        let reconciler = FunctionReconciler::new(RacingStore(MemoryTriggerStore::new()));

        let outcome = reconciler
            .reconcile(&function("myns", "foo"), &intent(), false)
            .await
            .unwrap();

        assert_eq!(outcome, ReconcileOutcome::Created);
        assert_eq!(reconciler.store().0.triggers("myns").len(), 1);
    }

    #[tokio::test]
    async fn delete_race_counts_as_success() {
        let store = MemoryTriggerStore::with_triggers([build_trigger("myns", "foo", &intent())]);
        let reconciler = FunctionReconciler::new(RacingStore(store));

        let outcome = reconciler
            .reconcile(&function("myns", "foo"), &intent(), true)
            .await
            .unwrap();

        assert_eq!(outcome, ReconcileOutcome::Deleted);
    }

    #[tokio::test]
    async fn update_conflict_is_surfaced() {
        let existing = build_trigger("myns", "foo", &TriggerIntent::new("old", "/", false));
        let store = MemoryTriggerStore::with_triggers([existing]);
        let reconciler = FunctionReconciler::new(RacingStore(store));

        let result = reconciler
            .reconcile(&function("myns", "foo"), &intent(), false)
            .await;

        match result {
            Err(err @ ReconcilerError::Store(StoreError::Conflict)) => assert!(err.is_retryable()),
            other => panic!("expected a conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn transport_errors_are_propagated() {
        let reconciler = FunctionReconciler::new(MemoryTriggerStore::new());
        reconciler.store().fail_next(unavailable());

        let result = reconciler
            .reconcile(&function("myns", "foo"), &intent(), false)
            .await;

        match result {
            Err(ReconcilerError::Store(StoreError::Api(kube::Error::Api(response)))) => {
                assert_eq!(response.code, 503)
            }
            other => panic!("expected an api error, got {other:?}"),
        }
        assert!(reconciler.store().triggers("myns").is_empty());
    }

    #[tokio::test]
    async fn nameless_function_is_rejected_before_any_call() {
        let reconciler = FunctionReconciler::new(MemoryTriggerStore::new());
        let mut nameless = function("myns", "foo");
        nameless.metadata.name = None;

        let result = reconciler.reconcile(&nameless, &intent(), false).await;

        assert!(matches!(result, Err(ReconcilerError::MissingObjectMetadata)));
        assert!(reconciler.store().calls().is_empty());
    }

    #[tokio::test]
    async fn read_and_write_are_the_only_calls() {
        let reconciler = FunctionReconciler::new(MemoryTriggerStore::new());

        reconciler
            .reconcile(&function("myns", "foo"), &intent(), false)
            .await
            .unwrap();

        assert_eq!(
            reconciler.store().calls(),
            vec![
                StoreCall::Get {
                    namespace: "myns".to_owned(),
                    name: "foo".to_owned()
                },
                StoreCall::Create {
                    namespace: "myns".to_owned(),
                    name: "foo".to_owned()
                },
            ]
        );
    }

    /// Lets reads through and makes the following write lose a race against
    /// another writer that got there first.
    struct RacingStore(MemoryTriggerStore);

    #[async_trait::async_trait]
    impl TriggerStore for RacingStore {
        async fn get(
            &self,
            namespace: &str,
            name: &str,
        ) -> Result<Option<HttpTrigger>, StoreError> {
            self.0.get(namespace, name).await
        }

        async fn create(
            &self,
            trigger: &HttpTrigger,
        ) -> Result<HttpTrigger, StoreError> {
            self.0.create(trigger).await?;
            self.0.create(trigger).await
        }

        async fn update(
            &self,
            trigger: &HttpTrigger,
        ) -> Result<HttpTrigger, StoreError> {
            self.0.update(trigger).await?;
            self.0.update(trigger).await
        }

        async fn delete(&self, namespace: &str, name: &str) -> Result<(), StoreError> {
            self.0.delete(namespace, name).await?;
            self.0.delete(namespace, name).await
        }
    }
}
