use std::{sync::Arc, time::Duration};

use http_trigger_core::{
    kubernetes::GetApi,
    reconciler::error::ReconcilerError,
    resources::{crd::v1beta1::function::Function, intent::TriggerIntent},
    store::StoreError,
};
use kube::runtime::{
    controller::Action,
    finalizer::{finalizer, Error as FinalizerError, Event as FinalizerEvent},
};
use log::debug;

use crate::controller::FUNCTION_FINALIZER;

use super::{context::ReconcilerContext, error::ControllerError};

const RECONCILE_REQUEUE_SECS: u64 = 60 * 5;
const CONFLICT_REQUEUE_SECS: u64 = 1;
const ERROR_REQUEUE_SECS: u64 = 10;
const USER_ERROR_REQUEUE_SECS: u64 = 60 * 5;

/// Maps function lifecycle onto trigger reconciliation. The finalizer keeps
/// the function around until its trigger is gone, so a delete can't be
/// missed across controller restarts.
pub async fn reconcile_function(
    object: Arc<Function>,
    context: Arc<ReconcilerContext>,
) -> Result<Action, FinalizerError<ControllerError>> {
    let namespace = match object.metadata.namespace.clone() {
        Some(namespace) => namespace,
        None => return Err(FinalizerError::UnnamedObject),
    };
    let function_api = context.client.namespaced_api::<Function>(&namespace);

    finalizer(&function_api, FUNCTION_FINALIZER, object, |event| async {
        match event {
            FinalizerEvent::Apply(function) => apply(&function, &context).await,
            FinalizerEvent::Cleanup(function) => cleanup(&function, &context).await,
        }
    })
    .await
}

pub fn reconcile_function_error(
    _object: Arc<Function>,
    error: &FinalizerError<ControllerError>,
    _context: Arc<ReconcilerContext>,
) -> Action {
    Action::requeue(match error {
        FinalizerError::ApplyFailed(err) | FinalizerError::CleanupFailed(err) => {
            get_error_requeue(err)
        }
        _ => Duration::from_secs(ERROR_REQUEUE_SECS),
    })
}

async fn apply(function: &Function, context: &ReconcilerContext) -> Result<Action, ControllerError> {
    let intent = TriggerIntent::from_function(function, &context.intent_defaults)
        .map_err(ControllerError::InvalidIntent)?;
    let outcome = context
        .reconciler
        .reconcile(function, &intent, false)
        .await
        .map_err(ControllerError::ReconcilerError)?;

    debug!("Function trigger sync finished: {outcome:?}");

    Ok(Action::requeue(Duration::from_secs(RECONCILE_REQUEUE_SECS)))
}

async fn cleanup(
    function: &Function,
    context: &ReconcilerContext,
) -> Result<Action, ControllerError> {
    // routing intent doesn't matter for removal, a function with broken
    // annotations must still be deletable
    let outcome = context
        .reconciler
        .reconcile(function, &TriggerIntent::default(), true)
        .await
        .map_err(ControllerError::ReconcilerError)?;

    debug!("Function trigger cleanup finished: {outcome:?}");

    Ok(Action::await_change())
}

fn get_error_requeue(error: &ControllerError) -> Duration {
    match error {
        ControllerError::InvalidIntent(_) => Duration::from_secs(USER_ERROR_REQUEUE_SECS),
        ControllerError::ReconcilerError(ReconcilerError::Store(StoreError::Conflict)) => {
            Duration::from_secs(CONFLICT_REQUEUE_SECS)
        }
        ControllerError::ReconcilerError(err) if err.is_retryable() => {
            Duration::from_secs(ERROR_REQUEUE_SECS)
        }
        ControllerError::ReconcilerError(_) => Duration::from_secs(USER_ERROR_REQUEUE_SECS),
    }
}
