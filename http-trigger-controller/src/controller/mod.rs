use std::sync::Arc;

use futures::StreamExt;
use http_trigger_core::{
    kubernetes::GetApi,
    reconciler::FunctionReconciler,
    resources::{
        crd::v1beta1::{function::Function, http_trigger::HttpTrigger},
        labels::CONTROLLER_NAME,
    },
    store::KubeTriggerStore,
};
use kube::{
    runtime::{reflector::ObjectRef, watcher::Config, Controller},
    Api, Client,
};
use log::info;

use crate::{config::ControllerConfig, helpers::handle_reconciliation_result};

use self::reconciler::{
    context::ReconcilerContext,
    function::{reconcile_function, reconcile_function_error},
};

pub mod reconciler;

pub const FUNCTION_FINALIZER: &str = "kubeless.io/http-trigger-cleanup";

pub async fn main_controller(client: Client, config: ControllerConfig) {
    let context = ReconcilerContext {
        reconciler: FunctionReconciler::with_log_target(
            KubeTriggerStore::new(client.clone()),
            CONTROLLER_NAME,
        ),
        client,
        intent_defaults: config.intent_defaults.clone(),
    };

    start_function_controller(Arc::new(context), config.namespace.as_deref()).await;
}

pub async fn start_function_controller(context: Arc<ReconcilerContext>, namespace: Option<&str>) {
    info!(
        "Creating function controller (namespace: {})...",
        namespace.unwrap_or("all")
    );

    let (function_api, trigger_api): (Api<Function>, Api<HttpTrigger>) = match namespace {
        Some(namespace) => (
            context.client.namespaced_api(namespace),
            context.client.namespaced_api(namespace),
        ),
        None => (context.client.global_api(), context.client.global_api()),
    };

    let watcher_config = Config::default();
    let controller = Controller::new(function_api, watcher_config.clone())
        .watches(trigger_api, watcher_config, get_trigger_owner)
        .shutdown_on_signal()
        .run(reconcile_function, reconcile_function_error, context.clone())
        .for_each(handle_reconciliation_result::<Function, _>);

    info!("Function controller created!");

    controller.await;

    info!("Exiting function controller!");
}

/// Triggers aren't owner-referenced, they point back at their function by name.
fn get_trigger_owner(trigger: HttpTrigger) -> Option<ObjectRef<Function>> {
    let namespace = trigger.metadata.namespace.as_deref()?;

    Some(ObjectRef::new(&trigger.spec.function_name).within(namespace))
}
