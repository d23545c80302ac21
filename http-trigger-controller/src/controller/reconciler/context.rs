use http_trigger_core::{
    reconciler::FunctionReconciler, resources::intent::IntentDefaults, store::KubeTriggerStore,
};
use kube::Client;

pub struct ReconcilerContext {
    pub client: Client,
    pub reconciler: FunctionReconciler<KubeTriggerStore>,
    pub intent_defaults: IntentDefaults,
}
