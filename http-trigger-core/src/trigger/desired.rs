use kube::core::ObjectMeta;

use crate::resources::{
    crd::v1beta1::http_trigger::{HttpTrigger, HttpTriggerSpec},
    intent::TriggerIntent,
    labels::get_trigger_labels,
};

/// A brand new trigger for `function_name`, named after the function.
pub fn build_trigger(namespace: &str, function_name: &str, intent: &TriggerIntent) -> HttpTrigger {
    HttpTrigger {
        metadata: ObjectMeta {
            name: Some(function_name.to_owned()),
            namespace: Some(namespace.to_owned()),
            labels: Some(get_trigger_labels(function_name)),
            ..Default::default()
        },
        spec: HttpTriggerSpec {
            function_name: function_name.to_owned(),
            host_name: intent.host_name.to_owned(),
            path: intent.path.to_owned(),
            tls_acme: intent.tls_acme,
            ..Default::default()
        },
    }
}

/// The existing trigger with the controller-owned spec fields replaced.
///
/// Resource version and deletion timestamp are kept as observed, they're
/// owned by the api server. So are the spec fields set by users directly.
pub fn merge_trigger(
    existing: &HttpTrigger,
    function_name: &str,
    intent: &TriggerIntent,
) -> HttpTrigger {
    let mut desired = existing.clone();

    desired.spec.function_name = function_name.to_owned();
    desired.spec.host_name = intent.host_name.to_owned();
    desired.spec.path = intent.path.to_owned();
    desired.spec.tls_acme = intent.tls_acme;

    desired
}
