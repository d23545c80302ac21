use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(CustomResource, Deserialize, Serialize, Clone, Default, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
#[kube(
    group = "kubeless.io",
    version = "v1beta1",
    kind = "HTTPTrigger",
    struct = "HttpTrigger",
    plural = "httptriggers",
    namespaced,
    derive = "Default",
    derive = "PartialEq"
)]
pub struct HttpTriggerSpec {
    /// function this trigger exposes, always equal to the trigger name
    pub function_name: String,
    /// host the function is reachable under
    pub host_name: String,
    /// path prefix routed to the function
    pub path: String,
    /// request a certificate from the cluster's ACME issuer
    pub tls_acme: bool,
    /// pre-provisioned secret holding the TLS certificate
    pub tls_secret: Option<String>,
    /// ingress gateway class, e.g. `nginx`
    pub gateway: Option<String>,
    /// secret holding basic auth credentials
    pub basic_auth_secret: Option<String>,
    pub cors_enable: Option<bool>,
}
