use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Only the identity and annotations of a function are read by the trigger
/// controller, the spec is carried so the object round-trips intact.
#[skip_serializing_none]
#[derive(CustomResource, Deserialize, Serialize, Clone, Default, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[kube(
    group = "kubeless.io",
    version = "v1beta1",
    kind = "Function",
    namespaced,
    derive = "Default",
    derive = "PartialEq"
)]
pub struct FunctionSpec {
    /// entrypoint in the `<file>.<function>` form
    pub handler: Option<String>,
    /// runtime the function is built for, e.g. `python3.7`
    pub runtime: Option<String>,
    /// function source
    pub function: Option<String>,
    /// dependency manifest contents
    pub deps: Option<String>,
    /// execution timeout in seconds, kept as a string for compatibility
    pub timeout: Option<String>,
}
