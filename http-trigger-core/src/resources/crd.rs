use kube::CustomResourceExt;

use self::v1beta1::{function::Function, http_trigger::HttpTrigger};

pub mod v1beta1;

/// Renders the function and trigger CRDs as a multi-document YAML stream.
pub fn render_crds() -> Result<String, serde_yaml::Error> {
    let documents = [
        serde_yaml::to_string(&Function::crd())?,
        serde_yaml::to_string(&HttpTrigger::crd())?,
    ];

    Ok(documents.join("---\n"))
}
