use std::collections::BTreeMap;

pub const MANAGED_BY_LABEL: &str = "app.kubernetes.io/managed-by";
pub const FUNCTION_LABEL: &str = "function";

pub const CONTROLLER_NAME: &str = "http-trigger-controller";

pub fn get_trigger_labels(function_name: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        (MANAGED_BY_LABEL.to_owned(), CONTROLLER_NAME.to_owned()),
        (FUNCTION_LABEL.to_owned(), function_name.to_owned()),
    ])
}
