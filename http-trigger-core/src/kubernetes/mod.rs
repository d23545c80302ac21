use k8s_openapi::NamespaceResourceScope;
use kube::{Api, Client, Resource};

pub mod operations;

pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_CONFLICT: u16 = 409;

pub trait GetApi {
    fn namespaced_api<T>(&self, namespace: &str) -> Api<T>
    where
        T: Resource<Scope = NamespaceResourceScope, DynamicType = ()>;

    fn global_api<T>(&self) -> Api<T>
    where
        T: Resource<DynamicType = ()>;
}

impl GetApi for Client {
    fn namespaced_api<T>(&self, namespace: &str) -> Api<T>
    where
        T: Resource<Scope = NamespaceResourceScope, DynamicType = ()>,
    {
        Api::namespaced(self.clone(), namespace)
    }

    fn global_api<T>(&self) -> Api<T>
    where
        T: Resource<DynamicType = ()>,
    {
        Api::all(self.clone())
    }
}

/// Returns the HTTP status code of an API server error response, if any.
pub fn api_error_code(error: &kube::Error) -> Option<u16> {
    match error {
        kube::Error::Api(response) => Some(response.code),
        _ => None,
    }
}

pub fn is_not_found(error: &kube::Error) -> bool {
    api_error_code(error) == Some(STATUS_NOT_FOUND)
}

pub fn is_conflict(error: &kube::Error) -> bool {
    api_error_code(error) == Some(STATUS_CONFLICT)
}
