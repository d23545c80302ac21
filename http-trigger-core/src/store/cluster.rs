use async_trait::async_trait;
use kube::{
    api::{DeleteParams, PostParams},
    Api, Client,
};

use crate::{
    helpers::RequireMetadata,
    kubernetes::{
        is_conflict, is_not_found,
        operations::{create_resource, delete_resource, replace_resource, try_get_resource},
        GetApi,
    },
    resources::crd::v1beta1::http_trigger::HttpTrigger,
};

use super::{StoreError, TriggerStore};

/// Trigger store backed by the kubernetes api server.
#[derive(Clone)]
pub struct KubeTriggerStore {
    client: Client,
    post_params: PostParams,
    delete_params: DeleteParams,
}

impl KubeTriggerStore {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            post_params: PostParams::default(),
            delete_params: DeleteParams::default(),
        }
    }

    fn api(&self, namespace: &str) -> Api<HttpTrigger> {
        self.client.namespaced_api(namespace)
    }
}

#[async_trait]
impl TriggerStore for KubeTriggerStore {
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<HttpTrigger>, StoreError> {
        try_get_resource(&self.api(namespace), name)
            .await
            .map_err(StoreError::Api)
    }

    async fn create(&self, trigger: &HttpTrigger) -> Result<HttpTrigger, StoreError> {
        let namespace = trigger.require_namespace_or(StoreError::MissingObjectMetadata)?;

        create_resource(&self.api(namespace), trigger, &self.post_params)
            .await
            .map_err(map_create_error)
    }

    async fn update(&self, trigger: &HttpTrigger) -> Result<HttpTrigger, StoreError> {
        let namespace = trigger.require_namespace_or(StoreError::MissingObjectMetadata)?;
        let name = trigger.require_name_or(StoreError::MissingObjectMetadata)?;

        replace_resource(&self.api(namespace), name, trigger, &self.post_params)
            .await
            .map_err(map_update_error)
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<(), StoreError> {
        delete_resource(&self.api(namespace), name, &self.delete_params)
            .await
            .map_err(map_delete_error)
    }
}

fn map_create_error(err: kube::Error) -> StoreError {
    match is_conflict(&err) {
        true => StoreError::AlreadyExists,
        false => StoreError::Api(err),
    }
}

fn map_update_error(err: kube::Error) -> StoreError {
    if is_conflict(&err) {
        StoreError::Conflict
    } else if is_not_found(&err) {
        StoreError::NotFound
    } else {
        StoreError::Api(err)
    }
}

fn map_delete_error(err: kube::Error) -> StoreError {
    match is_not_found(&err) {
        true => StoreError::NotFound,
        false => StoreError::Api(err),
    }
}
