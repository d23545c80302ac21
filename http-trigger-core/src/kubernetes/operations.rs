use std::fmt::Debug;

use kube::{
    api::{DeleteParams, PostParams},
    Api, Resource,
};
use log::debug;
use serde::{de::DeserializeOwned, Serialize};

use crate::helpers::pretty_type_name;

pub async fn try_get_resource<T>(api: &Api<T>, name: &str) -> Result<Option<T>, kube::Error>
where
    T: Resource + Clone + DeserializeOwned + Debug,
{
    debug!("Fetching '{name}' {} resource...", pretty_type_name::<T>());

    api.get_opt(name).await
}

pub async fn create_resource<T>(
    api: &Api<T>,
    resource: &T,
    post_params: &PostParams,
) -> Result<T, kube::Error>
where
    T: Resource + Clone + DeserializeOwned + Serialize + Debug,
{
    debug!(
        "Creating '{}' {} resource on the cluster...",
        resource.meta().name.as_deref().unwrap_or("---"),
        pretty_type_name::<T>()
    );

    api.create(post_params, resource).await
}

/// Replaces the whole object. The resource version carried by `resource`
/// is checked by the API server, so a stale object is rejected with 409.
pub async fn replace_resource<T>(
    api: &Api<T>,
    name: &str,
    resource: &T,
    post_params: &PostParams,
) -> Result<T, kube::Error>
where
    T: Resource + Clone + DeserializeOwned + Serialize + Debug,
{
    debug!("Replacing '{name}' {} resource...", pretty_type_name::<T>());

    api.replace(name, post_params, resource).await
}

pub async fn delete_resource<T>(
    api: &Api<T>,
    name: &str,
    delete_params: &DeleteParams,
) -> Result<(), kube::Error>
where
    T: Resource + Clone + DeserializeOwned + Debug,
{
    debug!("Removing '{name}' {} resource from the cluster...", pretty_type_name::<T>());

    // the api server either returns the object still being finalized or a
    // status for an immediate removal, both mean the request was accepted
    api.delete(name, delete_params).await?;

    Ok(())
}
