use crate::resources::crd::v1beta1::http_trigger::HttpTrigger;

/// Tells whether two versions of a trigger differ in anything the
/// reconciler cares about.
///
/// Labels, annotations and the spec fields the controller doesn't own are
/// ignored. A resource version bump always counts as a change, the caller
/// can't tell what else the other writer touched. Values are compared as-is.
pub fn trigger_changed(old: &HttpTrigger, new: &HttpTrigger) -> bool {
    let (old_meta, new_meta) = (&old.metadata, &new.metadata);

    old_meta.name != new_meta.name
        // covers entering, leaving and moving within a pending deletion
        || old_meta.deletion_timestamp != new_meta.deletion_timestamp
        || old_meta.resource_version != new_meta.resource_version
        || old.spec.host_name != new.spec.host_name
        || old.spec.tls_acme != new.spec.tls_acme
        || old.spec.path != new.spec.path
}
