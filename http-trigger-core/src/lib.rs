pub mod helpers;
pub mod kubernetes;
pub mod reconciler;
pub mod resources;
pub mod store;
pub mod trigger;

pub const RESOURCE_GROUP: &str = "kubeless.io";
