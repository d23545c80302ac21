pub mod annotations;
pub mod crd;
pub mod intent;
pub mod labels;
