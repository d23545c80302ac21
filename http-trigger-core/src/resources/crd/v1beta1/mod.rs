pub mod function;
pub mod http_trigger;
