pub mod context;
pub mod error;
pub mod function;
