pub mod comparator;
pub mod desired;
