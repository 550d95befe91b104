pub mod marker;
pub mod store;
