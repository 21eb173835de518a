pub mod store;
pub mod template;
pub mod validation;
