pub mod error;
pub mod inspector;
