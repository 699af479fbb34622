pub mod bounds;
pub mod builder;
pub mod dump;
pub mod entities;
pub mod tree_model;
