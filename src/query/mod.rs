pub mod evaluator;
pub mod grammar;
pub mod path;
pub mod selector;
