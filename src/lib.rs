//! Locator engine for captured mobile UI hierarchies.
//!
//! A hierarchy dump is built into an immutable [`tree::tree_model::UiTree`],
//! hit-tested against screenshot points, and turned into XPath and
//! UiSelector locators; locator strings of either grammar (plus `regex:` and
//! plain text) can be evaluated back against the tree.

pub mod cli;
pub mod coords;
pub mod hit;
pub mod inspector;
pub mod locator;
pub mod query;
pub mod report;
pub mod trace;
pub mod tree;

pub use inspector::inspector::{Inspector, Locators, Pick};
pub use tree::tree_model::{Node, NodeId, Rect, UiTree};
