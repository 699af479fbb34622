pub mod locator_model;
pub mod ui_selector;
pub mod xpath;
