#![allow(dead_code)]

use locator_inspector::tree::builder::build_tree;
use locator_inspector::tree::tree_model::{NodeId, UiTree};
use serde_json::{Value, json};

pub fn fixture_path(name: &str) -> String {
    let base = std::env::current_dir().unwrap();
    base.join("tests").join("fixtures").join(name).display().to_string()
}

pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).unwrap()
}

pub fn login_tree() -> UiTree {
    UiTree::from_xml(&fixture("login_dump.xml")).unwrap()
}

/// root → container `[0,0][1080,2400]` → save button.
pub fn save_screen() -> Value {
    json!({
        "hierarchy": {
            "node": {
                "class": "android.widget.FrameLayout",
                "bounds": "[0,0][1080,2400]",
                "node": [{
                    "bounds": "[100,200][300,260]",
                    "resource-id": "id/save_btn",
                    "text": "Save"
                }]
            }
        }
    })
}

pub fn tree_of(dump: Value) -> UiTree {
    build_tree(&dump)
}

/// First node (document order) whose attribute equals `value`.
pub fn find_by(tree: &UiTree, attribute: &str, value: &str) -> NodeId {
    tree.iter()
        .find(|n| n.attr(attribute) == value)
        .map(|n| n.id)
        .unwrap_or_else(|| panic!("no node with {}={:?}", attribute, value))
}
