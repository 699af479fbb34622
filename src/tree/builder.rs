use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::tree::bounds::parse_bounds;
use crate::tree::entities::decode_entities;
use crate::tree::tree_model::{Node, NodeId, Rect, UiTree};

/// Field holding child elements of an element.
pub const ELEMENT_FIELD: &str = "node";
/// Field holding the top-level element(s) of a dump document.
pub const ROOT_FIELD: &str = "hierarchy";
/// Attribute bag key used by some XML-to-object converters.
const ATTRIBUTE_BAG: &str = "$";

/// Tag given to elements without a `class` attribute.
pub const PLACEHOLDER_TAG: &str = "node";

/// Build an immutable tree from a nested dump structure.
///
/// The given value is the single root. Non-object values produce a lone
/// placeholder root.
pub fn build_tree(dump: &Value) -> UiTree {
    let mut nodes = Vec::new();
    let empty = Map::new();
    let root = dump.as_object().unwrap_or(&empty);
    build_node(root, false, &mut nodes);
    UiTree { nodes }
}

fn build_node(fields: &Map<String, Value>, wrapper: bool, nodes: &mut Vec<Node>) -> NodeId {
    let id = NodeId(nodes.len());
    let attributes = collect_attributes(fields);
    let tag = attributes
        .get("class")
        .filter(|c| !c.is_empty())
        .cloned()
        .unwrap_or_else(|| PLACEHOLDER_TAG.to_string());
    let bounds = attributes.get("bounds").and_then(|b| parse_bounds(b));

    // Reserve the slot first so ids follow document order.
    nodes.push(Node {
        id,
        tag,
        attributes,
        children: Vec::new(),
        bounds,
        parent: None,
        wrapper,
    });

    let mut children = Vec::new();
    for (key, value) in fields {
        if key != ELEMENT_FIELD && key != ROOT_FIELD {
            continue;
        }
        let wrapper = key == ROOT_FIELD;
        match value {
            Value::Object(child) => children.push(build_node(child, wrapper, nodes)),
            Value::Array(items) => {
                for item in items {
                    if let Value::Object(child) = item {
                        children.push(build_node(child, wrapper, nodes));
                    }
                }
            }
            _ => {}
        }
    }

    let derived = if bounds.is_none() {
        covering_bounds(children.iter().filter_map(|c| nodes[c.0].bounds))
    } else {
        bounds
    };

    let node = &mut nodes[id.0];
    node.bounds = derived;
    node.children = children.clone();

    for child in children {
        nodes[child.0].parent = Some(id);
    }

    id
}

fn collect_attributes(fields: &Map<String, Value>) -> HashMap<String, String> {
    let mut attributes = HashMap::new();

    for (key, value) in fields {
        if key == ELEMENT_FIELD || key == ROOT_FIELD {
            continue;
        }
        if key == ATTRIBUTE_BAG {
            if let Value::Object(bag) = value {
                for (k, v) in bag {
                    if let Some(s) = scalar_to_string(v) {
                        attributes.insert(k.clone(), decode_entities(&s));
                    }
                }
            }
            continue;
        }
        if let Some(s) = scalar_to_string(value) {
            attributes.insert(key.clone(), decode_entities(&s));
        }
    }

    attributes
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Smallest rectangle covering every given rectangle, `None` for none.
pub fn covering_bounds(rects: impl IntoIterator<Item = Rect>) -> Option<Rect> {
    rects.into_iter().reduce(|acc, r| acc.union(&r))
}
