use std::collections::HashMap;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

impl Rect {
    pub fn new(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i64 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> i64 {
        self.y.saturating_add(self.h)
    }

    /// Saturates at `i64::MAX` for oversized rectangles.
    pub fn area(&self) -> i64 {
        self.w.saturating_mul(self.h)
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }
}

/// Identity of a node inside one built tree. Indices are assigned in
/// document (pre-order) order and mean nothing across trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub tag: String,
    pub attributes: HashMap<String, String>,
    pub children: Vec<NodeId>,
    pub bounds: Option<Rect>,
    pub parent: Option<NodeId>,
    /// Set for elements held under a `hierarchy` field of a JSON dump.
    pub wrapper: bool,
}

impl Node {
    /// Attribute value, or `""` when the node does not carry it.
    pub fn attr(&self, name: &str) -> &str {
        self.attributes.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn has_attr(&self, name: &str) -> bool {
        !self.attr(name).is_empty()
    }

    pub fn flag(&self, name: &str) -> bool {
        self.attr(name) == "true"
    }

    /// Tag without its dotted namespace, e.g. `Button` for `android.widget.Button`.
    pub fn short_tag(&self) -> &str {
        self.tag.rsplit('.').next().unwrap_or(&self.tag)
    }
}

/// Immutable hierarchy built from one capture. Nodes live in an arena in
/// document order; `NodeId(0)` is always the root.
#[derive(Debug, Clone)]
pub struct UiTree {
    pub(crate) nodes: Vec<Node>,
}

impl UiTree {
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn parent(&self, id: NodeId) -> Option<&Node> {
        self.node(id).parent.map(|p| self.node(p))
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> {
        self.node(id).children.iter().map(|c| self.node(*c))
    }

    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = &Node> {
        std::iter::successors(self.parent(id), |n| self.parent(n.id))
    }

    /// The subtree below `id` in pre-order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = &Node> {
        let mut stack: Vec<NodeId> = self.node(id).children.iter().rev().copied().collect();
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            let node = self.node(next);
            stack.extend(node.children.iter().rev().copied());
            Some(node)
        })
    }

    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// 1-based position among the siblings that share this node's tag.
    /// The root is always index 1.
    pub fn sibling_index(&self, id: NodeId) -> usize {
        let node = self.node(id);
        let Some(parent) = node.parent else {
            return 1;
        };

        let mut index = 0;
        for sibling in self.children(parent) {
            if sibling.tag == node.tag {
                index += 1;
            }
            if sibling.id == id {
                break;
            }
        }
        index
    }
}
