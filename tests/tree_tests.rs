mod common;

use common::utils::{find_by, fixture, login_tree, save_screen, tree_of};
use locator_inspector::inspector::error::InspectorError;
use locator_inspector::tree::bounds::{format_bounds, parse_bounds};
use locator_inspector::tree::dump::parse_xml;
use locator_inspector::tree::entities::decode_entities;
use locator_inspector::tree::tree_model::{NodeId, Rect, UiTree};
use serde_json::json;

// =========================================================================
// Bounds parsing
// =========================================================================

#[test]
fn parse_bounds_reads_corner_pairs() {
    assert_eq!(parse_bounds("[0,0][10,10]"), Some(Rect::new(0, 0, 10, 10)));
    assert_eq!(
        parse_bounds("[100,200][300,260]"),
        Some(Rect::new(100, 200, 200, 60))
    );
    assert_eq!(parse_bounds("[5,5][5,5]"), Some(Rect::new(5, 5, 0, 0)), "Zero area is still bounds");
}

#[test]
fn parse_bounds_rejects_other_shapes() {
    assert_eq!(parse_bounds(""), None, "Empty");
    assert_eq!(parse_bounds("[1,2][3]"), None, "Missing coordinate");
    assert_eq!(parse_bounds("[-1,0][4,4]"), None, "Negative");
    assert_eq!(parse_bounds("[10,10][5,5]"), None, "Inverted corners");
    assert_eq!(parse_bounds(" [0,0][1,1]"), None, "Leading space");
    assert_eq!(parse_bounds("[0,0][1,1]x"), None, "Trailing junk");
    assert_eq!(parse_bounds("[a,0][1,1]"), None, "Not a number");
}

#[test]
fn format_bounds_inverts_parse() {
    let rect = Rect::new(80, 900, 420, 120);
    assert_eq!(format_bounds(&rect), "[80,900][500,1020]");
    assert_eq!(parse_bounds(&format_bounds(&rect)), Some(rect));
}

// =========================================================================
// Entity decoding
// =========================================================================

#[test]
fn decode_entities_handles_named_numeric_and_hex() {
    assert_eq!(decode_entities("Save &amp; Exit"), "Save & Exit");
    assert_eq!(decode_entities("&quot;hi&quot; &apos;x&apos;"), "\"hi\" 'x'");
    assert_eq!(decode_entities("&lt;b&gt;"), "<b>");
    assert_eq!(decode_entities("&#38;&#x41;&#X42;"), "&AB");
}

#[test]
fn decode_entities_leaves_unknown_sequences() {
    assert_eq!(decode_entities("a & b"), "a & b");
    assert_eq!(decode_entities("&nbsp;"), "&nbsp;");
    assert_eq!(decode_entities("&#xZZ;"), "&#xZZ;");
    assert_eq!(decode_entities("trailing &"), "trailing &");
}

#[test]
fn decode_entities_decodes_only_once() {
    assert_eq!(decode_entities("&amp;amp;"), "&amp;");
}

// =========================================================================
// Hierarchy builder
// =========================================================================

#[test]
fn container_bounds_cover_only_bounded_children() {
    let tree = tree_of(json!({
        "class": "android.widget.FrameLayout",
        "node": [
            { "class": "a", "bounds": "[0,0][10,10]" },
            { "class": "b", "bounds": "[5,5][15,15]" },
            { "class": "c" }
        ]
    }));

    let root = tree.node(tree.root());
    assert_eq!(root.bounds, Some(Rect::new(0, 0, 15, 15)));
    assert_eq!(tree.node(NodeId(3)).bounds, None, "Unbounded child stays unbounded");
}

#[test]
fn container_without_bounded_descendants_has_no_bounds() {
    let tree = tree_of(json!({ "node": [{ "class": "a" }, { "class": "b", "bounds": "junk" }] }));
    assert_eq!(tree.node(tree.root()).bounds, None);
}

#[test]
fn own_bounds_win_over_children() {
    let tree = tree_of(json!({
        "bounds": "[0,0][50,50]",
        "node": { "bounds": "[0,0][500,500]" }
    }));
    assert_eq!(tree.node(tree.root()).bounds, Some(Rect::new(0, 0, 50, 50)));
}

#[test]
fn derived_bounds_propagate_through_levels() {
    let tree = tree_of(json!({
        "node": { "node": [
            { "bounds": "[10,10][20,20]" },
            { "bounds": "[30,40][50,60]" }
        ]}
    }));
    assert_eq!(tree.node(NodeId(0)).bounds, Some(Rect::new(10, 10, 40, 50)));
    assert_eq!(tree.node(NodeId(1)).bounds, Some(Rect::new(10, 10, 40, 50)));
}

#[test]
fn tag_comes_from_class_or_placeholder() {
    let tree = tree_of(json!({
        "node": [
            { "class": "android.widget.Button" },
            { "text": "no class" },
            { "class": "" }
        ]
    }));

    assert_eq!(tree.node(NodeId(0)).tag, "node");
    assert_eq!(tree.node(NodeId(1)).tag, "android.widget.Button");
    assert_eq!(tree.node(NodeId(1)).short_tag(), "Button");
    assert_eq!(tree.node(NodeId(2)).tag, "node");
    assert_eq!(tree.node(NodeId(3)).tag, "node", "Empty class falls back");
}

#[test]
fn children_link_back_to_their_parent() {
    let tree = login_tree();

    assert_eq!(tree.node(tree.root()).parent, None, "Root has no parent");
    for node in tree.iter() {
        for child in &node.children {
            assert_eq!(tree.node(*child).parent, Some(node.id));
        }
    }
}

#[test]
fn builder_assigns_ids_in_document_order() {
    let tree = tree_of(save_screen());
    let ids: Vec<usize> = tree.iter().map(|n| n.id.0).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.node(NodeId(3)).attr("resource-id"), "id/save_btn");
}

#[test]
fn attributes_are_entity_decoded_and_stringified() {
    let tree = tree_of(json!({
        "text": "Save &amp; Exit",
        "index": 3,
        "clickable": true,
        "node": []
    }));
    let root = tree.node(tree.root());

    assert_eq!(root.attr("text"), "Save & Exit");
    assert_eq!(root.attr("index"), "3");
    assert!(root.flag("clickable"));
    assert_eq!(root.attr("missing"), "", "Unknown attribute reads as empty");
    assert!(!root.attributes.contains_key("node"), "Child field is not an attribute");
}

#[test]
fn attribute_bag_is_merged() {
    let tree = tree_of(json!({
        "$": { "class": "android.widget.TextView", "text": "A &lt; B" }
    }));
    let root = tree.node(tree.root());
    assert_eq!(root.tag, "android.widget.TextView");
    assert_eq!(root.attr("text"), "A < B");
}

#[test]
fn non_object_dump_builds_lone_placeholder_root() {
    let tree = tree_of(json!("not a tree"));
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.node(tree.root()).tag, "node");
}

#[test]
fn navigation_helpers_follow_structure() {
    let tree = login_tree();
    let save = find_by(&tree, "text", "Save & Exit");
    let password = find_by(&tree, "resource-id", "com.example.app:id/password");

    assert_eq!(tree.depth(save), 3);
    let ancestors: Vec<&str> = tree.ancestors(save).map(|n| n.tag.as_str()).collect();
    assert_eq!(
        ancestors,
        vec!["android.widget.LinearLayout", "android.widget.FrameLayout", "node"]
    );
    assert_eq!(tree.sibling_index(password), 2, "Second EditText under FrameLayout");
    assert_eq!(tree.sibling_index(tree.root()), 1);
}

#[test]
fn descendants_walk_the_subtree_in_document_order() {
    let tree = login_tree();
    let all: Vec<usize> = tree.descendants(tree.root()).map(|n| n.id.0).collect();
    assert_eq!(all, (1..tree.len()).collect::<Vec<_>>());

    let save = find_by(&tree, "text", "Save & Exit");
    let row = tree.node(save).parent.unwrap();
    let inside: Vec<&str> = tree.descendants(row).map(|n| n.attr("content-desc")).collect();
    assert_eq!(inside, vec!["", "Help"]);
    assert_eq!(tree.descendants(save).count(), 0);
}

// =========================================================================
// XML dumps
// =========================================================================

#[test]
fn xml_dump_builds_full_tree() {
    let tree = login_tree();

    assert_eq!(tree.len(), 9);
    let root = tree.node(tree.root());
    assert_eq!(root.attr("rotation"), "0");
    assert_eq!(root.bounds, Some(Rect::new(0, 0, 1080, 2400)), "Root derives from FrameLayout");

    let layout = find_by(&tree, "class", "android.widget.LinearLayout");
    assert_eq!(tree.node(layout).bounds, Some(Rect::new(80, 900, 920, 120)));
}

#[test]
fn xml_attribute_values_decoded_once() {
    let tree = login_tree();
    let save = find_by(&tree, "text", "Save & Exit");
    assert_eq!(tree.node(save).tag, "android.widget.Button");
}

#[test]
fn parse_xml_keeps_raw_attribute_text() {
    let value = parse_xml(r#"<hierarchy><node text="a &amp; b" /></hierarchy>"#).unwrap();
    assert_eq!(value["node"][0]["text"], "a &amp; b");
}

#[test]
fn appium_style_element_names_become_classes() {
    let xml = r#"<hierarchy class="hierarchy">
        <android.widget.FrameLayout bounds="[0,0][100,100]">
            <android.widget.Button text="Go" bounds="[10,10][20,20]" />
        </android.widget.FrameLayout>
    </hierarchy>"#;
    let tree = UiTree::from_xml(xml).unwrap();

    assert_eq!(tree.node(NodeId(1)).tag, "android.widget.FrameLayout");
    assert_eq!(tree.node(NodeId(2)).tag, "android.widget.Button");
    assert_eq!(tree.node(NodeId(2)).parent, Some(NodeId(1)));
}

#[test]
fn trailing_text_after_root_is_ignored() {
    let xml = format!("{}UI hierchary dumped to: /dev/tty", fixture("login_dump.xml"));
    assert_eq!(UiTree::from_xml(&xml).unwrap().len(), 9);
}

#[test]
fn malformed_xml_is_reported() {
    let err = UiTree::from_xml("<hierarchy><node></hierarchy>").unwrap_err();
    assert!(matches!(err, InspectorError::DumpParse { .. }), "got {:?}", err);

    assert!(UiTree::from_xml("<hierarchy><node>").is_err(), "Unclosed element");
    assert!(UiTree::from_xml("").is_err(), "No root element");
    assert!(UiTree::from_xml("<a/><b/>").is_err(), "Two roots");
}

#[test]
fn json_dump_parses_or_reports() {
    let tree = UiTree::from_json(r#"{"node": {"class": "x", "bounds": "[0,0][1,1]"}}"#).unwrap();
    assert_eq!(tree.len(), 2);

    let err = UiTree::from_json("{ nope").unwrap_err();
    assert!(matches!(err, InspectorError::JsonParse { .. }));
}
