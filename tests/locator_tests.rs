mod common;

use common::utils::{find_by, login_tree, save_screen, tree_of};
use locator_inspector::locator::locator_model::{
    MatchStrategy, SelectorOptions, XPathOptions, attribute_for_method, selector_method,
};
use locator_inspector::locator::ui_selector::generate_ui_selector;
use locator_inspector::locator::xpath::{generate_xpath, structural_path};
use locator_inspector::tree::tree_model::NodeId;
use serde_json::json;

fn xpath_with(strategy: MatchStrategy) -> XPathOptions {
    XPathOptions {
        strategy,
        ..XPathOptions::default()
    }
}

// =========================================================================
// Path-style locators
// =========================================================================

#[test]
fn xpath_prefers_resource_id_then_text_then_description() {
    let tree = login_tree();
    let defaults = XPathOptions::default();

    let title = find_by(&tree, "resource-id", "com.example.app:id/title");
    assert_eq!(
        generate_xpath(&tree, title, &defaults),
        r#"//android.widget.TextView[@resource-id="com.example.app:id/title"]"#,
        "Resource id wins over text"
    );

    let save = find_by(&tree, "text", "Save & Exit");
    assert_eq!(
        generate_xpath(&tree, save, &defaults),
        r#"//android.widget.Button[@text="Save & Exit"]"#
    );

    let help = find_by(&tree, "content-desc", "Help");
    assert_eq!(
        generate_xpath(&tree, help, &defaults),
        r#"//android.widget.Button[@content-desc="Help"]"#
    );
}

#[test]
fn xpath_end_to_end_uses_placeholder_tag() {
    let tree = tree_of(save_screen());
    let button = find_by(&tree, "resource-id", "id/save_btn");
    assert_eq!(
        generate_xpath(&tree, button, &XPathOptions::default()),
        r#"//node[@resource-id="id/save_btn"]"#
    );
}

#[test]
fn xpath_strategy_shapes_the_predicate() {
    let tree = login_tree();
    let title = find_by(&tree, "resource-id", "com.example.app:id/title");
    let id = r#""com.example.app:id/title""#;
    let tag = "//android.widget.TextView";

    let cases = [
        (MatchStrategy::Contains, format!("{tag}[contains(@resource-id,{id})]")),
        (MatchStrategy::StartsWith, format!("{tag}[starts-with(@resource-id,{id})]")),
        (MatchStrategy::EndsWith, format!("{tag}[ends-with(@resource-id,{id})]")),
        (MatchStrategy::Matches, format!("{tag}[matches(@resource-id,{id})]")),
    ];

    for (strategy, expected) in cases {
        assert_eq!(generate_xpath(&tree, title, &xpath_with(strategy)), expected, "{:?}", strategy);
    }
}

#[test]
fn xpath_preferred_attribute_overrides_default_order() {
    let tree = login_tree();
    let title = find_by(&tree, "resource-id", "com.example.app:id/title");

    let by_text = XPathOptions {
        preferred_attribute: Some("text".into()),
        ..XPathOptions::default()
    };
    assert_eq!(
        generate_xpath(&tree, title, &by_text),
        r#"//android.widget.TextView[@text="Sign in"]"#
    );

    let by_empty_desc = XPathOptions {
        preferred_attribute: Some("content-desc".into()),
        ..XPathOptions::default()
    };
    assert_eq!(
        generate_xpath(&tree, title, &by_empty_desc),
        r#"//android.widget.TextView[@resource-id="com.example.app:id/title"]"#,
        "Empty preferred attribute falls back to the default order"
    );
}

#[test]
fn xpath_extras_append_equals_clauses() {
    let tree = login_tree();
    let title = find_by(&tree, "resource-id", "com.example.app:id/title");

    let options = XPathOptions {
        strategy: MatchStrategy::Contains,
        extra_attributes: vec!["text".into(), "content-desc".into(), "resource-id".into()],
        ..XPathOptions::default()
    };
    assert_eq!(
        generate_xpath(&tree, title, &options),
        r#"//android.widget.TextView[contains(@resource-id,"com.example.app:id/title") and @text="Sign in"]"#,
        "Absent extras and the primary attribute are not repeated"
    );
}

#[test]
fn xpath_quotes_values_containing_double_quotes() {
    let tree = tree_of(json!({ "node": { "class": "t", "text": "Say \"hi\"" } }));
    assert_eq!(
        generate_xpath(&tree, NodeId(1), &XPathOptions::default()),
        r#"//t[@text='Say "hi"']"#
    );
}

#[test]
fn xpath_concatenates_values_with_both_quote_kinds() {
    let tree = tree_of(json!({ "node": { "class": "t", "text": "Say \"hi\" it's" } }));
    assert_eq!(
        generate_xpath(&tree, NodeId(1), &XPathOptions::default()),
        r#"//t[@text=concat("Say ", '"', "hi", '"', " it's")]"#
    );
}

#[test]
fn xpath_without_identifiers_falls_back_to_structure() {
    let tree = login_tree();
    let footer = find_by(&tree, "class", "android.view.View");
    let layout = find_by(&tree, "class", "android.widget.LinearLayout");

    assert_eq!(
        generate_xpath(&tree, footer, &XPathOptions::default()),
        "/node[1]/android.widget.FrameLayout[1]/android.view.View[1]"
    );
    assert_eq!(
        generate_xpath(&tree, layout, &XPathOptions::default()),
        "/node[1]/android.widget.FrameLayout[1]/android.widget.LinearLayout[1]"
    );
}

#[test]
fn structural_path_counts_same_tag_siblings_only() {
    let tree = tree_of(json!({
        "node": [
            { "class": "A" },
            { "class": "B" },
            { "class": "A" },
            { "class": "A" }
        ]
    }));

    assert_eq!(structural_path(&tree, NodeId(0)), "/node[1]");
    assert_eq!(structural_path(&tree, NodeId(2)), "/node[1]/B[1]");
    assert_eq!(structural_path(&tree, NodeId(4)), "/node[1]/A[3]");
}

// =========================================================================
// Chained-selector locators
// =========================================================================

#[test]
fn ui_selector_default_is_wrapped_equals() {
    let tree = login_tree();
    let title = find_by(&tree, "resource-id", "com.example.app:id/title");
    assert_eq!(
        generate_ui_selector(&tree, title, &SelectorOptions::default()),
        r#"new UiSelector().resourceId("com.example.app:id/title")"#
    );
}

#[test]
fn ui_selector_bare_chain_with_suffix() {
    let tree = login_tree();
    let save = find_by(&tree, "text", "Save & Exit");

    let options = SelectorOptions {
        strategy: MatchStrategy::StartsWith,
        prefix: false,
        ..SelectorOptions::default()
    };
    assert_eq!(
        generate_ui_selector(&tree, save, &options),
        r#"textStartsWith("Save & Exit")"#
    );
}

#[test]
fn ui_selector_extras_always_use_equals() {
    let tree = login_tree();
    let email = find_by(&tree, "resource-id", "com.example.app:id/email");

    let options = SelectorOptions {
        strategy: MatchStrategy::Contains,
        extra_attributes: vec!["class".into(), "long-clickable".into()],
        ..SelectorOptions::default()
    };
    assert_eq!(
        generate_ui_selector(&tree, email, &options),
        r#"new UiSelector().resourceIdContains("com.example.app:id/email").className("android.widget.EditText").longClickable("true")"#
    );
}

#[test]
fn ui_selector_falls_back_to_class_name() {
    let tree = login_tree();
    let footer = find_by(&tree, "class", "android.view.View");
    assert_eq!(
        generate_ui_selector(&tree, footer, &SelectorOptions::default()),
        r#"new UiSelector().className("android.view.View")"#
    );
}

#[test]
fn ui_selector_escapes_string_literals() {
    let tree = tree_of(json!({ "node": { "class": "t", "text": "Line \"1\"\nLine\t2" } }));
    assert_eq!(
        generate_ui_selector(&tree, NodeId(1), &SelectorOptions::default()),
        r#"new UiSelector().text("Line \"1\"\nLine\t2")"#
    );
}

// =========================================================================
// Attribute and method names
// =========================================================================

#[test]
fn selector_methods_map_known_attributes() {
    assert_eq!(selector_method("resource-id"), "resourceId");
    assert_eq!(selector_method("content-desc"), "description");
    assert_eq!(selector_method("text"), "text");
    assert_eq!(selector_method("class"), "className");
    assert_eq!(selector_method("package"), "packageName");
    assert_eq!(selector_method("long-clickable"), "longClickable");
    assert_eq!(selector_method("checked"), "checked");
}

#[test]
fn method_names_map_back_to_attributes() {
    assert_eq!(attribute_for_method("resourceId"), "resource-id");
    assert_eq!(attribute_for_method("description"), "content-desc");
    assert_eq!(attribute_for_method("className"), "class");
    assert_eq!(attribute_for_method("longClickable"), "long-clickable");
    assert_eq!(attribute_for_method("enabled"), "enabled");
}

#[test]
fn selector_method_suffixes_split_into_strategy() {
    assert_eq!(
        MatchStrategy::split_selector_method("textStartsWith"),
        ("text", MatchStrategy::StartsWith)
    );
    assert_eq!(
        MatchStrategy::split_selector_method("descriptionContains"),
        ("description", MatchStrategy::Contains)
    );
    assert_eq!(
        MatchStrategy::split_selector_method("resourceIdMatches"),
        ("resourceId", MatchStrategy::Matches)
    );
    assert_eq!(
        MatchStrategy::split_selector_method("textEndsWith"),
        ("text", MatchStrategy::EndsWith)
    );
    assert_eq!(
        MatchStrategy::split_selector_method("text"),
        ("text", MatchStrategy::Equals)
    );
    assert_eq!(
        MatchStrategy::split_selector_method("Contains"),
        ("Contains", MatchStrategy::Equals),
        "A bare suffix is a method name"
    );
}

#[test]
fn strategies_compare_values() {
    assert!(MatchStrategy::Equals.test("Save", "Save"));
    assert!(!MatchStrategy::Equals.test("Save", "save"));
    assert!(MatchStrategy::Contains.test("Save & Exit", "& E"));
    assert!(MatchStrategy::StartsWith.test("Save & Exit", "Save"));
    assert!(MatchStrategy::EndsWith.test("Save & Exit", "Exit"));
    assert!(MatchStrategy::Matches.test("id/save_btn", r"save_\w+"));
    assert!(!MatchStrategy::Matches.test("anything", "("), "Invalid pattern never matches");
}
