/// Extension merging test suite
/// Covers key-wise concatenation, positional child recursion, and the
/// child-count guard
use crate::*;
use serde_json::json;
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn test_extend_concatenates_attribute_arrays_key_wise() {
    let mut template = Template::new(Definition::element("div").attr("class", "a"));
    template
        .extend(Definition::behavior().attr("class", "b").attr("id", "x"))
        .expect("Failed to extend");

    let node = template.render().expect("Failed to render");
    assert_eq!(node.attribute("class"), Some("a b".to_string()));
    assert_eq!(node.attribute("id"), Some("x".to_string()));
}

#[test]
fn test_extend_appends_text_parts() {
    let mut template = Template::new(Definition::text("hello"));
    template
        .extend(Definition::text(" world"))
        .expect("Failed to extend");

    let node = template.render().expect("Failed to render");
    assert_eq!(node.text_content(), "hello world");
}

#[test]
fn test_extend_concatenates_listener_arrays() {
    let hits = Rc::new(Cell::new(0));

    let first = hits.clone();
    let mut template = Template::new(Definition::element("button").on(
        "click",
        ListenerEntry::handler(move |_| first.set(first.get() + 1)),
    ));

    let second = hits.clone();
    template
        .extend(Definition::behavior().on(
            "click",
            ListenerEntry::handler(move |_| second.set(second.get() + 10)),
        ))
        .expect("Failed to extend");

    let node = template.render().expect("Failed to render");
    node.emit("click", json!({}));
    assert_eq!(hits.get(), 11);
}

#[test]
fn test_extend_merges_style_properties() {
    let mut template = Template::new(Definition::element("div").style("color", "red"));
    template
        .extend(Definition::behavior().style("width", "10px"))
        .expect("Failed to extend");

    let node = template.render().expect("Failed to render");
    assert_eq!(node.style("color"), Some("red".to_string()));
    assert_eq!(node.style("width"), Some("10px".to_string()));
}

#[test]
fn test_extend_recurses_into_children_pairwise() {
    let mut template = Template::new(
        Definition::element("ul")
            .child(Definition::element("li").attr("class", "one"))
            .child(Definition::element("li").attr("class", "two")),
    );
    template
        .extend(
            Definition::behavior()
                .child(Definition::behavior().attr("data-index", "0"))
                .child(Definition::behavior().attr("data-index", "1")),
        )
        .expect("Failed to extend");

    let node = template.render().expect("Failed to render");
    let first = node.child(0).expect("missing child");
    assert_eq!(first.attribute("class"), Some("one".to_string()));
    assert_eq!(first.attribute("data-index"), Some("0".to_string()));
    let second = node.child(1).expect("missing child");
    assert_eq!(second.attribute("data-index"), Some("1".to_string()));
}

#[test]
fn test_extend_with_mismatched_child_count_fails() {
    let mut template = Template::new(
        Definition::element("ul")
            .child(Definition::element("li"))
            .child(Definition::element("li")),
    );
    let error = template
        .extend(
            Definition::behavior()
                .child(Definition::element("li"))
                .child(Definition::element("li"))
                .child(Definition::element("li")),
        )
        .expect_err("Expected failure");

    assert_eq!(
        error,
        TemplateError::ChildCountMismatch {
            expected: 2,
            found: 3
        }
    );
}

#[test]
fn test_extend_without_children_skips_child_merge() {
    let mut template = Template::new(
        Definition::element("div")
            .child(Definition::element("span"))
            .child(Definition::element("span")),
    );
    template
        .extend(Definition::behavior().attr("class", "only-attrs"))
        .expect("Failed to extend");
    assert_eq!(template.child_count(), 2);
}

#[test]
fn test_failed_extend_leaves_target_unchanged() {
    let mut template = Template::new(
        Definition::element("div")
            .attr("class", "before")
            .child(Definition::element("span")),
    );
    template
        .extend(
            Definition::behavior()
                .attr("class", "after")
                .child(Definition::element("span"))
                .child(Definition::element("span")),
        )
        .expect_err("Expected failure");

    let node = template.render().expect("Failed to render");
    assert_eq!(node.attribute("class"), Some("before".to_string()));
}

#[test]
fn test_extend_emits_lifecycle_event() {
    let mut template = Template::new(Definition::element("div"));
    let hits = Rc::new(Cell::new(0));
    let counter = hits.clone();
    template.on("extended", move |_| counter.set(counter.get() + 1));

    template.extend(Definition::behavior()).expect("Failed to extend");
    assert_eq!(hits.get(), 1);
}
