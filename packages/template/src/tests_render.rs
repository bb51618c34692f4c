/// Rendering test suite
/// Covers node creation, apply mode, shape fidelity, and error cases
use crate::*;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use weft_dom::NodeRef;

struct FakeComponent {
    node: NodeRef,
}

impl VisualComponent for FakeComponent {
    fn node(&self) -> NodeRef {
        self.node.clone()
    }
}

struct FakeCollection {
    items: Vec<NodeRef>,
    parent: RefCell<Option<NodeRef>>,
}

impl VisualComponentCollection for FakeCollection {
    fn nodes(&self) -> Vec<NodeRef> {
        self.items.clone()
    }

    fn set_parent(&self, parent: &NodeRef) {
        *self.parent.borrow_mut() = Some(parent.clone());
    }
}

#[test]
fn test_render_end_to_end_paragraph() {
    let definition = Definition::from_json(&json!({
        "tag": "p",
        "attributes": { "class": ["foo"] },
        "children": ["hello"],
    }));
    let node = Template::new(definition).render().expect("Failed to render");

    assert_eq!(node.tag().as_deref(), Some("p"));
    assert_eq!(node.attribute("class"), Some("foo".to_string()));
    assert_eq!(node.child_count(), 1);
    let child = node.child(0).expect("missing child");
    assert!(child.is_text());
    assert_eq!(child.text_content(), "hello");
}

#[test]
fn test_render_nested_shape_matches_definition() {
    let template = Template::new(
        Definition::element("div")
            .attr("id", "root")
            .child(
                Definition::element("span")
                    .attr("class", vec!["a".into(), "b".into()])
                    .child("first"),
            )
            .child(Definition::element("span").child("second")),
    );
    let node = template.render().expect("Failed to render");

    assert_eq!(node.child_count(), 2);
    assert_eq!(
        node.child(0).expect("missing child").attribute("class"),
        Some("a b".to_string())
    );
    assert_eq!(node.child(1).expect("missing child").text_content(), "second");
}

#[test]
fn test_render_element_in_namespace() {
    let template = Template::new(
        Definition::element_ns("svg", "http://www.w3.org/2000/svg")
            .attr("href", AttrValue::namespaced("xlink", "#icon")),
    );
    let node = template.render().expect("Failed to render");

    assert_eq!(
        node.namespace().as_deref(),
        Some("http://www.w3.org/2000/svg")
    );
    assert_eq!(
        node.attribute_ns(Some("xlink"), "href"),
        Some("#icon".to_string())
    );
    assert_eq!(node.attribute("href"), None);
}

#[test]
fn test_render_text_node_concatenates_literals_directly() {
    let template = Template::new(Definition::text_parts(vec!["hello ".into(), "world".into()]));
    let node = template.render().expect("Failed to render");

    assert!(node.is_text());
    assert_eq!(node.text_content(), "hello world");
}

#[test]
fn test_render_with_both_tag_and_text_fails() {
    let mut definition = Definition::element("p");
    definition.text = Some(TextValue::One("oops".into()));
    let error = Template::new(definition).render().expect_err("Expected failure");
    assert!(matches!(error, TemplateError::InvalidDefinition { .. }));
}

#[test]
fn test_render_with_neither_tag_nor_text_fails() {
    let error = Template::new(Definition::behavior())
        .render()
        .expect_err("Expected failure");
    assert!(matches!(error, TemplateError::InvalidDefinition { .. }));
}

#[test]
fn test_apply_without_target_fails() {
    let template = Template::new(Definition::element("div"));
    let error = template.apply(None).expect_err("Expected failure");
    assert!(matches!(error, TemplateError::MissingTarget));
}

#[test]
fn test_apply_with_both_tag_and_text_fails() {
    let mut definition = Definition::element("p");
    definition.text = Some(TextValue::One("oops".into()));
    let template = Template::new(definition);
    let target = NodeRef::element("p");
    let error = template.apply(Some(&target)).expect_err("Expected failure");
    assert!(matches!(error, TemplateError::InvalidDefinition { .. }));
}

#[test]
fn test_apply_wires_existing_tree_without_creating_nodes() {
    let existing = NodeRef::element("div");
    let text = NodeRef::text("old");
    existing.append_child(&text).expect("Failed to append");

    let template = Template::new(
        Definition::element("div")
            .attr("class", "applied")
            .child(Definition::text("new")),
    );
    let returned = template.apply(Some(&existing)).expect("Failed to apply");

    assert!(returned.ptr_eq(&existing));
    assert_eq!(existing.child_count(), 1);
    assert!(existing.child(0).expect("missing child").ptr_eq(&text));
    assert_eq!(existing.attribute("class"), Some("applied".to_string()));
    assert_eq!(text.text_content(), "new");
}

#[test]
fn test_apply_with_neither_tag_nor_text_attaches_behavior() {
    let existing = NodeRef::element("button");
    let template = Template::new(Definition::behavior().attr("class", "wired"));
    template.apply(Some(&existing)).expect("Failed to apply");
    assert_eq!(existing.attribute("class"), Some("wired".to_string()));
}

#[test]
fn test_render_appends_component_and_collection_nodes() {
    let component = Rc::new(FakeComponent {
        node: NodeRef::element("header"),
    });
    let collection = Rc::new(FakeCollection {
        items: vec![NodeRef::element("li"), NodeRef::element("li")],
        parent: RefCell::new(None),
    });

    let template = Template::new(
        Definition::element("ul")
            .child(ChildDef::Component(component.clone()))
            .child(ChildDef::Collection(collection.clone())),
    );
    let node = template.render().expect("Failed to render");

    assert_eq!(node.child_count(), 3);
    assert!(node.child(0).expect("missing child").ptr_eq(&component.node));
    assert!(node.child(1).expect("missing child").ptr_eq(&collection.items[0]));
    let parent = collection.parent.borrow();
    assert!(parent.as_ref().expect("collection was not told its parent").ptr_eq(&node));
}

#[test]
fn test_apply_passes_over_component_slots() {
    let component_node = NodeRef::element("header");
    let text = NodeRef::text("old");
    let existing = NodeRef::element("div");
    existing.append_child(&component_node).expect("Failed to append");
    existing.append_child(&text).expect("Failed to append");

    let component = Rc::new(FakeComponent {
        node: component_node.clone(),
    });
    let template = Template::new(
        Definition::element("div")
            .child(ChildDef::Component(component))
            .child(Definition::text("patched")),
    );
    template.apply(Some(&existing)).expect("Failed to apply");

    // Component slot untouched, template slot applied by position.
    assert_eq!(component_node.attribute("class"), None);
    assert_eq!(text.text_content(), "patched");
}

#[test]
fn test_template_emits_lifecycle_events() {
    let template = Template::new(Definition::element("div"));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    template.on("rendered", move |_| log.borrow_mut().push("rendered"));

    template.render().expect("Failed to render");
    assert_eq!(*seen.borrow(), vec!["rendered"]);
}

#[test]
fn test_snapshot_of_rendered_tree() {
    let template = Template::new(
        Definition::element("p")
            .attr("class", "foo")
            .child("hello"),
    );
    let node = template.render().expect("Failed to render");

    assert_eq!(
        node.to_json(),
        json!({
            "type": "Element",
            "tag": "p",
            "attributes": { "class": "foo" },
            "styles": {},
            "children": [{ "type": "Text", "content": "hello" }],
        })
    );
}
