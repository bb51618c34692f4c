/// Binding test suite
/// Covers live attribute/text/style synchronization, conditional
/// collapse, event relay, selector filtering, and teardown
use crate::*;
use serde_json::json;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use weft_dom::NodeRef;
use weft_reactive::{ListenerOwner, Observable};

fn setup() -> (Rc<Observable>, Rc<ListenerOwner>, Bind) {
    let source = Observable::new();
    let owner = ListenerOwner::new();
    let factory = bind(&source, &owner);
    (source, owner, factory)
}

#[test]
fn test_bound_text_follows_attribute_changes() {
    let (source, _owner, factory) = setup();
    source.set("title", "first");

    let template = Template::new(Definition::text(factory.to("title")));
    let node = template.render().expect("Failed to render");
    assert_eq!(node.text_content(), "first");

    source.set("title", "second");
    assert_eq!(node.text_content(), "second");
}

#[test]
fn test_repeated_unchanged_notification_is_stable() {
    let (source, _owner, factory) = setup();
    source.set("title", "same");

    let template = Template::new(Definition::text(factory.to("title")));
    let node = template.render().expect("Failed to render");

    let before = node.to_json();
    source.set("title", "same");
    source.set("title", "same");
    assert_eq!(node.to_json(), before);
}

#[test]
fn test_bound_attribute_mixes_with_literals() {
    let (source, _owner, factory) = setup();
    source.set("state", "active");

    let template = Template::new(
        Definition::element("div")
            .attr("class", vec!["card".into(), factory.to("state").into()]),
    );
    let node = template.render().expect("Failed to render");
    assert_eq!(node.attribute("class"), Some("card active".to_string()));

    // A falsy bound value drops out of the aggregate without a
    // dangling separator.
    source.set("state", "");
    assert_eq!(node.attribute("class"), Some("card".to_string()));
}

#[test]
fn test_binding_subscribes_even_when_initially_falsy() {
    let (source, _owner, factory) = setup();

    let template = Template::new(Definition::element("div").attr("class", factory.to("state")));
    let node = template.render().expect("Failed to render");
    assert_eq!(node.attribute("class"), None);

    source.set("state", "late");
    assert_eq!(node.attribute("class"), Some("late".to_string()));
}

#[test]
fn test_mirror_transform_applies() {
    let (source, _owner, factory) = setup();
    source.set("width", 10);

    let template = Template::new(Definition::element("div").attr(
        "data-width",
        factory.to_with("width", |value, _| json!(format!("{}px", value))),
    ));
    let node = template.render().expect("Failed to render");
    assert_eq!(node.attribute("data-width"), Some("10px".to_string()));

    source.set("width", 20);
    assert_eq!(node.attribute("data-width"), Some("20px".to_string()));
}

#[test]
fn test_transform_receives_the_rendered_node() {
    let (source, _owner, factory) = setup();
    source.set("state", "on");
    let seen_node = Rc::new(Cell::new(false));
    let witness = seen_node.clone();

    let template = Template::new(Definition::element("div").attr(
        "class",
        factory.to_with("state", move |value, node| {
            witness.set(node.is_some());
            value.clone()
        }),
    ));
    template.render().expect("Failed to render");
    assert!(seen_node.get());
}

#[test]
fn test_conditional_marker_attribute() {
    let (source, _owner, factory) = setup();
    source.set("busy", true);

    let template = Template::new(Definition::element("div").attr("disabled", factory.when("busy")));
    let node = template.render().expect("Failed to render");
    assert_eq!(node.attribute("disabled"), Some("true".to_string()));

    source.set("busy", false);
    assert_eq!(node.attribute("disabled"), None);
}

#[test]
fn test_conditional_zero_counts_as_truthy() {
    let (source, _owner, factory) = setup();
    source.set("count", 0);

    let template = Template::new(Definition::element("div").attr("data-set", factory.when("count")));
    let node = template.render().expect("Failed to render");
    assert_eq!(node.attribute("data-set"), Some("true".to_string()));
}

#[test]
fn test_conditional_falsy_values_remove_attribute() {
    let (source, _owner, factory) = setup();
    source.set("flag", "yes");

    let template = Template::new(
        Definition::element("div").attr("data-flag", factory.when_value("flag", "present")),
    );
    let node = template.render().expect("Failed to render");
    assert_eq!(node.attribute("data-flag"), Some("present".to_string()));

    for falsy in [json!(""), json!(null), json!(false)] {
        source.set("flag", "reset");
        source.set("flag", falsy);
        assert_eq!(node.attribute("data-flag"), None);
    }
}

#[test]
fn test_style_object_with_independent_bound_property() {
    let (source, _owner, factory) = setup();

    let template = Template::new(
        Definition::element("div")
            .style("color", "red")
            .style("width", factory.to("width")),
    );
    let node = template.render().expect("Failed to render");

    assert_eq!(node.style("color"), Some("red".to_string()));
    assert_eq!(node.style("width"), None);

    source.set("width", "10px");
    assert_eq!(node.style("width"), Some("10px".to_string()));
    assert_eq!(node.style("color"), Some("red".to_string()));

    source.set("width", "");
    assert_eq!(node.style("width"), None);
    assert_eq!(node.style("color"), Some("red".to_string()));
}

#[test]
fn test_event_callback_without_selector_always_fires() {
    let (_source, _owner, factory) = setup();
    let hits = Rc::new(Cell::new(0));
    let counter = hits.clone();

    let template = Template::new(Definition::element("button").on(
        "click",
        factory.callback(move |_| counter.set(counter.get() + 1)),
    ));
    let node = template.render().expect("Failed to render");

    node.emit("click", json!({}));
    node.emit("click", json!({}));
    assert_eq!(hits.get(), 2);
}

#[test]
fn test_event_listener_with_selector_filters_by_target() {
    let (_source, _owner, factory) = setup();
    let hits = Rc::new(Cell::new(0));
    let counter = hits.clone();

    let template = Template::new(
        Definition::element("div")
            .child(Definition::element("button").attr("class", "primary"))
            .child(Definition::element("button").attr("class", "secondary"))
            .on(
                "click@.primary",
                factory.callback(move |_| counter.set(counter.get() + 1)),
            ),
    );
    let node = template.render().expect("Failed to render");

    let primary = node.child(0).expect("missing child");
    let secondary = node.child(1).expect("missing child");

    primary.emit("click", json!({}));
    assert_eq!(hits.get(), 1);
    secondary.emit("click", json!({}));
    assert_eq!(hits.get(), 1);
}

#[test]
fn test_event_binding_re_emits_on_the_source() {
    let (source, _owner, factory) = setup();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    source.subscribe_event("pressed", move |payload| log.borrow_mut().push(payload.clone()));

    let template =
        Template::new(Definition::element("button").on("click", factory.event("pressed")));
    let node = template.render().expect("Failed to render");

    node.emit("click", json!({ "x": 4 }));
    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0]["event"], json!("click"));
    assert_eq!(seen[0]["payload"], json!({ "x": 4 }));
}

#[test]
fn test_fanout_is_per_binding() {
    let (source, _owner, factory) = setup();

    let template = Template::new(
        Definition::element("div")
            .attr("class", factory.to("state"))
            .attr("data-state", factory.to("state")),
    );
    template.render().expect("Failed to render");
    assert_eq!(source.attribute_listener_count("state"), 2);
}

#[test]
fn test_teardown_stops_updates() {
    let (source, owner, factory) = setup();
    source.set("title", "alive");

    let template = Template::new(Definition::text(factory.to("title")));
    let node = template.render().expect("Failed to render");
    assert_eq!(node.text_content(), "alive");

    owner.teardown();
    source.set("title", "after");
    assert_eq!(node.text_content(), "alive");
    assert_eq!(source.attribute_listener_count("title"), 0);
}
