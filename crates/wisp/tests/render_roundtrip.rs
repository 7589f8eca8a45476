//! Round-trip rendering tests
//!
//! A virtual tree with no handlers, rendered into an empty container,
//! reads back with the same tags, attributes, and text in the same
//! order.

use wisp::{children, h, App, Props, UiError, UiResult, VChild, VNode};

fn page() -> UiResult<VNode> {
    let items = vec![
        VChild::from(h("li", Props::new(), children!["one"])?),
        VChild::from(h("li", Props::new(), children!["two"])?),
    ];
    h(
        "div",
        Props::new().attr("class", "page").attr("id", "root"),
        children![
            h("h1", Props::new(), children!["Title"])?,
            h("ul", Props::new(), children![items])?,
            "tail text",
        ],
    )
}

#[test]
fn test_round_trip_structure() {
    let app = App::new("about:blank");
    app.mount(page().unwrap(), app.body()).unwrap();

    assert_eq!(
        app.inner_html(app.body()),
        "<div class=\"page\" id=\"root\"><h1>Title</h1><ul><li>one</li><li>two</li></ul>tail text</div>"
    );
    assert_eq!(app.text_content(app.body()), "Titleonetwotail text");
}

#[test]
fn test_render_returns_created_root() {
    let app = App::new("about:blank");
    let root = app.render(&page().unwrap(), app.body()).unwrap();

    app.with_document(|doc| {
        assert_eq!(doc.tag_name(root), Some("div"));
        assert_eq!(doc.get(root).unwrap().parent, doc.body());
    });
}

#[test]
fn test_text_primitive_renders_as_text_node() {
    let app = App::new("about:blank");
    let node = app.render(&VNode::text("plain words"), app.body()).unwrap();

    assert_eq!(app.inner_html(app.body()), "plain words");
    app.with_document(|doc| {
        assert_eq!(doc.get(node).unwrap().as_text(), Some("plain words"));
    });
}

#[test]
fn test_number_children_become_text() {
    let app = App::new("about:blank");
    let node = h("span", Props::new(), children![7i64, " and ", 0.25f64]).unwrap();
    app.mount(node, app.body()).unwrap();

    assert_eq!(app.inner_html(app.body()), "<span>7 and 0.25</span>");
}

#[test]
fn test_children_flattened_one_level_only() {
    // A list inside a list is not deep-flattened; rendering rejects it
    let inner = vec![VChild::from("x")];
    let outer = vec![VChild::from(inner)];
    let node = h("div", Props::new(), children![outer]).unwrap();

    let app = App::new("about:blank");
    let result = app.mount(node, app.body());
    assert!(matches!(result, Err(UiError::InvalidArgument { .. })));
}

#[test]
fn test_mount_replaces_existing_content() {
    let app = App::new("about:blank");
    app.mount(
        h("p", Props::new(), children!["first"]).unwrap(),
        app.body(),
    )
    .unwrap();
    app.mount(
        h("p", Props::new(), children!["second"]).unwrap(),
        app.body(),
    )
    .unwrap();

    assert_eq!(app.inner_html(app.body()), "<p>second</p>");
}

#[test]
fn test_rerender_without_mount_is_noop() {
    let app = App::new("about:blank");
    app.rerender().unwrap();

    assert_eq!(app.render_count(), 0);
    assert_eq!(app.inner_html(app.body()), "");
}

#[test]
fn test_rerender_rebuilds_from_scratch() {
    let app = App::new("about:blank");
    app.mount(
        h("p", Props::new(), children!["stable"]).unwrap(),
        app.body(),
    )
    .unwrap();

    let before = app.elements_by_tag(app.body(), "p");
    app.rerender().unwrap();
    let after = app.elements_by_tag(app.body(), "p");

    // Same content, brand-new real node
    assert_eq!(app.inner_html(app.body()), "<p>stable</p>");
    assert_eq!(before.len(), 1);
    assert_eq!(after.len(), 1);
    assert_eq!(app.render_count(), 2);
}
