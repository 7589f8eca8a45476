//! State and re-render cycle tests

use std::cell::RefCell;
use std::rc::Rc;

use wisp::{
    children, h, App, Props, RenderSource, StateHandle, StateSetter, UiResult, VChild, VNode,
};

fn counter(app: &App) -> UiResult<VNode> {
    let (count, set_count) = app.use_state(0i64);
    let n = count.get();
    h(
        "div",
        Props::new(),
        children![
            h("span", Props::new().attr("id", "value"), children![n])?,
            h(
                "button",
                Props::new()
                    .attr("id", "increment")
                    .on("onClick", move |_| set_count.set(n + 1)),
                children!["+"],
            )?,
        ],
    )
}

fn click(app: &App, id: &str) {
    let node = app.get_element_by_id(id).expect("target rendered");
    app.dispatch(node, "click").unwrap();
}

fn value_text(app: &App) -> String {
    let node = app.get_element_by_id("value").expect("value rendered");
    app.text_content(node)
}

#[test]
fn test_counter_three_increments() {
    let app = App::new("about:blank");
    app.mount(RenderSource::component(counter), app.body())
        .unwrap();

    assert_eq!(value_text(&app), "0");
    let passes = app.render_count();

    for _ in 0..3 {
        click(&app, "increment");
    }

    assert_eq!(value_text(&app), "3");
    // One full pass per setter call, no batching
    assert_eq!(app.render_count(), passes + 3);
}

#[test]
fn test_set_equal_value_still_rerenders() {
    let grabbed: Rc<RefCell<Option<StateSetter<i64>>>> = Rc::new(RefCell::new(None));
    let g = grabbed.clone();

    let app = App::new("about:blank");
    app.mount(
        RenderSource::component(move |app: &App| {
            let (count, set_count) = app.use_state(5i64);
            *g.borrow_mut() = Some(set_count);
            h("p", Props::new(), children![count.get()])
        }),
        app.body(),
    )
    .unwrap();

    let set_count = grabbed.borrow().clone().unwrap();
    let passes = app.render_count();

    set_count.set(5).unwrap();
    set_count.set(5).unwrap();

    assert_eq!(app.inner_html(app.body()), "<p>5</p>");
    assert_eq!(app.render_count(), passes + 2);
}

type TwoSlots = (
    StateHandle<String>,
    StateSetter<String>,
    StateHandle<i64>,
    StateSetter<i64>,
);

#[test]
fn test_two_slot_stability() {
    let grabbed: Rc<RefCell<Option<TwoSlots>>> = Rc::new(RefCell::new(None));
    let g = grabbed.clone();

    let app = App::new("about:blank");
    app.mount(
        RenderSource::component(move |app: &App| {
            let (a, set_a) = app.use_state("first".to_string());
            let (b, set_b) = app.use_state(10i64);
            let tree = h("p", Props::new(), children![a.get(), "/", b.get()]);
            *g.borrow_mut() = Some((a, set_a, b, set_b));
            tree
        }),
        app.body(),
    )
    .unwrap();

    let (a, set_a, b, set_b) = grabbed.borrow().clone().unwrap();
    assert_eq!(app.inner_html(app.body()), "<p>first/10</p>");

    set_a.set("changed".to_string()).unwrap();
    assert_eq!(a.get(), "changed");
    assert_eq!(b.get(), 10);
    assert_eq!(app.inner_html(app.body()), "<p>changed/10</p>");

    set_b.set(11).unwrap();
    assert_eq!(a.get(), "changed");
    assert_eq!(b.get(), 11);
    assert_eq!(app.inner_html(app.body()), "<p>changed/11</p>");
}

#[test]
fn test_initial_value_ignored_after_first_pass() {
    // The initial argument changes every pass; the stored value wins
    let pass = Rc::new(RefCell::new(0i64));
    let p = pass.clone();

    let app = App::new("about:blank");
    app.mount(
        RenderSource::component(move |app: &App| {
            *p.borrow_mut() += 1;
            let (count, _) = app.use_state(*p.borrow() * 100);
            h("p", Props::new(), children![count.get()])
        }),
        app.body(),
    )
    .unwrap();

    assert_eq!(app.inner_html(app.body()), "<p>100</p>");
    app.rerender().unwrap();
    app.rerender().unwrap();
    assert_eq!(app.inner_html(app.body()), "<p>100</p>");
}

#[test]
fn test_nested_set_runs_to_completion() {
    let app = App::new("about:blank");
    app.mount(
        RenderSource::component(|app: &App| {
            let (count, set_count) = app.use_state(0i64);
            let n = count.get();
            let set_twice = set_count.clone();
            h(
                "button",
                Props::new()
                    .attr("id", "twice")
                    .on("onClick", move |_| {
                        // Each set is its own complete pass
                        set_twice.set(n + 1)?;
                        set_twice.set(n + 42)
                    }),
                children![n],
            )
        }),
        app.body(),
    )
    .unwrap();

    let passes = app.render_count();
    click(&app, "twice");

    assert_eq!(app.text_content(app.body()), "42");
    assert_eq!(app.render_count(), passes + 2);
}

#[test]
fn test_listener_attach_detach_symmetry() {
    let grabbed: Rc<RefCell<Option<StateSetter<usize>>>> = Rc::new(RefCell::new(None));
    let g = grabbed.clone();

    let app = App::new("about:blank");
    app.mount(
        RenderSource::component(move |app: &App| {
            let (count, set_count) = app.use_state(2usize);
            *g.borrow_mut() = Some(set_count.clone());
            let n = count.get();
            let mut items = Vec::new();
            for i in 0..n {
                let set = set_count.clone();
                items.push(VChild::from(h(
                    "button",
                    Props::new().on("onClick", move |_| set.set(i)),
                    children![i],
                )?));
            }
            h("div", Props::new(), children![items])
        }),
        app.body(),
    )
    .unwrap();

    assert_eq!(app.attached_listener_count("click"), 2);
    assert_eq!(app.total_attached_listeners(), 2);

    let set_count = grabbed.borrow().clone().unwrap();
    set_count.set(5).unwrap();
    assert_eq!(app.attached_listener_count("click"), 5);
    assert_eq!(app.total_attached_listeners(), 5);

    set_count.set(1).unwrap();
    assert_eq!(app.attached_listener_count("click"), 1);

    set_count.set(0).unwrap();
    assert_eq!(app.attached_listener_count("click"), 0);
    assert_eq!(app.total_attached_listeners(), 0);
}

#[test]
fn test_mount_over_listeners_cleans_up() {
    let app = App::new("about:blank");
    app.mount(
        RenderSource::component(|app: &App| {
            let (_, set) = app.use_state(0i64);
            h(
                "button",
                Props::new().on("onClick", move |_| set.set(1)),
                children!["x"],
            )
        }),
        app.body(),
    )
    .unwrap();
    assert_eq!(app.total_attached_listeners(), 1);

    // Remounting a handler-free tree leaves nothing attached
    app.mount(
        h("p", Props::new(), children!["quiet"]).unwrap(),
        app.body(),
    )
    .unwrap();
    assert_eq!(app.total_attached_listeners(), 0);
}

#[test]
fn test_keyed_state_survives_rerenders() {
    let grabbed: Rc<RefCell<Option<StateSetter<String>>>> = Rc::new(RefCell::new(None));
    let g = grabbed.clone();

    let app = App::new("about:blank");
    app.mount(
        RenderSource::component(move |app: &App| {
            let (name, set_name) = app.use_keyed_state("user", "anon".to_string());
            *g.borrow_mut() = Some(set_name);
            h("p", Props::new(), children![name.get()])
        }),
        app.body(),
    )
    .unwrap();

    assert_eq!(app.inner_html(app.body()), "<p>anon</p>");

    let set_name = grabbed.borrow().clone().unwrap();
    set_name.set("ada".to_string()).unwrap();
    assert_eq!(app.inner_html(app.body()), "<p>ada</p>");

    app.rerender().unwrap();
    assert_eq!(app.inner_html(app.body()), "<p>ada</p>");
}
