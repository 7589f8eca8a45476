//! Counter demo: mounts a counter component and simulates clicks.
//!
//! Run with `RUST_LOG=wisp=debug cargo run --example counter` to see
//! the render passes.

use wisp::{children, h, App, Props, RenderSource, UiResult, VNode};

fn counter(app: &App) -> UiResult<VNode> {
    let (count, set_count) = app.use_state(0i64);
    let n = count.get();
    h(
        "div",
        Props::new().attr("class", "counter"),
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

fn main() -> UiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let app = App::new("https://counter.local/");
    app.mount(RenderSource::component(counter), app.body())?;
    println!("initial:        {}", app.inner_html(app.body()));

    for _ in 0..3 {
        // Node ids change every pass, so re-find the button each time
        if let Some(button) = app.get_element_by_id("increment") {
            app.dispatch(button, "click")?;
        }
    }

    println!("after 3 clicks: {}", app.inner_html(app.body()));
    println!("render passes:  {}", app.render_count());
    Ok(())
}
