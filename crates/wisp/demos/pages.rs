//! Routing demo: two pages, navigation, and history back/forward.

use wisp::{children, h, App, Props, RenderSource, UiResult, VNode};

fn home(_app: &App) -> UiResult<VNode> {
    h(
        "div",
        Props::new(),
        children![
            h("h1", Props::new(), children!["Home"])?,
            h("p", Props::new(), children!["Welcome."])?,
        ],
    )
}

fn about(_app: &App) -> UiResult<VNode> {
    h(
        "div",
        Props::new(),
        children![h("h1", Props::new(), children!["About"])?],
    )
}

fn main() -> UiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let app = App::new("https://pages.local/");
    app.add_route("/", RenderSource::component(home))?;
    app.add_route("/about", RenderSource::component(about))?;
    app.mount(
        RenderSource::component(|app: &App| app.router_view()),
        app.body(),
    )?;
    println!("{:>10}: {}", app.current_route(), app.inner_html(app.body()));

    app.navigate("/about")?;
    println!("{:>10}: {}", app.current_route(), app.inner_html(app.body()));

    app.navigate("/missing")?;
    println!("{:>10}: {}", app.current_route(), app.inner_html(app.body()));

    app.history_back()?;
    println!("back  -> {}: {}", app.current_route(), app.inner_html(app.body()));

    app.history_forward()?;
    println!("fwd   -> {}: {}", app.current_route(), app.inner_html(app.body()));

    Ok(())
}
