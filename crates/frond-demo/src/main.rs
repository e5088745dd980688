#![forbid(unsafe_code)]

//! Server-side rendering demo: an action-driven page built through the
//! markup backend, with state changes logged as they happen.
//!
//! Run with: cargo run -p frond-demo

use frond::prelude::*;
use frond_render::{MarkupBackend, MarkupNode};
use tracing::info;

#[derive(Clone, Debug)]
enum PageAction {
    Example,
    Title(String),
}

impl Action for PageAction {
    fn kind(&self) -> &str {
        match self {
            PageAction::Example => "example",
            PageAction::Title(_) => "title",
        }
    }
}

#[derive(Clone, Debug, Default)]
struct PageState {
    example: bool,
    title: String,
}

fn modifier(action: &PageAction, state: &PageState) -> Option<PageState> {
    match action {
        PageAction::Example => Some(PageState {
            example: true,
            ..state.clone()
        }),
        PageAction::Title(title) => Some(PageState {
            title: title.clone(),
            ..state.clone()
        }),
    }
}

fn page(state: &PageState) -> MarkupNode {
    MarkupNode::element(
        ".app",
        vec![],
        vec![
            MarkupNode::element("h1", vec![], vec![MarkupNode::text(state.title.clone())])
                .expect("static selector"),
        ],
    )
    .expect("static selector")
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut app = App::new(MarkupBackend);
    let mut app = app.start(
        modifier,
        PageState {
            example: false,
            title: "My web page title".into(),
        },
    )?;

    // Caller-mounted mode: the markup backend hands back the serialized
    // page for the server response.
    let html = app
        .render(page)?
        .into_artifact()
        .expect("markup backend is caller-mounted");
    println!("{html}");

    app.on(WILDCARD, |action: &PageAction, new: &PageState, _old| {
        info!(kind = action.kind(), state = ?new, "state changed");
    });
    app.on("title", |_action, new: &PageState, _old| {
        info!(title = %new.title, "page has a new title");
    });

    app.dispatch(PageAction::Example);
    app.dispatch(PageAction::Title("awesome example".into()));

    // A fresh page for the next request would reflect the new state.
    println!("{}", page(&app.state()).to_html());
    Ok(())
}
