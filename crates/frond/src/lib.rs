#![forbid(unsafe_code)]

//! Frond public façade.
//!
//! Frond is a minimal unidirectional state-management wrapper around a
//! virtual-tree rendering backend: actions flow through a pure reducer
//! into a store, and every state change feeds the new state into a render
//! loop that diffs against the previous tree.
//!
//! The four operations an application touches are [`App::start`],
//! [`AppHandle::on`], [`App::h`], and [`AppHandle::send`].
//!
//! # Example
//!
//! ```
//! use frond::prelude::*;
//! use frond_render::{MarkupBackend, MarkupNode};
//!
//! #[derive(Clone)]
//! enum Msg {
//!     Title(String),
//! }
//!
//! impl Action for Msg {
//!     fn kind(&self) -> &str {
//!         "title"
//!     }
//! }
//!
//! #[derive(Clone, Default)]
//! struct State {
//!     title: String,
//! }
//!
//! let mut app = App::new(MarkupBackend);
//! let mut app = app
//!     .start(
//!         |msg: &Msg, _state: &State| match msg {
//!             Msg::Title(title) => Some(State {
//!                 title: title.clone(),
//!             }),
//!         },
//!         State { title: "hello".into() },
//!     )
//!     .unwrap();
//!
//! let page = app
//!     .render(|state| {
//!         MarkupNode::element("h1", vec![], vec![MarkupNode::text(state.title.clone())]).unwrap()
//!     })
//!     .unwrap();
//! assert_eq!(page.into_artifact().unwrap(), "<h1>hello</h1>");
//! ```

pub mod app;
pub mod event;

pub use app::{App, AppHandle, Rendered};
pub use event::UiEvent;

pub use frond_core::{Action, ConfigError, Result, Store, SubscriberId, WILDCARD};
pub use frond_render::{Backend, BuildTree, MountFn, MountTarget, TreeLoop};

/// Convenient imports for applications.
pub mod prelude {
    pub use crate::app::{App, AppHandle, Rendered};
    pub use crate::event::UiEvent;
    pub use frond_core::{Action, ConfigError, Result, Store, SubscriberId, WILDCARD};
    pub use frond_render::{Backend, MountFn, MountTarget, TreeLoop};
}
