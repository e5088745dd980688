#![forbid(unsafe_code)]

//! The app façade: compose a store with a render loop behind four
//! operations — `start`, `on`, `h`, `send`.
//!
//! # Lifecycle
//!
//! ```text
//! App::new(backend)              caller-mounted
//! App::with_container(c, b)      host-mounted
//!        │ start(reducer, initial)        one-shot
//!        ▼
//! AppHandle ── render(build) ── one-shot, wires the live-update
//!        │                      subscription on interactive backends
//!        ├── on / off           store subscriptions
//!        ├── dispatch           apply an action now
//!        └── send               build a dispatch thunk for event handlers
//! ```
//!
//! # Invariants
//!
//! 1. Constructing an `App` has no side effects; nothing happens until
//!    `start`.
//! 2. `start` clones the caller's initial state; the façade never mutates
//!    caller-supplied values.
//! 3. The initial render reflects the state captured at `start`,
//!    regardless of dispatches before or after `render`.
//! 4. After `render` on an interactive backend, every dispatch produces
//!    exactly one `TreeLoop::update`, synchronously within the dispatch.
//!    Non-interactive backends never receive `update`.
//! 5. `start` and `render` are one-shot; repeats fail with
//!    [`ConfigError::AlreadyStarted`] / [`ConfigError::AlreadyRendered`].

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use frond_core::{Action, ConfigError, Result, Store, SubscriberId, WILDCARD};
use frond_render::{Backend, MountTarget, TreeLoop};

use crate::event::UiEvent;

/// An application bound to a rendering backend, not yet started.
pub struct App<B: Backend> {
    backend: Rc<B>,
    container: Option<Box<dyn MountTarget<B::Artifact>>>,
    started: bool,
}

impl<B: Backend> App<B> {
    /// Caller-mounted mode: `render` returns the initial artifact and
    /// mounting (or serialization) is the caller's business.
    pub fn new(backend: B) -> Self {
        Self {
            backend: Rc::new(backend),
            container: None,
            started: false,
        }
    }

    /// Host-mounted mode: `render` mounts the initial artifact into
    /// `container`.
    pub fn with_container(container: impl MountTarget<B::Artifact> + 'static, backend: B) -> Self {
        Self {
            backend: Rc::new(backend),
            container: Some(Box::new(container)),
            started: false,
        }
    }

    /// The backend's tree-node constructor, re-exposed so applications
    /// need not import the backend separately.
    pub fn h(&self, selector: &str, attrs: B::Attrs, children: Vec<B::Node>) -> B::Node {
        self.backend.node(selector, attrs, children)
    }

    /// Shared access to the rendering backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Bind a reducer and initial state, producing the started handle.
    ///
    /// One-shot: a second call on the same instance fails with
    /// [`ConfigError::AlreadyStarted`]. The initial state is cloned; the
    /// caller's value is never mutated.
    pub fn start<S, A>(
        &mut self,
        reducer: impl Fn(&A, &S) -> Option<S> + 'static,
        initial: S,
    ) -> Result<AppHandle<B, S, A>>
    where
        S: Clone + 'static,
        A: Action + 'static,
    {
        if self.started {
            return Err(ConfigError::AlreadyStarted);
        }
        self.started = true;
        debug!("app started");
        Ok(AppHandle {
            backend: Rc::clone(&self.backend),
            store: Store::new(reducer, initial.clone()),
            initial,
            container: self.container.take(),
            rendered: false,
        })
    }
}

/// Result of [`AppHandle::render`].
#[derive(Debug)]
pub enum Rendered<T> {
    /// Host-mounted mode: the artifact went into the container.
    Mounted,
    /// Caller-mounted mode: the initial artifact, for the caller to mount
    /// or serialize.
    Artifact(T),
}

impl<T> Rendered<T> {
    /// The artifact, if rendering ran in caller-mounted mode.
    #[must_use]
    pub fn into_artifact(self) -> Option<T> {
        match self {
            Rendered::Mounted => None,
            Rendered::Artifact(artifact) => Some(artifact),
        }
    }
}

/// A started application: store plus (after [`render`](Self::render)) a
/// live tree.
pub struct AppHandle<B: Backend, S, A> {
    backend: Rc<B>,
    store: Store<S, A>,
    initial: S,
    container: Option<Box<dyn MountTarget<B::Artifact>>>,
    rendered: bool,
}

impl<B: Backend, S, A> core::fmt::Debug for AppHandle<B, S, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppHandle")
            .field("rendered", &self.rendered)
            .finish_non_exhaustive()
    }
}

impl<B, S, A> AppHandle<B, S, A>
where
    B: Backend,
    S: Clone + 'static,
    A: Action + 'static,
{
    /// Produce the initial artifact and wire live updates.
    ///
    /// Creates the backend's tree loop over the state captured at `start`
    /// and renders it once. On interactive backends a wildcard store
    /// subscription is registered that pushes every new state into
    /// `TreeLoop::update` — at most one tree update per dispatch, applied
    /// synchronously within the dispatch. Non-interactive backends skip
    /// the subscription entirely: there is nothing to patch.
    ///
    /// One-shot: a second call fails with
    /// [`ConfigError::AlreadyRendered`].
    pub fn render(&mut self, build: impl Fn(&S) -> B::Node + 'static) -> Result<Rendered<B::Artifact>> {
        if self.rendered {
            return Err(ConfigError::AlreadyRendered);
        }
        self.rendered = true;

        let mut tree = self.backend.tree_loop(&self.initial, Box::new(build));
        let artifact = tree.render();

        if self.backend.interactive() {
            let tree = Rc::new(RefCell::new(tree));
            self.store.on(WILDCARD, move |_action, new_state, _old_state| {
                tree.borrow_mut().update(new_state);
            });
        }

        debug!(
            interactive = self.backend.interactive(),
            host_mounted = self.container.is_some(),
            "initial render"
        );

        match self.container.as_mut() {
            Some(container) => {
                container.mount(artifact);
                Ok(Rendered::Mounted)
            }
            None => Ok(Rendered::Artifact(artifact)),
        }
    }

    /// Register a subscriber for [`WILDCARD`] or a specific action kind.
    pub fn on(&self, kind: &str, callback: impl Fn(&A, &S, &S) + 'static) -> SubscriberId {
        self.store.on(kind, callback)
    }

    /// Remove a subscription registered with [`on`](Self::on).
    pub fn off(&self, id: SubscriberId) -> bool {
        self.store.off(id)
    }

    /// Apply an action now: reduce, install the new state, notify
    /// subscribers (and the live tree), all before returning.
    pub fn dispatch(&self, action: A) {
        self.store.dispatch(action);
    }

    /// A handle to the underlying store (shares state with this app).
    #[must_use]
    pub fn store(&self) -> Store<S, A> {
        self.store.clone()
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> S {
        self.store.state()
    }

    /// The backend's tree-node constructor.
    pub fn h(&self, selector: &str, attrs: B::Attrs, children: Vec<B::Node>) -> B::Node {
        self.backend.node(selector, attrs, children)
    }

    /// Build an event-handler thunk that dispatches a fixed action.
    ///
    /// When invoked with an event, the event's default handling is
    /// suppressed first. Use [`send_with`](Self::send_with) to keep the
    /// default.
    pub fn send(&self, action: A) -> impl Fn(Option<&mut dyn UiEvent>)
    where
        A: Clone,
    {
        self.send_with(action, true)
    }

    /// Like [`send`](Self::send), with explicit control over whether the
    /// thunk calls [`UiEvent::prevent_default`] on the supplied event.
    pub fn send_with(&self, action: A, prevent_default: bool) -> impl Fn(Option<&mut dyn UiEvent>)
    where
        A: Clone,
    {
        let store = self.store.clone();
        move |event: Option<&mut dyn UiEvent>| {
            if prevent_default {
                if let Some(event) = event {
                    event.prevent_default();
                }
            }
            store.dispatch(action.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
