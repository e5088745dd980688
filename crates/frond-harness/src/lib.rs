#![forbid(unsafe_code)]

//! Test harness and reference fixtures for Frond.
//!
//! Provides an instrumented rendering backend and mount target for
//! exercising the app façade without a real host environment:
//!
//! - [`RecordingBackend`]: nodes are plain strings, every backend call is
//!   appended to a shared [`Trace`].
//! - [`MountProbe`]: a [`MountTarget`] that collects mounted artifacts.
//!
//! The trace is the assertion surface: tests dispatch actions and then
//! check exactly which `render`/`update` calls the façade produced.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use frond_render::{Backend, BuildTree, MountTarget, TreeLoop};

/// One observed backend call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProbeEvent {
    /// `Backend::node` ran for this selector.
    Node { selector: String },
    /// `Backend::tree_loop` created a loop.
    LoopCreated,
    /// `TreeLoop::render` produced this artifact.
    Render(String),
    /// `TreeLoop::update` rebuilt to this artifact.
    Update(String),
}

/// Shared, ordered log of backend activity.
#[derive(Clone, Default)]
pub struct Trace {
    events: Rc<RefCell<Vec<ProbeEvent>>>,
}

impl Trace {
    fn push(&self, event: ProbeEvent) {
        self.events.borrow_mut().push(event);
    }

    /// All events observed so far, in order.
    #[must_use]
    pub fn events(&self) -> Vec<ProbeEvent> {
        self.events.borrow().clone()
    }

    /// Artifacts passed to `TreeLoop::update`, in order.
    #[must_use]
    pub fn updates(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                ProbeEvent::Update(artifact) => Some(artifact.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of `TreeLoop::render` calls observed.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| matches!(event, ProbeEvent::Render(_)))
            .count()
    }

    /// Discard all recorded events.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

/// An instrumented backend whose nodes are `"selector(child,child)"`
/// strings and whose loop calls are recorded in a [`Trace`].
pub struct RecordingBackend {
    interactive: bool,
    trace: Trace,
}

impl RecordingBackend {
    /// A backend that reports itself interactive (live updates wired).
    #[must_use]
    pub fn live() -> Self {
        Self {
            interactive: true,
            trace: Trace::default(),
        }
    }

    /// A backend that reports itself non-interactive (server-style).
    #[must_use]
    pub fn server() -> Self {
        Self {
            interactive: false,
            trace: Trace::default(),
        }
    }

    /// Handle to this backend's trace; clones share the log.
    #[must_use]
    pub fn trace(&self) -> Trace {
        self.trace.clone()
    }
}

/// Tree loop for [`RecordingBackend`].
pub struct RecordingLoop<S> {
    state: S,
    build: BuildTree<S, String>,
    trace: Trace,
}

impl<S: Clone + 'static> TreeLoop<S> for RecordingLoop<S> {
    type Artifact = String;

    fn render(&mut self) -> String {
        let artifact = (self.build)(&self.state);
        self.trace.push(ProbeEvent::Render(artifact.clone()));
        artifact
    }

    fn update(&mut self, state: &S) {
        self.state = state.clone();
        let rebuilt = (self.build)(&self.state);
        self.trace.push(ProbeEvent::Update(rebuilt));
    }
}

impl Backend for RecordingBackend {
    type Attrs = Vec<(String, String)>;
    type Node = String;
    type Artifact = String;
    type Loop<S: Clone + 'static> = RecordingLoop<S>;

    fn node(&self, selector: &str, attrs: Self::Attrs, children: Vec<String>) -> String {
        trace!(selector, "probe node");
        self.trace.push(ProbeEvent::Node {
            selector: selector.to_owned(),
        });
        let mut out = selector.to_owned();
        for (name, value) in &attrs {
            out.push_str(&format!("[{name}={value}]"));
        }
        out.push('(');
        out.push_str(&children.join(","));
        out.push(')');
        out
    }

    fn tree_loop<S: Clone + 'static>(
        &self,
        initial: &S,
        build: BuildTree<S, String>,
    ) -> RecordingLoop<S> {
        self.trace.push(ProbeEvent::LoopCreated);
        RecordingLoop {
            state: initial.clone(),
            build,
            trace: self.trace.clone(),
        }
    }

    fn interactive(&self) -> bool {
        self.interactive
    }
}

/// A mount target that collects every mounted artifact.
#[derive(Clone, Default)]
pub struct MountProbe {
    mounted: Rc<RefCell<Vec<String>>>,
}

impl MountProbe {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Artifacts mounted so far, in order.
    #[must_use]
    pub fn mounted(&self) -> Vec<String> {
        self.mounted.borrow().clone()
    }
}

impl MountTarget<String> for MountProbe {
    fn mount(&mut self, artifact: String) {
        self.mounted.borrow_mut().push(artifact);
    }
}
