#![forbid(unsafe_code)]

//! The backend capability contract.
//!
//! # Invariants
//!
//! 1. `Backend::node` is pure construction: no side effects, no retained
//!    references to the backend.
//! 2. `TreeLoop::render` is called at most once by the façade; it produces
//!    the initial displayable artifact.
//! 3. `TreeLoop::update` recomputes the tree from the build callback and
//!    patches the live artifact in place. Backends that have no live
//!    artifact (server-side serialization) report `interactive() == false`
//!    and never receive `update` calls from the façade.

/// Tree-construction callback supplied by the application:
/// `(state) -> Node`.
pub type BuildTree<S, N> = Box<dyn Fn(&S) -> N>;

/// A live tree handle produced by [`Backend::tree_loop`].
pub trait TreeLoop<S> {
    /// The displayable artifact type (a root node handle, a string of
    /// markup, a frame buffer — backend's choice).
    type Artifact;

    /// Produce the initial displayable artifact.
    fn render(&mut self) -> Self::Artifact;

    /// Recompute the tree for `state` and patch the displayed artifact.
    fn update(&mut self, state: &S);
}

/// A rendering backend: tree-node construction plus tree lifecycle.
pub trait Backend: 'static {
    /// Attribute/options payload accepted by [`node`](Backend::node).
    type Attrs;
    /// Virtual tree node type. Opaque to the façade.
    type Node;
    /// Displayable artifact type shared with `Self::Loop`.
    type Artifact;
    /// The tree-loop handle this backend produces.
    type Loop<S: Clone + 'static>: TreeLoop<S, Artifact = Self::Artifact> + 'static;

    /// The `h` primitive: build a tree node from a selector, attributes,
    /// and children.
    fn node(&self, selector: &str, attrs: Self::Attrs, children: Vec<Self::Node>) -> Self::Node;

    /// Create a live tree loop over `initial` and the build callback.
    fn tree_loop<S: Clone + 'static>(
        &self,
        initial: &S,
        build: BuildTree<S, Self::Node>,
    ) -> Self::Loop<S>;

    /// Whether a live artifact exists to patch. Non-interactive backends
    /// (server-side serialization) return `false`, which tells the façade
    /// to skip wiring the live-update subscription.
    fn interactive(&self) -> bool {
        true
    }
}

/// A host-environment mount point for the initial rendered artifact.
pub trait MountTarget<Artifact> {
    /// Attach the artifact to the host environment.
    fn mount(&mut self, artifact: Artifact);
}

/// Adapter turning a closure into a [`MountTarget`].
pub struct MountFn<F>(pub F);

impl<Artifact, F: FnMut(Artifact)> MountTarget<Artifact> for MountFn<F> {
    fn mount(&mut self, artifact: Artifact) {
        (self.0)(artifact);
    }
}
