#![forbid(unsafe_code)]

//! Render-loop and backend capability contracts for Frond.
//!
//! The app façade never touches diffing internals; it talks to a rendering
//! backend through two narrow seams:
//!
//! - [`Backend`]: tree-node construction (`h`) and tree-loop creation.
//! - [`TreeLoop`]: the live tree handle — `render()` once for the initial
//!   artifact, `update()` on every state change.
//!
//! Host-mounted deployments additionally supply a [`MountTarget`] that
//! receives the initial artifact.
//!
//! Any virtual-tree-diffing engine can sit behind these traits. The
//! [`markup`] module ships a reference backend that serializes trees to an
//! HTML string for server-side rendering; it performs no diffing and
//! reports itself as non-interactive.

pub mod backend;
pub mod markup;

pub use backend::{Backend, BuildTree, MountFn, MountTarget, TreeLoop};
pub use markup::{MarkupBackend, MarkupLoop, MarkupNode, Selector, parse_selector};
