#![forbid(unsafe_code)]

//! Core state-management primitives for Frond.
//!
//! This crate provides the action-driven store at the heart of the
//! unidirectional data flow:
//!
//! - [`Action`]: the dispatch contract — every action names its kind, the
//!   sole routing key for scoped subscriptions.
//! - [`Store`]: a shared, single-threaded state cell that applies a pure
//!   reducer on each dispatched action and synchronously fans out change
//!   notifications to subscribers.
//! - [`ConfigError`]: the construction/lifecycle error taxonomy.
//!
//! # Architecture
//!
//! `Store<S, A>` uses `Rc<RefCell<..>>` for single-threaded shared
//! ownership. Subscribers are stored in an ordered wildcard list plus an
//! ordered per-kind map; dispatch snapshots the relevant callbacks before
//! invoking them, so no interior borrow is held while user code runs.
//!
//! # Invariants
//!
//! 1. The reducer never observes a partially updated state: it receives the
//!    previous state by reference and returns an owned next value.
//! 2. A reducer returning `None` leaves the state untouched; subscribers
//!    are still notified with new-state content equal to the old.
//! 3. For one dispatch, wildcard subscribers run before kind-scoped ones;
//!    within each list, registration order.
//! 4. All subscriber callbacks complete before `dispatch` returns.
//! 5. Re-entrant dispatch from inside a callback is permitted and recurses
//!    synchronously; unbounded mutual dispatch is a caller bug.
//! 6. A panic in the reducer or any subscriber propagates out of
//!    `dispatch` unmodified (fail-fast, no isolation between subscribers).

pub mod action;
pub mod error;
pub mod store;

pub use action::Action;
pub use error::{ConfigError, Result};
pub use store::{Store, SubscriberId, WILDCARD};
