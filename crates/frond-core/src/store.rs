#![forbid(unsafe_code)]

//! The synchronous, event-emitting store.
//!
//! # Design
//!
//! [`Store<S, A>`] pairs a mutable state cell with a pure reducer and two
//! subscriber collections: an ordered wildcard list and an ordered
//! per-kind map. [`dispatch`](Store::dispatch) runs the reducer, installs
//! the next state, then fans out `(action, new_state, old_state)` to every
//! matching subscriber before returning.
//!
//! Cloning a `Store` creates a new handle to the **same** inner state,
//! mirroring the shared-ownership model of reactive observables.
//!
//! # Invariants
//!
//! 1. State is replaced, never mutated in place: the reducer receives
//!    `&S` and returns an owned `Option<S>`.
//! 2. `None` from the reducer means "no change"; subscribers still fire
//!    with new content equal to the old.
//! 3. Notification order per dispatch: wildcard subscribers in
//!    registration order, then subscribers scoped to `action.kind()` in
//!    registration order.
//! 4. No interior borrow is held while a subscriber runs, so a callback
//!    may re-enter `dispatch` (synchronous recursion).
//! 5. Subscribers registered or removed *during* a dispatch take effect
//!    from the next dispatch; the in-flight fan-out uses the snapshot
//!    taken when it began.
//!
//! # Failure Modes
//!
//! - **Reducer panics**: the state is left at its previous value and no
//!   subscriber fires for that dispatch.
//! - **Subscriber panics**: the state update has already been installed;
//!   remaining subscribers for that dispatch are skipped (fail-fast, no
//!   isolation), and the panic propagates to the dispatching caller.

use std::cell::RefCell;
use std::rc::Rc;

use ahash::AHashMap;
use tracing::trace;

use crate::action::Action;

/// Event key matching every dispatched action.
pub const WILDCARD: &str = "*";

/// Callback signature for store subscribers: `(action, new_state, old_state)`.
pub type SubscriberFn<S, A> = dyn Fn(&A, &S, &S);

/// Handle for removing a subscription registered with [`Store::on`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

struct Subscriber<S, A> {
    id: u64,
    callback: Rc<SubscriberFn<S, A>>,
}

struct StoreInner<S, A> {
    state: S,
    reducer: Rc<dyn Fn(&A, &S) -> Option<S>>,
    wildcard: Vec<Subscriber<S, A>>,
    scoped: AHashMap<String, Vec<Subscriber<S, A>>>,
    next_id: u64,
}

/// A single-threaded action-dispatching state cell.
///
/// # Example
///
/// ```
/// use frond_core::{Action, Store};
///
/// #[derive(Clone)]
/// struct Bump;
///
/// impl Action for Bump {
///     fn kind(&self) -> &str {
///         "bump"
///     }
/// }
///
/// let store = Store::new(|_: &Bump, count: &u32| Some(count + 1), 0u32);
/// store.dispatch(Bump);
/// store.dispatch(Bump);
/// assert_eq!(store.state(), 2);
/// ```
pub struct Store<S, A> {
    inner: Rc<RefCell<StoreInner<S, A>>>,
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: std::fmt::Debug, A> std::fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Store")
            .field("state", &inner.state)
            .field("wildcard_subscribers", &inner.wildcard.len())
            .field("scoped_kinds", &inner.scoped.len())
            .finish()
    }
}

impl<S: Clone + 'static, A: Action + 'static> Store<S, A> {
    /// Create a store bound to a reducer and an initial state.
    ///
    /// The reducer is pure: `(action, previous) -> Option<next>`. Return
    /// `None` for actions the reducer does not recognize.
    pub fn new(reducer: impl Fn(&A, &S) -> Option<S> + 'static, initial: S) -> Self {
        Self {
            inner: Rc::new(RefCell::new(StoreInner {
                state: initial,
                reducer: Rc::new(reducer),
                wildcard: Vec::new(),
                scoped: AHashMap::new(),
                next_id: 0,
            })),
        }
    }

    /// Apply an action and synchronously notify subscribers.
    ///
    /// Runs the reducer against the current state, installs the result
    /// (or keeps the state on `None`), then invokes every wildcard
    /// subscriber followed by every subscriber scoped to `action.kind()`,
    /// each receiving `(&action, &new_state, &old_state)`. All callbacks
    /// complete before this returns.
    pub fn dispatch(&self, action: A) {
        let (reducer, old_state) = {
            let inner = self.inner.borrow();
            (Rc::clone(&inner.reducer), inner.state.clone())
        };

        // The reducer runs without any interior borrow held; a panic here
        // leaves the previous state installed.
        let new_state = match reducer(&action, &old_state) {
            Some(next) => next,
            None => old_state.clone(),
        };

        let subscribers: Vec<Rc<SubscriberFn<S, A>>> = {
            let mut inner = self.inner.borrow_mut();
            inner.state = new_state.clone();
            let scoped = inner.scoped.get(action.kind());
            inner
                .wildcard
                .iter()
                .chain(scoped.into_iter().flatten())
                .map(|sub| Rc::clone(&sub.callback))
                .collect()
        };

        trace!(
            kind = action.kind(),
            subscribers = subscribers.len(),
            "dispatch"
        );

        for callback in subscribers {
            callback(&action, &new_state, &old_state);
        }
    }

    /// Register a subscriber for [`WILDCARD`] or a specific action kind.
    ///
    /// Multiple subscriptions per key are allowed; they are invoked in
    /// registration order. The returned id can be passed to
    /// [`off`](Store::off).
    pub fn on(&self, kind: &str, callback: impl Fn(&A, &S, &S) + 'static) -> SubscriberId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let subscriber = Subscriber {
            id,
            callback: Rc::new(callback),
        };
        if kind == WILDCARD {
            inner.wildcard.push(subscriber);
        } else {
            inner
                .scoped
                .entry(kind.to_owned())
                .or_default()
                .push(subscriber);
        }
        trace!(kind, id, "subscribe");
        SubscriberId(id)
    }

    /// Remove a subscription. Returns `false` if the id is unknown or was
    /// already removed.
    pub fn off(&self, id: SubscriberId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.wildcard.len();
        inner.wildcard.retain(|sub| sub.id != id.0);
        if inner.wildcard.len() != before {
            trace!(id = id.0, "unsubscribe");
            return true;
        }
        for subscribers in inner.scoped.values_mut() {
            let before = subscribers.len();
            subscribers.retain(|sub| sub.id != id.0);
            if subscribers.len() != before {
                trace!(id = id.0, "unsubscribe");
                return true;
            }
        }
        false
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> S {
        self.inner.borrow().state.clone()
    }

    /// Access the current state by reference without cloning.
    ///
    /// # Panics
    ///
    /// Panics if the closure re-enters the store mutably (e.g. calls
    /// `dispatch` on the same store).
    pub fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.borrow().state)
    }

    /// Number of live subscriptions for a key ([`WILDCARD`] or a kind).
    #[must_use]
    pub fn subscriber_count(&self, kind: &str) -> usize {
        let inner = self.inner.borrow();
        if kind == WILDCARD {
            inner.wildcard.len()
        } else {
            inner.scoped.get(kind).map_or(0, Vec::len)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
