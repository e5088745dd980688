#![forbid(unsafe_code)]

//! The action dispatch contract.

/// An intended state change.
///
/// Applications model actions as enums carrying payload fields. The only
/// requirement is a stable `kind` string, which the store uses to route
/// kind-scoped subscriptions. Reducers should treat unknown kinds as
/// no-ops by returning `None`.
///
/// # Example
///
/// ```
/// use frond_core::Action;
///
/// #[derive(Clone, Debug)]
/// enum Todo {
///     Add { title: String },
///     Clear,
/// }
///
/// impl Action for Todo {
///     fn kind(&self) -> &str {
///         match self {
///             Todo::Add { .. } => "add",
///             Todo::Clear => "clear",
///         }
///     }
/// }
/// ```
pub trait Action {
    /// The dispatch key for this action.
    ///
    /// Must be stable for a given variant: two calls on the same value
    /// return the same string.
    fn kind(&self) -> &str;
}

impl<A: Action + ?Sized> Action for &A {
    fn kind(&self) -> &str {
        (**self).kind()
    }
}

impl<A: Action + ?Sized> Action for Box<A> {
    fn kind(&self) -> &str {
        (**self).kind()
    }
}
