#![forbid(unsafe_code)]

//! Host-event capability used by [`send`](crate::app::AppHandle::send) thunks.

/// An event-like object exposing a "prevent default" capability.
///
/// Thunks returned by [`AppHandle::send`](crate::app::AppHandle::send)
/// invoke [`prevent_default`](UiEvent::prevent_default) on the supplied
/// event before dispatching, unless built with
/// [`send_with`](crate::app::AppHandle::send_with) and the flag off.
/// Host bindings implement this for their native event types.
pub trait UiEvent {
    /// Suppress the host environment's default handling of this event.
    fn prevent_default(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Click {
        defaulted: bool,
    }

    impl UiEvent for Click {
        fn prevent_default(&mut self) {
            self.defaulted = false;
        }
    }

    #[test]
    fn implementors_toggle_default() {
        let mut click = Click { defaulted: true };
        click.prevent_default();
        assert!(!click.defaulted);
    }
}
