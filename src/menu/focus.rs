use std::rc::Rc;

use tracing::trace;

/// Identifier of a focusable element in the rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId(pub String);

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        ElementId(id.to_string())
    }
}

/// The rendering host the overlay drives. Methods take `&self`; hosts are
/// single-threaded UI handles and keep their own interior state.
pub trait FocusHost {
    fn focused_element(&self) -> Option<ElementId>;
    fn first_focusable_in_overlay(&self) -> Option<ElementId>;
    fn focus(&self, element: &ElementId);
    /// Inert background content ignores pointer, keyboard and focus.
    fn set_background_inert(&self, inert: bool);
    fn set_scroll_locked(&self, locked: bool);
}

/// Focus trap and scroll lock held while the overlay is open.
///
/// Acquiring it traps focus inside the overlay; dropping it, on close or when
/// the owning controller goes away, gives everything back.
pub struct FocusTrap<H: FocusHost> {
    host: Rc<H>,
    restore_to: Option<ElementId>,
}

impl<H: FocusHost> FocusTrap<H> {
    pub fn acquire(host: Rc<H>) -> Self {
        let restore_to = host.focused_element();
        host.set_background_inert(true);
        host.set_scroll_locked(true);
        if let Some(first) = host.first_focusable_in_overlay() {
            host.focus(&first);
        }
        trace!(?restore_to, "Focus trap acquired");
        FocusTrap { host, restore_to }
    }
}

impl<H: FocusHost> Drop for FocusTrap<H> {
    fn drop(&mut self) {
        self.host.set_scroll_locked(false);
        self.host.set_background_inert(false);
        if let Some(element) = self.restore_to.take() {
            self.host.focus(&element);
        }
        trace!("Focus trap released");
    }
}


#[cfg(test)]
mod tests {
    use super::test_host::FakeHost;
    use super::*;

    #[test]
    fn acquire_traps_and_drop_restores() {
        let host = FakeHost::new("menu-button", "close-button");

        let trap = FocusTrap::acquire(host.clone());
        assert!(host.locked());
        assert_eq!(host.focused_id().as_deref(), Some("close-button"));
        host.focus(&"some-link".into());

        drop(trap);
        assert!(host.released());
        assert_eq!(host.focused_id().as_deref(), Some("menu-button"));
    }

    #[test]
    fn nothing_focused_before_open_leaves_focus_alone_on_release() {
        let host = Rc::new(FakeHost {
            overlay_first: Some("close-button".into()),
            ..FakeHost::default()
        });

        drop(FocusTrap::acquire(host.clone()));
        assert!(host.released());
        assert_eq!(host.focused_id().as_deref(), Some("close-button"));
    }
}
