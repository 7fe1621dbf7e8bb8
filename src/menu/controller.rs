use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, warn};

use super::focus::{FocusHost, FocusTrap};
use super::table::MenuTable;

/// Why the overlay is being closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    CloseButton,
    EscapeKey,
    Backdrop,
}

/// Raw UI input, before deciding whether it is a valid trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    OpenButton,
    CloseButton,
    Escape { overlay_focused: bool },
    PointerDown { inside_panel: bool },
    ToggleSection(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disclosure {
    #[default]
    Collapsed,
    Expanded,
}

impl Disclosure {
    fn flipped(self) -> Self {
        match self {
            Disclosure::Collapsed => Disclosure::Expanded,
            Disclosure::Expanded => Disclosure::Collapsed,
        }
    }
}

/// State of the mobile overlay for one page mount.
///
/// The overlay is open exactly while a `FocusTrap` is held, so the visibility
/// flag and the trapped focus can never disagree. Section disclosures live
/// alongside and survive open/close cycles; a new controller starts over.
pub struct MenuController<H: FocusHost> {
    host: Rc<H>,
    trap: Option<FocusTrap<H>>,
    sections: HashMap<String, Disclosure>,
}

impl<H: FocusHost> MenuController<H> {
    /// Tables are validated when config loads; a hand-built table with
    /// repeated ids ends up with one shared disclosure per id.
    pub fn new(host: Rc<H>, table: &MenuTable) -> Self {
        if let Err(e) = table.validate() {
            warn!("Menu table is ambiguous: {}", e);
        }
        MenuController {
            host,
            trap: None,
            sections: table
                .section_ids()
                .map(|id| (id.to_string(), Disclosure::Collapsed))
                .collect(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.trap.is_some()
    }

    /// Present the overlay. Returns false if it was already open, in which case
    /// the original focus-restore target is kept.
    pub fn open_menu(&mut self) -> bool {
        if self.trap.is_some() {
            return false;
        }
        self.trap = Some(FocusTrap::acquire(self.host.clone()));
        debug!("Navigation overlay opened");
        true
    }

    /// Hide the overlay, returning focus to wherever it was before opening.
    pub fn close_menu(&mut self, trigger: CloseTrigger) -> bool {
        match self.trap.take() {
            Some(trap) => {
                drop(trap);
                debug!(?trigger, "Navigation overlay closed");
                true
            }
            None => false,
        }
    }

    /// Flip one section's disclosure. Unknown ids are ignored.
    pub fn toggle_section(&mut self, id: &str) -> Option<Disclosure> {
        let state = self.sections.get_mut(id)?;
        *state = state.flipped();
        Some(*state)
    }

    pub fn section(&self, id: &str) -> Option<Disclosure> {
        self.sections.get(id).copied()
    }

    /// Route a UI event. Escape only counts while focus is inside the overlay
    /// and a pointer only counts on the backdrop, outside the panel.
    pub fn handle(&mut self, event: MenuEvent) {
        match event {
            MenuEvent::OpenButton => {
                self.open_menu();
            }
            MenuEvent::CloseButton => {
                self.close_menu(CloseTrigger::CloseButton);
            }
            MenuEvent::Escape {
                overlay_focused: true,
            } => {
                self.close_menu(CloseTrigger::EscapeKey);
            }
            MenuEvent::PointerDown {
                inside_panel: false,
            } => {
                self.close_menu(CloseTrigger::Backdrop);
            }
            MenuEvent::Escape { .. } | MenuEvent::PointerDown { .. } => {}
            MenuEvent::ToggleSection(id) => {
                self.toggle_section(&id);
            }
        }
    }

    /// Tear down with the page. Dropping the controller does the same.
    pub fn unmount(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::focus::test_host::FakeHost;
    use crate::menu::table::MenuSection;

    fn table() -> MenuTable {
        MenuTable {
            sections: ["Product", "Company"]
                .into_iter()
                .map(|id| MenuSection {
                    id: id.to_string(),
                    label: None,
                    entries: vec![],
                })
                .collect(),
            links: vec![],
        }
    }

    fn controller() -> (Rc<FakeHost>, MenuController<FakeHost>) {
        let host = FakeHost::new("menu-button", "close-button");
        let controller = MenuController::new(host.clone(), &table());
        (host, controller)
    }

    #[test]
    fn starts_closed_and_collapsed() {
        let (host, controller) = controller();
        assert!(!controller.is_open());
        assert_eq!(controller.section("Product"), Some(Disclosure::Collapsed));
        assert_eq!(controller.section("Company"), Some(Disclosure::Collapsed));
        assert!(host.released());
    }

    #[test]
    fn open_then_close_round_trips_focus() {
        let (host, mut controller) = controller();

        assert!(controller.open_menu());
        assert!(controller.is_open());
        assert!(host.locked());
        assert_eq!(host.focused_id().as_deref(), Some("close-button"));

        assert!(controller.close_menu(CloseTrigger::CloseButton));
        assert!(!controller.is_open());
        assert!(host.released());
        assert_eq!(host.focused_id().as_deref(), Some("menu-button"));
    }

    #[test]
    fn reopening_keeps_original_restore_target() {
        let (host, mut controller) = controller();
        controller.open_menu();
        host.focus(&"some-link".into());

        assert!(!controller.open_menu());
        controller.close_menu(CloseTrigger::EscapeKey);
        assert_eq!(host.focused_id().as_deref(), Some("menu-button"));
    }

    #[test]
    fn closing_when_closed_is_a_noop() {
        let (host, mut controller) = controller();
        host.focus(&"elsewhere".into());

        assert!(!controller.close_menu(CloseTrigger::Backdrop));
        assert_eq!(host.focused_id().as_deref(), Some("elsewhere"));
    }

    #[test]
    fn toggle_is_an_involution() {
        let (_host, mut controller) = controller();

        assert_eq!(controller.toggle_section("Product"), Some(Disclosure::Expanded));
        assert_eq!(controller.toggle_section("Product"), Some(Disclosure::Collapsed));
        assert_eq!(controller.section("Company"), Some(Disclosure::Collapsed));
    }

    #[test]
    fn unknown_section_is_ignored() {
        let (_host, mut controller) = controller();

        assert_eq!(controller.toggle_section("Pricing"), None);
        assert_eq!(controller.section("Pricing"), None);
        controller.handle(MenuEvent::ToggleSection("Pricing".to_string()));
        assert_eq!(controller.section("Product"), Some(Disclosure::Collapsed));
    }

    #[test]
    fn sections_survive_close_but_not_remount() {
        let (host, mut controller) = controller();
        controller.open_menu();
        controller.toggle_section("Product");
        controller.close_menu(CloseTrigger::CloseButton);
        controller.open_menu();
        assert_eq!(controller.section("Product"), Some(Disclosure::Expanded));

        controller.unmount();
        assert!(host.released());

        let remounted = MenuController::new(host.clone(), &table());
        assert!(!remounted.is_open());
        assert_eq!(remounted.section("Product"), Some(Disclosure::Collapsed));
    }

    #[test]
    fn sections_toggle_independently_of_visibility() {
        let (_host, mut controller) = controller();
        controller.toggle_section("Company");
        assert!(!controller.is_open());
        assert_eq!(controller.section("Company"), Some(Disclosure::Expanded));
    }

    #[test]
    fn dropping_while_open_releases_the_trap() {
        let (host, mut controller) = controller();
        controller.open_menu();
        assert!(host.locked());

        drop(controller);
        assert!(host.released());
        assert_eq!(host.focused_id().as_deref(), Some("menu-button"));
    }

    #[test]
    fn events_only_close_on_valid_triggers() {
        let (host, mut controller) = controller();
        controller.handle(MenuEvent::OpenButton);
        assert!(controller.is_open());

        controller.handle(MenuEvent::PointerDown { inside_panel: true });
        assert!(controller.is_open());
        controller.handle(MenuEvent::Escape {
            overlay_focused: false,
        });
        assert!(controller.is_open());

        controller.handle(MenuEvent::Escape {
            overlay_focused: true,
        });
        assert!(!controller.is_open());

        controller.handle(MenuEvent::OpenButton);
        controller.handle(MenuEvent::PointerDown {
            inside_panel: false,
        });
        assert!(!controller.is_open());

        controller.handle(MenuEvent::OpenButton);
        controller.handle(MenuEvent::CloseButton);
        assert!(!controller.is_open());
        assert!(host.released());
    }
}
