//! Primary navigation: the shared link table plus the state machine behind
//! the mobile overlay.
//!
//! Desktop dropdowns and the mobile overlay render the same `MenuTable`; only
//! the overlay carries state, owned by one `MenuController` per mount.

mod controller;
mod focus;
mod table;

pub use controller::{CloseTrigger, Disclosure, MenuController, MenuEvent};
pub use focus::{ElementId, FocusHost, FocusTrap};
pub use table::{MenuEntry, MenuLink, MenuSection, MenuTable, RenderedMenu, RenderedSection};
