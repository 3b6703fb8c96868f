//! Planner services: the plan window, the menu catalog and their shared
//! infrastructure. No rendering and no direct file access.

pub mod aggregation;
pub mod calendar;
pub mod menu_catalog;
pub mod observable;
pub mod plan_window;

pub use calendar::{Calendar, FixedCalendar, SystemCalendar};
pub use menu_catalog::{MenuAddition, MenuCatalog, MenuRejection};
pub use observable::{Observable, Subscription};
pub use plan_window::{PlanWindow, SlotChange, WindowChange, DEFAULT_WINDOW_DAYS};
