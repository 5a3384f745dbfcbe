//! # Menu Module
//!
//! The scrolling menu engine: option model, selection state machine,
//! attribute surface, projection templates, notifications, and the
//! [`ScrollingMenu`] facade that drives the renderer and scroll animator.
//!
//! ## Components
//!
//! - [`option`] - builds the option list from declarative descriptors
//! - [`selection`] - the selection index and its transition rules
//! - [`attributes`] - validated configuration (`direction`, `disabled`, ...)
//! - [`template`] - per-item projection with `{{label}}`/`{{value}}`
//! - [`events`] - `input`/`change` notifications
//! - [`widget`] - [`ScrollingMenu`], which composes all of the above

pub mod attributes;
pub mod events;
pub mod option;
pub mod selection;
pub mod template;
pub mod widget;

pub use attributes::{AlignItems, Direction, MenuAttributes};
pub use events::{EventKind, MenuEvent, MenuId};
pub use option::{build_options, MenuOption, OptionDescriptor};
pub use selection::{IndexValue, SelectionState};
pub use widget::{ScrollingMenu, StepControl};
