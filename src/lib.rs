//! Scrolling Menu - a headless selection-list engine with an animated
//! scrollable viewport, and a terminal front end to drive it.
//!
//! This library provides option building from declarative content, the
//! selection state machine, naive and windowed item rendering, scroll
//! animation, coalesced content mutations and press-and-hold step controls.

pub mod error;
pub mod menu;
pub mod mutation;
pub mod observability;
pub mod render;
pub mod repeat;
pub mod scroll;
pub mod source;
pub mod ui;

pub use error::{MenuError, Result};
pub use menu::{ScrollingMenu, StepControl};
