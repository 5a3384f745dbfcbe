//! # UI Module
//!
//! Terminal front end for a single [`crate::menu::ScrollingMenu`].
//!
//! ## Components
//!
//! - [`App`] - wraps the menu, routes keys and mouse input to it
//! - [`mod@render`] - draws the menu at its animated scroll position
//! - [`theme`] - built-in color themes
//! - [`config`] - persisted user settings
//!
//! ## Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                    Header                       │
//! ├─────────────────────────────────────────────────┤
//! │               [ Select Previous ]               │
//! ├─────────────────────────────────────────────────┤
//! │                    Apple                        │
//! │                 ▌ Banana ▐    (selected)        │
//! │                    Cherry                       │
//! ├─────────────────────────────────────────────────┤
//! │                 [ Select Next ]                 │
//! ├─────────────────────────────────────────────────┤
//! │ Footer: status and key hints                    │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! With `direction="horizontal"` the controls sit left and right of the
//! options, which flow along a single row.

pub mod app;
pub mod config;
pub mod render;
pub mod theme;

pub use app::App;
pub use render::render;
