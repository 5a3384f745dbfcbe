//! # Renderer
//!
//! Materializes the option list into presentational items. Two strategies sit
//! behind the [`Renderer`] trait:
//!
//! - [`NaiveRenderer`] renders every item on each structural change. Items
//!   may have different extents; positions are prefix sums.
//! - [`WindowedRenderer`] keeps only the items that intersect the viewport
//!   (plus overscan) and a spacer sized to the full scrollable extent. Every
//!   item is assumed to have the extent measured on a probe item.
//!
//! ```text
//!   offset 0 ┌──────────────┐
//!            │   item 0     │  not materialized (windowed)
//!            ├──────────────┤
//!   scroll → │   item 1     │ ┐
//!            ├──────────────┤ │ viewport
//!            │   item 2     │ ┘
//!            ├──────────────┤
//!            │   item 3     │  not materialized (windowed)
//!            └──────────────┘ ← spacer extent = count × item extent
//! ```
//!
//! Re-initializing replaces the whole item collection at once; the
//! [`Renderer::generation`] counter lets callers notice the swap.

pub mod measure;
pub mod naive;
pub mod windowed;

pub use measure::{probe_extent, CellMeasure, Measure};
pub use naive::NaiveRenderer;
pub use windowed::WindowedRenderer;

use crate::menu::attributes::Direction;
use crate::menu::template::Node;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Styling hooks exposed to external presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Decrement,
    Increment,
    OptionsContainer,
    Option,
    DisabledOption,
    SelectedOption,
}

impl Part {
    pub fn as_str(self) -> &'static str {
        match self {
            Part::Decrement => "decrement",
            Part::Increment => "increment",
            Part::OptionsContainer => "options-container",
            Part::Option => "option",
            Part::DisabledOption => "disabled-option",
            Part::SelectedOption => "selected-option",
        }
    }
}

/// Content produced for one item before the renderer places it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemContent {
    pub node: Node,
    pub disabled: bool,
}

/// Callback producing the content of the item at an index.
pub type RenderItem = Rc<dyn Fn(usize) -> ItemContent>;

/// A materialized item.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedItem {
    pub index: usize,
    /// Offset of the item's leading edge along the scroll axis.
    pub offset: f64,
    pub extent: f64,
    pub node: Node,
    pub disabled: bool,
    pub selected: bool,
}

impl RenderedItem {
    pub fn label(&self) -> String {
        self.node.text_content()
    }

    pub fn parts(&self) -> Vec<Part> {
        let mut parts = vec![Part::Option];
        if self.disabled {
            parts.push(Part::DisabledOption);
        }
        if self.selected {
            parts.push(Part::SelectedOption);
        }
        parts
    }

    pub fn has_part(&self, part: Part) -> bool {
        self.parts().contains(&part)
    }
}

/// Which rendering strategy a menu uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    #[default]
    Naive,
    Windowed,
}

impl RendererKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RendererKind::Naive => "naive",
            RendererKind::Windowed => "windowed",
        }
    }
}

/// Strategy interface for turning the option list into rendered items.
pub trait Renderer {
    fn kind(&self) -> RendererKind;

    /// Replace every rendered item. `item_extent` is the probed per-item
    /// extent; strategies that measure each item may ignore it.
    fn initialize(&mut self, item_count: usize, item_extent: f64, render_item: RenderItem);

    /// Drop every rendered item and the item callback.
    fn destroy(&mut self);

    fn is_initialized(&self) -> bool;

    /// Scroll offset at which the item at `index` starts.
    fn position_of(&self, index: usize) -> f64;

    fn extent_of(&self, index: usize) -> f64;

    /// Extent of the whole list along the scroll axis.
    fn total_extent(&self) -> f64;

    /// Move the selected marker without re-rendering content.
    fn set_selected(&mut self, index: Option<usize>);

    /// Report the current scroll offset and viewport size.
    fn update_viewport(&mut self, offset: f64, viewport_extent: f64);

    /// Currently materialized items in index order.
    fn items(&self) -> &[RenderedItem];

    /// Incremented every time the item collection is replaced.
    fn generation(&self) -> u64;

    fn set_direction(&mut self, _direction: Direction) {}

    /// Whether cross-axis alignment can be applied to this strategy's items.
    fn supports_alignment(&self) -> bool;
}

/// Build the renderer for a strategy.
pub fn renderer_for(kind: RendererKind, measure: Rc<dyn Measure>) -> Box<dyn Renderer> {
    match kind {
        RendererKind::Naive => Box::new(NaiveRenderer::new(measure)),
        RendererKind::Windowed => Box::new(WindowedRenderer::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(disabled: bool, selected: bool) -> RenderedItem {
        RenderedItem {
            index: 0,
            offset: 0.0,
            extent: 1.0,
            node: Node::text("x"),
            disabled,
            selected,
        }
    }

    #[test]
    fn test_parts_reflect_state() {
        assert_eq!(item(false, false).parts(), vec![Part::Option]);
        assert_eq!(
            item(true, true).parts(),
            vec![Part::Option, Part::DisabledOption, Part::SelectedOption]
        );
        assert!(item(false, true).has_part(Part::SelectedOption));
    }

    #[test]
    fn test_part_names() {
        assert_eq!(Part::OptionsContainer.as_str(), "options-container");
        assert_eq!(Part::DisabledOption.as_str(), "disabled-option");
    }
}
