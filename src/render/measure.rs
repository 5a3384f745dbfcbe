//! Item geometry.

use super::RenderItem;
use crate::menu::attributes::Direction;
use crate::menu::template::Node;
use ratatui::text::Line;

/// Measures a rendered node along a scroll axis.
pub trait Measure {
    fn extent(&self, node: &Node, direction: Direction) -> f64;
}

/// Measures in terminal cells.
///
/// Vertically an item is as tall as its text has lines. Horizontally it is
/// as wide as its widest line plus `gap` cells of spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMeasure {
    pub gap: u16,
}

impl Default for CellMeasure {
    fn default() -> Self {
        Self { gap: 2 }
    }
}

impl Measure for CellMeasure {
    fn extent(&self, node: &Node, direction: Direction) -> f64 {
        let text = node.text_content();
        match direction {
            Direction::Vertical => text.lines().count().max(1) as f64,
            Direction::Horizontal => {
                let width = text
                    .lines()
                    .map(|line| Line::from(line).width())
                    .max()
                    .unwrap_or(0);
                (width + usize::from(self.gap)) as f64
            }
        }
    }
}

/// Render one representative item off-screen, measure it, and discard it.
///
/// Returns `0.0` for an empty list.
pub fn probe_extent(
    render_item: &RenderItem,
    item_count: usize,
    measure: &dyn Measure,
    direction: Direction,
) -> f64 {
    if item_count == 0 {
        return 0.0;
    }
    let probe = render_item(0);
    measure.extent(&probe.node, direction)
}
