use super::{ItemContent, Measure, RenderItem, RenderedItem, Renderer, RendererKind};
use crate::menu::attributes::Direction;
use std::rc::Rc;

/// Renders every item up front. Suited to short lists.
pub struct NaiveRenderer {
    measure: Rc<dyn Measure>,
    direction: Direction,
    items: Vec<RenderedItem>,
    selected: Option<usize>,
    total: f64,
    initialized: bool,
    generation: u64,
}

impl std::fmt::Debug for NaiveRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NaiveRenderer")
            .field("direction", &self.direction)
            .field("items", &self.items.len())
            .field("total", &self.total)
            .field("generation", &self.generation)
            .finish()
    }
}

impl NaiveRenderer {
    pub fn new(measure: Rc<dyn Measure>) -> Self {
        Self {
            measure,
            direction: Direction::default(),
            items: Vec::new(),
            selected: None,
            total: 0.0,
            initialized: false,
            generation: 0,
        }
    }
}

impl Renderer for NaiveRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::Naive
    }

    fn initialize(&mut self, item_count: usize, _item_extent: f64, render_item: RenderItem) {
        let selected = self.selected;
        let mut offset = 0.0;
        let items: Vec<RenderedItem> = (0..item_count)
            .map(|index| {
                let ItemContent { node, disabled } = render_item(index);
                let extent = self.measure.extent(&node, self.direction);
                let item = RenderedItem {
                    index,
                    offset,
                    extent,
                    node,
                    disabled,
                    selected: selected == Some(index),
                };
                offset += extent;
                item
            })
            .collect();

        // swap in the complete collection at once
        self.items = items;
        self.total = offset;
        self.initialized = true;
        self.generation += 1;
    }

    fn destroy(&mut self) {
        self.items.clear();
        self.total = 0.0;
        self.initialized = false;
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn position_of(&self, index: usize) -> f64 {
        self.items.get(index).map_or(0.0, |item| item.offset)
    }

    fn extent_of(&self, index: usize) -> f64 {
        self.items.get(index).map_or(0.0, |item| item.extent)
    }

    fn total_extent(&self) -> f64 {
        self.total
    }

    fn set_selected(&mut self, index: Option<usize>) {
        self.selected = index;
        for item in &mut self.items {
            item.selected = Some(item.index) == index;
        }
    }

    fn update_viewport(&mut self, _offset: f64, _viewport_extent: f64) {}

    fn items(&self) -> &[RenderedItem] {
        &self.items
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    fn supports_alignment(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::template::Node;
    use crate::render::CellMeasure;

    fn labels() -> RenderItem {
        let labels = ["a", "bbb", "cc"];
        Rc::new(move |i| ItemContent {
            node: Node::text(labels[i]),
            disabled: i == 1,
        })
    }

    #[test]
    fn test_materializes_every_item() {
        let mut renderer = NaiveRenderer::new(Rc::new(CellMeasure::default()));
        renderer.initialize(3, 0.0, labels());
        assert_eq!(renderer.items().len(), 3);
        assert!(renderer.items()[1].disabled);
        assert_eq!(renderer.generation(), 1);
    }

    #[test]
    fn test_horizontal_positions_are_prefix_sums() {
        let mut renderer = NaiveRenderer::new(Rc::new(CellMeasure { gap: 1 }));
        renderer.set_direction(Direction::Horizontal);
        renderer.initialize(3, 0.0, labels());
        assert_eq!(renderer.position_of(0), 0.0);
        assert_eq!(renderer.position_of(1), 2.0);
        assert_eq!(renderer.position_of(2), 6.0);
        assert_eq!(renderer.total_extent(), 9.0);
    }

    #[test]
    fn test_selected_marker_moves_and_survives_rerender() {
        let mut renderer = NaiveRenderer::new(Rc::new(CellMeasure::default()));
        renderer.initialize(3, 0.0, labels());
        renderer.set_selected(Some(2));
        renderer.initialize(3, 0.0, labels());
        let selected: Vec<usize> = renderer
            .items()
            .iter()
            .filter(|i| i.selected)
            .map(|i| i.index)
            .collect();
        assert_eq!(selected, vec![2]);
    }

    #[test]
    fn test_destroy_clears_items() {
        let mut renderer = NaiveRenderer::new(Rc::new(CellMeasure::default()));
        renderer.initialize(3, 0.0, labels());
        renderer.destroy();
        assert!(renderer.items().is_empty());
        assert!(!renderer.is_initialized());
    }
}
