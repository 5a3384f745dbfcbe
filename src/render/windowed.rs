use super::{ItemContent, RenderItem, RenderedItem, Renderer, RendererKind};
use std::ops::Range;
use virtualizer::{Virtualizer, VirtualizerOptions};

/// Extra items materialized on each side of the viewport.
pub const DEFAULT_OVERSCAN: usize = 2;

/// Renders only the items intersecting the viewport.
///
/// Range math is delegated to a [`Virtualizer`] sized with the probed
/// extent, so every item is `item_extent` long and `position_of(i)` is
/// `i * item_extent`. The virtualizer's total size is the spacer standing in
/// for the full list.
pub struct WindowedRenderer {
    render_item: Option<RenderItem>,
    virtualizer: Option<Virtualizer>,
    item_extent: u32,
    overscan: usize,
    offset: f64,
    viewport: f64,
    visible: Range<usize>,
    items: Vec<RenderedItem>,
    selected: Option<usize>,
    generation: u64,
}

impl std::fmt::Debug for WindowedRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowedRenderer")
            .field("item_count", &self.item_count())
            .field("item_extent", &self.item_extent)
            .field("visible", &self.visible)
            .field("generation", &self.generation)
            .finish()
    }
}

impl Default for WindowedRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowedRenderer {
    pub fn new() -> Self {
        Self::with_overscan(DEFAULT_OVERSCAN)
    }

    pub fn with_overscan(overscan: usize) -> Self {
        Self {
            render_item: None,
            virtualizer: None,
            item_extent: 0,
            overscan,
            offset: 0.0,
            viewport: 0.0,
            visible: 0..0,
            items: Vec::new(),
            selected: None,
            generation: 0,
        }
    }

    fn item_count(&self) -> usize {
        self.virtualizer.as_ref().map_or(0, Virtualizer::count)
    }

    /// Extent of the off-screen spacer representing the whole list.
    pub fn spacer_extent(&self) -> f64 {
        self.virtualizer
            .as_ref()
            .map_or(0.0, |v| v.total_size() as f64)
    }

    /// Index range currently materialized.
    pub fn visible_range(&self) -> Range<usize> {
        self.visible.clone()
    }

    /// Feed the current scroll window to the virtualizer. Fractional offsets
    /// widen the window to every cell they touch.
    fn sync_viewport(&mut self) {
        let Some(virtualizer) = self.virtualizer.as_mut() else {
            return;
        };
        let start = self.offset.max(0.0).floor();
        let end = (self.offset.max(0.0) + self.viewport.max(0.0)).ceil();
        let size = u32::try_from((end - start) as u64).unwrap_or(u32::MAX);
        virtualizer.set_viewport_and_scroll(size, start as u64);
    }

    fn compute_range(&self) -> Range<usize> {
        let Some(virtualizer) = self.virtualizer.as_ref() else {
            return 0..0;
        };
        if self.item_extent == 0 {
            // nothing to window against; fall back to everything
            return 0..virtualizer.count();
        }
        let range = virtualizer.virtual_range();
        range.start_index..range.end_index.max(range.start_index)
    }

    fn materialize(&mut self, range: Range<usize>) {
        let (Some(render_item), Some(virtualizer)) =
            (self.render_item.as_ref(), self.virtualizer.as_ref())
        else {
            self.items.clear();
            self.visible = 0..0;
            return;
        };

        let items: Vec<RenderedItem> = range
            .clone()
            .map(|index| {
                let ItemContent { node, disabled } = render_item(index);
                RenderedItem {
                    index,
                    offset: virtualizer.item_start(index).unwrap_or(0) as f64,
                    extent: f64::from(self.item_extent),
                    node,
                    disabled,
                    selected: self.selected == Some(index),
                }
            })
            .collect();

        self.items = items;
        self.visible = range;
        self.generation += 1;
    }
}

impl Renderer for WindowedRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::Windowed
    }

    fn initialize(&mut self, item_count: usize, item_extent: f64, render_item: RenderItem) {
        let extent = item_extent.max(0.0).round().min(f64::from(u32::MAX)) as u32;
        let mut options = VirtualizerOptions::new(item_count, move |_| extent);
        options.overscan = self.overscan;

        self.item_extent = extent;
        self.virtualizer = Some(Virtualizer::new(options));
        self.render_item = Some(render_item);
        self.sync_viewport();
        let range = self.compute_range();
        self.materialize(range);
    }

    fn destroy(&mut self) {
        self.render_item = None;
        self.virtualizer = None;
        self.items.clear();
        self.visible = 0..0;
    }

    fn is_initialized(&self) -> bool {
        self.render_item.is_some()
    }

    fn position_of(&self, index: usize) -> f64 {
        match self.virtualizer.as_ref() {
            Some(virtualizer) => virtualizer
                .item_start(index)
                .unwrap_or_else(|| virtualizer.total_size()) as f64,
            None => 0.0,
        }
    }

    fn extent_of(&self, index: usize) -> f64 {
        self.virtualizer
            .as_ref()
            .and_then(|v| v.item_size(index))
            .map_or(0.0, f64::from)
    }

    fn total_extent(&self) -> f64 {
        self.spacer_extent()
    }

    fn set_selected(&mut self, index: Option<usize>) {
        self.selected = index;
        for item in &mut self.items {
            item.selected = Some(item.index) == index;
        }
    }

    fn update_viewport(&mut self, offset: f64, viewport_extent: f64) {
        self.offset = offset;
        self.viewport = viewport_extent;
        self.sync_viewport();
        let range = self.compute_range();
        if range != self.visible && self.is_initialized() {
            self.materialize(range);
        }
    }

    fn items(&self) -> &[RenderedItem] {
        &self.items
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn supports_alignment(&self) -> bool {
        false
    }
}
