//! # Scrolling Menu
//!
//! [`ScrollingMenu`] ties the engine together:
//!
//! ```text
//!   LightTree edit ─▶ MutationBridge ─▶ build_options ─▶ SelectionState
//!                                                            │
//!   set_selected_index / step / press_control ───────────────┤
//!                                                            ▼
//!                                        Renderer ─▶ ScrollAnimator
//! ```
//!
//! The menu is single-threaded and cooperative. Its owner drives time by
//! calling [`ScrollingMenu::tick`] at every paint opportunity; that is where
//! coalesced mutations are applied, repeat controls fire, and the scroll
//! animation advances. Selection notifications are the exception: they fire
//! synchronously inside the call that changed the index.

use super::attributes::{
    bool_to_attribute, AlignItems, AttributeEffect, Direction, MenuAttributes, ALIGN_ITEMS_NAME,
    DECREMENT_NAME, DIRECTION_NAME, DISABLED_NAME, INCREMENT_NAME,
};
use super::events::{EventDispatcher, EventKind, MenuEvent, MenuId};
use super::option::{build_options, MenuOption};
use super::selection::{IndexValue, SelectionState};
use super::template::{default_item_template, render_template, Bindings, Element, Node};
use crate::mutation::{
    classify, LightTree, MutationBridge, MutationEffect, MutationRecord, DEFAULT_DEBOUNCE,
};
use crate::render::{
    probe_extent, renderer_for, CellMeasure, ItemContent, Measure, RenderItem, RenderedItem,
    Renderer, RendererKind,
};
use crate::repeat::RepeatAction;
use crate::scroll::{Easing, ScrollAnimator, ScrollMode};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Projection point for the decrement control.
pub const DECREMENT_SLOT: &str = "decrement";
/// Projection point for the increment control.
pub const INCREMENT_SLOT: &str = "increment";
/// Projection point overriding per-item content.
pub const OPTION_SLOT: &str = "option";

/// One of the two step controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepControl {
    Decrement,
    Increment,
}

impl StepControl {
    pub fn delta(self) -> isize {
        match self {
            StepControl::Decrement => -1,
            StepControl::Increment => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ItemSeed {
    label: String,
    value: Option<String>,
    disabled: bool,
}

/// A selection list inside a scrollable container.
pub struct ScrollingMenu {
    id: MenuId,
    attributes: MenuAttributes,
    raw_attributes: BTreeMap<String, String>,
    tree: LightTree,
    bridge: MutationBridge,
    selection: SelectionState,
    renderer: Box<dyn Renderer>,
    measure: Rc<dyn Measure>,
    animator: ScrollAnimator,
    events: EventDispatcher,
    decrement_repeat: RepeatAction,
    increment_repeat: RepeatAction,
    viewport: f64,
    connected: bool,
    /// Whether the option list has been built from the current content.
    built: bool,
}

impl std::fmt::Debug for ScrollingMenu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollingMenu")
            .field("id", &self.id)
            .field("attributes", &self.attributes)
            .field("options", &self.selection.len())
            .field("selected_index", &self.selection.selected_index())
            .field("renderer", &self.renderer.kind())
            .field("position", &self.animator.position())
            .field("connected", &self.connected)
            .finish()
    }
}

impl Default for ScrollingMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollingMenu {
    pub fn new() -> Self {
        Self::with_parts(
            RendererKind::Naive,
            Rc::new(CellMeasure::default()),
            DEFAULT_DEBOUNCE,
        )
    }

    /// Build a menu with an explicit rendering strategy, item measure and
    /// mutation debounce window.
    pub fn with_parts(kind: RendererKind, measure: Rc<dyn Measure>, debounce: Duration) -> Self {
        let mut tree = LightTree::new();
        let mut bridge = MutationBridge::new(debounce);
        bridge.observe(&mut tree);

        Self {
            id: MenuId::next(),
            attributes: MenuAttributes::default(),
            raw_attributes: BTreeMap::new(),
            tree,
            bridge,
            selection: SelectionState::new(),
            renderer: renderer_for(kind, Rc::clone(&measure)),
            measure,
            animator: ScrollAnimator::default(),
            events: EventDispatcher::default(),
            decrement_repeat: RepeatAction::default(),
            increment_repeat: RepeatAction::default(),
            viewport: 0.0,
            connected: false,
            built: false,
        }
    }

    pub fn with_renderer(mut self, kind: RendererKind) -> Self {
        self.set_renderer(kind);
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.animator.set_easing(easing);
        self
    }

    /// Start from existing declarative content. The content is built on
    /// [`ScrollingMenu::connect`].
    pub fn with_children(mut self, tree: LightTree) -> Self {
        self.bridge.disconnect(&mut self.tree);
        self.tree = tree;
        self.bridge.observe(&mut self.tree);
        self.built = false;
        self
    }

    pub fn id(&self) -> MenuId {
        self.id
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Attach the menu and observe its content. The option list is built on
    /// the first connect, or when the content was edited while detached;
    /// otherwise the current selection is kept and the scroll position snaps.
    pub fn connect(&mut self) {
        let stale = self.tree.take_unobserved_edits() || !self.built;
        if !self.bridge.is_observing() {
            self.bridge.observe(&mut self.tree);
        }
        self.connected = true;
        tracing::debug!(menu = ?self.id, rebuild = stale, "menu connected");
        if stale {
            self.rebuild();
        } else {
            self.update_scroll_position(false);
        }
    }

    /// Detach the menu: stop observing content and cancel any animation.
    pub fn disconnect(&mut self) {
        if self.bridge.has_pending() {
            // undelivered edits are dropped with the bridge
            self.built = false;
        }
        self.bridge.disconnect(&mut self.tree);
        self.animator.cancel();
        self.decrement_repeat.press_end();
        self.increment_repeat.press_end();
        self.connected = false;
        tracing::debug!(menu = ?self.id, "menu disconnected");
    }

    /// The menu moved to a new host; recompute the scroll position without animating.
    pub fn adopt(&mut self) {
        self.update_scroll_position(false);
    }

    // ---------------------------------------------------------------------
    // Attributes and properties
    // ---------------------------------------------------------------------

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.raw_attributes.get(name).map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.raw_attributes.contains_key(name)
    }

    /// Set (`Some`) or remove (`None`) an attribute.
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(v) => {
                self.raw_attributes.insert(name.to_string(), v.to_string());
            }
            None => {
                self.raw_attributes.remove(name);
            }
        }
        self.attribute_changed(name, value);
    }

    pub fn remove_attribute(&mut self, name: &str) {
        self.set_attribute(name, None);
    }

    fn attribute_changed(&mut self, name: &str, value: Option<&str>) {
        match self.attributes.apply(name, value) {
            AttributeEffect::None => {}
            AttributeEffect::Reposition => self.update_scroll_position(false),
            AttributeEffect::Relayout => {
                tracing::debug!(direction = self.attributes.direction.as_str(), "relayout");
                self.render_list();
            }
        }
    }

    pub fn attributes(&self) -> MenuAttributes {
        self.attributes
    }

    pub fn direction(&self) -> Direction {
        self.attributes.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.set_attribute(DIRECTION_NAME, Some(direction.as_str()));
    }

    pub fn disabled(&self) -> bool {
        self.attributes.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.set_attribute(DISABLED_NAME, bool_to_attribute(disabled));
    }

    pub fn align_items(&self) -> AlignItems {
        self.attributes.align_items
    }

    pub fn set_align_items(&mut self, align: AlignItems) {
        self.set_attribute(ALIGN_ITEMS_NAME, Some(align.as_str()));
    }

    /// Alignment to apply to items, or `None` when the renderer can't align.
    pub fn alignment(&self) -> Option<AlignItems> {
        self.renderer
            .supports_alignment()
            .then_some(self.attributes.align_items)
    }

    pub fn decrement(&self) -> bool {
        self.attributes.decrement
    }

    pub fn set_decrement(&mut self, shown: bool) {
        self.set_attribute(DECREMENT_NAME, bool_to_attribute(shown));
    }

    pub fn increment(&self) -> bool {
        self.attributes.increment
    }

    pub fn set_increment(&mut self, shown: bool) {
        self.set_attribute(INCREMENT_NAME, bool_to_attribute(shown));
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.animator.set_easing(easing);
    }

    pub fn easing(&self) -> Easing {
        self.animator.easing()
    }

    pub fn renderer_kind(&self) -> RendererKind {
        self.renderer.kind()
    }

    /// Swap the rendering strategy. The old renderer is destroyed first.
    pub fn set_renderer(&mut self, kind: RendererKind) {
        if kind == self.renderer.kind() {
            return;
        }
        self.renderer.destroy();
        self.renderer = renderer_for(kind, Rc::clone(&self.measure));
        self.render_list();
    }

    // ---------------------------------------------------------------------
    // Content
    // ---------------------------------------------------------------------

    pub fn children(&self) -> &LightTree {
        &self.tree
    }

    /// Mutable access to the declarative content. Edits take effect once the
    /// mutation batch is delivered by a later [`ScrollingMenu::tick`].
    pub fn children_mut(&mut self) -> &mut LightTree {
        &mut self.tree
    }

    pub fn options(&self) -> &[MenuOption] {
        self.selection.options()
    }

    /// Apply a batch of structural mutations.
    pub fn handle_mutations(&mut self, batch: &[MutationRecord]) {
        match classify(batch) {
            MutationEffect::Rebuild => self.rebuild(),
            MutationEffect::RenderOnly => self.render_list(),
            MutationEffect::Ignore => {}
        }
    }

    /// Rebuild the option list from the declarative content and re-render.
    pub fn rebuild(&mut self) {
        let built = build_options(self.tree.options());
        tracing::debug!(
            options = built.options.len(),
            selected = ?built.selected,
            "option list rebuilt"
        );
        self.selection.replace(built);
        self.built = true;
        self.render_list();
    }

    fn render_list(&mut self) {
        let seeds: Rc<Vec<ItemSeed>> = Rc::new(
            self.selection
                .options()
                .iter()
                .map(|option| ItemSeed {
                    label: option.label.clone(),
                    value: option.value.clone(),
                    disabled: option.disabled,
                })
                .collect(),
        );
        let template = Rc::new(
            self.tree
                .slotted(OPTION_SLOT)
                .cloned()
                .unwrap_or_else(default_item_template),
        );

        let render_item: RenderItem = Rc::new(move |index| {
            let seed = &seeds[index];
            let bindings = Bindings {
                label: &seed.label,
                value: seed.value.as_deref(),
            };
            ItemContent {
                node: render_template(&template, &bindings),
                disabled: seed.disabled,
            }
        });

        let count = self.selection.len();
        let direction = self.attributes.direction;
        let extent = match self.renderer.kind() {
            RendererKind::Windowed => {
                probe_extent(&render_item, count, self.measure.as_ref(), direction)
            }
            RendererKind::Naive => 0.0,
        };

        self.renderer.destroy();
        self.renderer.set_direction(direction);
        self.renderer.initialize(count, extent, render_item);
        self.renderer.set_selected(self.selection.selected());
        self.renderer
            .update_viewport(self.animator.position(), self.viewport);
        tracing::debug!(
            items = count,
            item_extent = extent,
            generation = self.renderer.generation(),
            "options rendered"
        );

        self.update_scroll_position(false);
    }

    // ---------------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------------

    /// The selection index, `-1` when nothing is selected.
    pub fn selected_index(&self) -> isize {
        self.selection.selected_index()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selection.selected()
    }

    pub fn selected_option(&self) -> Option<&MenuOption> {
        self.selection.selected_option()
    }

    /// Value of the selected option (its label when it has no value).
    pub fn value(&self) -> Option<&str> {
        self.selection
            .selected_option()
            .map(|o| o.value.as_deref().unwrap_or(o.label.as_str()))
    }

    pub fn set_selected_index(&mut self, raw: impl Into<IndexValue>) {
        self.apply_selection(&raw.into(), false);
    }

    /// Like [`ScrollingMenu::set_selected_index`], but re-applies and notifies
    /// even when the index is unchanged.
    pub fn force_selected_index(&mut self, raw: impl Into<IndexValue>) {
        self.apply_selection(&raw.into(), true);
    }

    fn apply_selection(&mut self, raw: &IndexValue, force: bool) {
        let Some(transition) = self.selection.assign(raw, force) else {
            return;
        };

        tracing::debug!(
            from = ?transition.previous,
            to = ?transition.current,
            "selection changed"
        );
        self.renderer.set_selected(transition.current);
        self.update_scroll_position(true);
        self.events.selection_changed(self.id);
    }

    /// Step navigation, skipping disabled options. No-op when nothing lies
    /// in that direction.
    pub fn offset_selected_index(&mut self, delta: isize) {
        if let Some(target) = self.selection.step_target(delta) {
            self.set_selected_index(target);
        }
    }

    /// User-initiated step. Ignored while the menu is disabled.
    pub fn step(&mut self, delta: isize) {
        if !self.attributes.disabled {
            self.offset_selected_index(delta);
        }
    }

    pub fn add_event_listener<F>(&mut self, kind: EventKind, listener: F)
    where
        F: FnMut(&MenuEvent) + 'static,
    {
        self.events.add_listener(kind, listener);
    }

    // ---------------------------------------------------------------------
    // Step controls
    // ---------------------------------------------------------------------

    fn repeat_for(&mut self, control: StepControl) -> &mut RepeatAction {
        match control {
            StepControl::Decrement => &mut self.decrement_repeat,
            StepControl::Increment => &mut self.increment_repeat,
        }
    }

    pub fn press_control(&mut self, control: StepControl, now: Instant) {
        if self.attributes.disabled {
            return;
        }
        if self.repeat_for(control).press_start(now) {
            self.step(control.delta());
        }
    }

    pub fn release_control(&mut self, control: StepControl) {
        self.repeat_for(control).press_end();
    }

    pub fn pointer_leave(&mut self, control: StepControl) {
        self.repeat_for(control).pointer_leave();
    }

    pub fn pointer_enter(&mut self, control: StepControl, now: Instant) {
        if self.repeat_for(control).pointer_enter(now) {
            self.step(control.delta());
        }
    }

    pub fn is_pressed(&self, control: StepControl) -> bool {
        match control {
            StepControl::Decrement => self.decrement_repeat.is_pressed(),
            StepControl::Increment => self.increment_repeat.is_pressed(),
        }
    }

    /// Content of a step control: projected content, or the default button.
    pub fn control_node(&self, control: StepControl) -> Node {
        let (slot, label) = match control {
            StepControl::Decrement => (DECREMENT_SLOT, "Select Previous"),
            StepControl::Increment => (INCREMENT_SLOT, "Select Next"),
        };
        self.tree.slotted(slot).cloned().unwrap_or_else(|| {
            Node::Element(Element::new("button").attr("type", "button").child(label))
        })
    }

    // ---------------------------------------------------------------------
    // Rendering and scrolling
    // ---------------------------------------------------------------------

    pub fn rendered_items(&self) -> &[RenderedItem] {
        self.renderer.items()
    }

    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    pub fn scroll_position(&self) -> f64 {
        self.animator.position()
    }

    pub fn scroll_target(&self) -> Option<f64> {
        self.animator.target()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn viewport_extent(&self) -> f64 {
        self.viewport
    }

    /// Report the viewport size along the scroll axis (e.g. after a resize).
    pub fn set_viewport_extent(&mut self, extent: f64) {
        let extent = extent.max(0.0);
        if (extent - self.viewport).abs() < f64::EPSILON {
            return;
        }
        self.viewport = extent;
        match self.renderer.kind() {
            RendererKind::Windowed => self.render_list(),
            RendererKind::Naive => self.update_scroll_position(false),
        }
    }

    /// Resting scroll position that centers the selected option, clamped to
    /// the scrollable range. `0` when nothing is selected.
    pub fn target_position(&self) -> f64 {
        let Some(index) = self.selection.selected() else {
            return 0.0;
        };

        let position = self.renderer.position_of(index);
        let extent = self.renderer.extent_of(index);
        let centered = position - (self.viewport - extent) / 2.0;
        let max = (self.renderer.total_extent() - self.viewport).max(0.0);
        centered.clamp(0.0, max)
    }

    fn update_scroll_position(&mut self, animated: bool) {
        self.animator.cancel();

        if self.connected {
            let mode = if animated && !self.attributes.disabled {
                ScrollMode::Eased
            } else {
                ScrollMode::Snap
            };
            self.animator.request(self.target_position(), mode);
        }
    }

    /// Advance the menu to `now`: apply delivered mutations, fire held step
    /// controls, and run one animation frame. Returns whether the menu wants
    /// another tick soon.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(batch) = self.bridge.poll(now) {
            tracing::trace!(records = batch.len(), "mutation batch delivered");
            self.handle_mutations(&batch);
        }

        for control in [StepControl::Decrement, StepControl::Increment] {
            let fired = self.repeat_for(control).poll(now);
            for _ in 0..fired {
                self.step(control.delta());
            }
        }

        if self.animator.tick(now) {
            tracing::trace!(position = self.animator.position(), "scroll frame");
        }
        self.renderer
            .update_viewport(self.animator.position(), self.viewport);

        self.needs_tick()
    }

    /// Whether there is pending work (animation, held controls, undelivered mutations).
    pub fn needs_tick(&self) -> bool {
        self.animator.is_animating()
            || self.decrement_repeat.is_armed()
            || self.increment_repeat.is_armed()
            || self.bridge.has_pending()
    }
}
