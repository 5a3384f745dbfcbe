use crate::menu::{EventKind, OptionDescriptor, ScrollingMenu, StepControl};
use crate::render::RendererKind;
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

/// Number of notifications kept for the status line.
const EVENT_LOG_CAPACITY: usize = 32;

/// Screen areas from the last frame, used for mouse hit-testing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuLayout {
    pub decrement: Option<Rect>,
    pub increment: Option<Rect>,
    /// Visible option rows or columns, by option index.
    pub items: Vec<(usize, Rect)>,
}

impl MenuLayout {
    pub fn control_at(&self, column: u16, row: u16) -> Option<StepControl> {
        let position = Position::new(column, row);
        if self.decrement.is_some_and(|r| r.contains(position)) {
            Some(StepControl::Decrement)
        } else if self.increment.is_some_and(|r| r.contains(position)) {
            Some(StepControl::Increment)
        } else {
            None
        }
    }

    pub fn item_at(&self, column: u16, row: u16) -> Option<usize> {
        let position = Position::new(column, row);
        self.items
            .iter()
            .find(|(_, rect)| rect.contains(position))
            .map(|(index, _)| *index)
    }
}

pub struct App {
    pub menu: ScrollingMenu,
    pub theme: &'static Theme,
    pub should_quit: bool,
    pub layout: MenuLayout,
    events: Rc<RefCell<VecDeque<EventKind>>>,
    /// Control the pointer is currently dragging over, while a button is held.
    hovered: Option<StepControl>,
    added: usize,
}

impl App {
    /// Wrap a menu and connect it.
    pub fn new(mut menu: ScrollingMenu, theme: &'static Theme) -> Self {
        let events = Rc::new(RefCell::new(VecDeque::with_capacity(EVENT_LOG_CAPACITY)));
        for kind in [EventKind::Input, EventKind::Change] {
            let log = Rc::clone(&events);
            menu.add_event_listener(kind, move |event| {
                let mut log = log.borrow_mut();
                if log.len() == EVENT_LOG_CAPACITY {
                    log.pop_front();
                }
                log.push_back(event.kind);
            });
        }
        menu.connect();

        Self {
            menu,
            theme,
            should_quit: false,
            layout: MenuLayout::default(),
            events,
            hovered: None,
            added: 0,
        }
    }

    /// Number of `change` notifications received so far (capped by the log size).
    pub fn change_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|kind| **kind == EventKind::Change)
            .count()
    }

    pub fn last_event(&self) -> Option<EventKind> {
        self.events.borrow().back().copied()
    }

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
    }

    pub fn toggle_renderer(&mut self) {
        let next = match self.menu.renderer_kind() {
            RendererKind::Naive => RendererKind::Windowed,
            RendererKind::Windowed => RendererKind::Naive,
        };
        self.menu.set_renderer(next);
    }

    /// Append an option to the menu's content. Takes effect on a later tick.
    pub fn add_option(&mut self) {
        self.added += 1;
        let label = format!("Added {}", self.added);
        self.menu
            .children_mut()
            .append_option(OptionDescriptor::new(label.clone()).with_value(label.to_lowercase()));
    }

    pub fn remove_option(&mut self) {
        self.menu.children_mut().remove_last_option();
    }

    /// Jump to the first (or last) enabled option.
    pub fn jump(&mut self, to_end: bool) {
        if self.menu.disabled() {
            return;
        }
        let options = self.menu.options();
        let target = if to_end {
            options.iter().rposition(|o| !o.disabled)
        } else {
            options.iter().position(|o| !o.disabled)
        };
        if let Some(index) = target {
            self.menu.set_selected_index(index);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k') | KeyCode::Char('h') => {
                self.menu.step(-1)
            }
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j') | KeyCode::Char('l') => {
                self.menu.step(1)
            }
            KeyCode::Home | KeyCode::Char('g') => self.jump(false),
            KeyCode::End | KeyCode::Char('G') => self.jump(true),
            KeyCode::Char('d') => {
                let direction = self.menu.direction().toggled();
                self.menu.set_direction(direction);
            }
            KeyCode::Char('x') => {
                let disabled = self.menu.disabled();
                self.menu.set_disabled(!disabled);
            }
            KeyCode::Char('c') => {
                let shown = self.menu.decrement() && self.menu.increment();
                self.menu.set_decrement(!shown);
                self.menu.set_increment(!shown);
            }
            KeyCode::Char('a') => self.add_option(),
            KeyCode::Char('r') => self.remove_option(),
            KeyCode::Char('t') => self.cycle_theme(),
            KeyCode::Char('w') => self.toggle_renderer(),
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let hit = self.layout.control_at(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(control) = hit {
                    self.hovered = Some(control);
                    self.menu.press_control(control, now);
                } else if let Some(index) = self.layout.item_at(mouse.column, mouse.row) {
                    let enabled = self.menu.options().get(index).is_some_and(|o| !o.disabled);
                    if enabled && !self.menu.disabled() {
                        self.menu.set_selected_index(index);
                    }
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if hit != self.hovered {
                    if let Some(previous) = self.hovered {
                        self.menu.pointer_leave(previous);
                    }
                    if let Some(control) = hit {
                        self.menu.pointer_enter(control, now);
                    }
                    self.hovered = hit;
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.menu.release_control(StepControl::Decrement);
                self.menu.release_control(StepControl::Increment);
                self.hovered = None;
            }
            MouseEventKind::ScrollUp => self.menu.step(-1),
            MouseEventKind::ScrollDown => self.menu.step(1),
            _ => {}
        }
    }
}
