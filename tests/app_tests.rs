//! Terminal front end tests
//!
//! Key and mouse handling on `App`, and rendering through ratatui's
//! `TestBackend`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{backend::TestBackend, layout::Rect, Terminal};
use scrolling_menu::menu::{Direction, OptionDescriptor, ScrollingMenu, StepControl};
use scrolling_menu::mutation::{LightNode, LightTree};
use scrolling_menu::render::RendererKind;
use scrolling_menu::ui::theme::Theme;
use scrolling_menu::ui::{render, App};
use std::time::{Duration, Instant};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::empty(),
    }
}

fn app_with(options: Vec<OptionDescriptor>) -> App {
    let tree = LightTree::from_nodes(options.into_iter().map(LightNode::Option).collect());
    let mut menu = ScrollingMenu::new().with_children(tree);
    menu.set_decrement(true);
    menu.set_increment(true);
    App::new(menu, Theme::default_theme())
}

fn create_test_app() -> App {
    app_with(
        (0..5)
            .map(|i| OptionDescriptor::new(format!("option {i}")))
            .collect(),
    )
}

/// Draw one frame and return the screen contents row by row.
fn draw(app: &mut App) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(60, 20)).expect("terminal");
    terminal.draw(|f| render(f, app)).expect("draw");
    let buffer = terminal.backend().buffer();
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}

fn center(rect: Rect) -> (u16, u16) {
    (rect.x + rect.width / 2, rect.y + rect.height / 2)
}

#[test]
fn test_quit_keys() {
    for code in [KeyCode::Char('q'), KeyCode::Esc] {
        let mut app = create_test_app();
        assert!(!app.should_quit);
        app.handle_key(key(code));
        assert!(app.should_quit);
    }

    let mut app = create_test_app();
    app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit);
}

#[test]
fn test_navigation_keys_step_and_notify() {
    let mut app = create_test_app();
    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Char('l')));
    assert_eq!(app.menu.selected_index(), 2);

    app.handle_key(key(KeyCode::Char('k')));
    assert_eq!(app.menu.selected_index(), 1);
    assert_eq!(app.change_count(), 3);
    assert_eq!(app.last_event(), Some(scrolling_menu::menu::EventKind::Change));
}

#[test]
fn test_home_and_end_skip_disabled_options() {
    let mut app = app_with(vec![
        OptionDescriptor::new("a").disabled(),
        OptionDescriptor::new("b"),
        OptionDescriptor::new("c").selected(),
        OptionDescriptor::new("d").disabled(),
    ]);
    app.handle_key(key(KeyCode::Home));
    assert_eq!(app.menu.selected_index(), 1);
    app.handle_key(key(KeyCode::End));
    assert_eq!(app.menu.selected_index(), 2);
}

#[test]
fn test_toggle_keys() {
    let mut app = create_test_app();

    app.handle_key(key(KeyCode::Char('d')));
    assert_eq!(app.menu.direction(), Direction::Horizontal);

    app.handle_key(key(KeyCode::Char('x')));
    assert!(app.menu.disabled());
    app.handle_key(key(KeyCode::Down));
    assert_eq!(app.menu.selected_index(), 0);
    app.handle_key(key(KeyCode::Char('x')));
    assert!(!app.menu.disabled());

    app.handle_key(key(KeyCode::Char('w')));
    assert_eq!(app.menu.renderer_kind(), RendererKind::Windowed);

    app.handle_key(key(KeyCode::Char('c')));
    assert!(!app.menu.decrement() && !app.menu.increment());

    let before = app.theme.name;
    app.handle_key(key(KeyCode::Char('t')));
    assert_ne!(app.theme.name, before);
}

#[test]
fn test_add_and_remove_options_go_through_mutations() {
    let mut app = create_test_app();
    let t0 = Instant::now();

    app.handle_key(key(KeyCode::Char('a')));
    assert_eq!(app.menu.options().len(), 5);
    app.menu.tick(t0);
    app.menu.tick(t0 + Duration::from_millis(20));
    assert_eq!(app.menu.options().len(), 6);
    assert_eq!(app.menu.options()[5].label, "Added 1");

    app.handle_key(key(KeyCode::Char('r')));
    app.handle_key(key(KeyCode::Char('r')));
    app.menu.tick(t0 + Duration::from_millis(40));
    app.menu.tick(t0 + Duration::from_millis(60));
    assert_eq!(app.menu.options().len(), 4);
}

#[test]
fn test_render_shows_controls_and_options() {
    let mut app = create_test_app();
    let screen = draw(&mut app).join("\n");

    assert!(screen.contains("Scrolling Menu"));
    assert!(screen.contains("Select Previous"));
    assert!(screen.contains("Select Next"));
    assert!(screen.contains("option 0"));
    assert!(screen.contains("option 4"));
    assert!(app.layout.decrement.is_some());
    assert!(app.layout.increment.is_some());
    assert_eq!(app.layout.items.len(), 5);
}

#[test]
fn test_render_horizontal_puts_options_on_one_row() {
    let mut app = create_test_app();
    app.menu.set_direction(Direction::Horizontal);
    draw(&mut app);

    let rows: Vec<u16> = app.layout.items.iter().map(|(_, rect)| rect.y).collect();
    assert!(!rows.is_empty());
    assert!(rows.iter().all(|row| *row == rows[0]));
}

#[test]
fn test_render_hides_controls_when_not_requested() {
    let mut app = create_test_app();
    app.menu.set_decrement(false);
    app.menu.set_increment(false);
    let screen = draw(&mut app).join("\n");

    assert!(!screen.contains("Select Previous"));
    assert!(app.layout.decrement.is_none());
}

#[test]
fn test_render_marks_disabled_menu() {
    let mut app = create_test_app();
    app.menu.set_disabled(true);
    let screen = draw(&mut app).join("\n");
    assert!(screen.contains("DISABLED"));
}

#[test]
fn test_mouse_press_on_control_steps_and_release_stops() {
    let mut app = create_test_app();
    draw(&mut app);
    let (column, row) = center(app.layout.increment.expect("increment area"));
    let now = Instant::now();

    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), column, row), now);
    assert_eq!(app.menu.selected_index(), 1);
    assert!(app.menu.is_pressed(StepControl::Increment));

    app.menu.tick(now + Duration::from_millis(250));
    assert_eq!(app.menu.selected_index(), 2);

    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), column, row), now);
    assert!(!app.menu.is_pressed(StepControl::Increment));
    app.menu.tick(now + Duration::from_secs(1));
    assert_eq!(app.menu.selected_index(), 2);
}

#[test]
fn test_mouse_drag_off_and_back_onto_control() {
    let mut app = create_test_app();
    draw(&mut app);
    let (column, row) = center(app.layout.increment.expect("increment area"));
    let now = Instant::now();

    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), column, row), now);
    app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 0, 0), now);
    app.menu.tick(now + Duration::from_millis(500));
    assert_eq!(app.menu.selected_index(), 1);

    let later = now + Duration::from_millis(500);
    app.handle_mouse(
        mouse(MouseEventKind::Drag(MouseButton::Left), column, row),
        later,
    );
    assert_eq!(app.menu.selected_index(), 2);
}

#[test]
fn test_mouse_click_selects_enabled_item() {
    let mut app = app_with(vec![
        OptionDescriptor::new("a"),
        OptionDescriptor::new("b").disabled(),
        OptionDescriptor::new("c"),
    ]);
    draw(&mut app);

    let rect_of = |app: &App, index: usize| {
        app.layout
            .items
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, rect)| *rect)
            .expect("item on screen")
    };

    let (column, row) = center(rect_of(&app, 1));
    app.handle_mouse(
        mouse(MouseEventKind::Down(MouseButton::Left), column, row),
        Instant::now(),
    );
    assert_eq!(app.menu.selected_index(), 0);

    let (column, row) = center(rect_of(&app, 2));
    app.handle_mouse(
        mouse(MouseEventKind::Down(MouseButton::Left), column, row),
        Instant::now(),
    );
    assert_eq!(app.menu.selected_index(), 2);
}

#[test]
fn test_mouse_wheel_steps() {
    let mut app = create_test_app();
    app.handle_mouse(mouse(MouseEventKind::ScrollDown, 0, 0), Instant::now());
    app.handle_mouse(mouse(MouseEventKind::ScrollDown, 0, 0), Instant::now());
    app.handle_mouse(mouse(MouseEventKind::ScrollUp, 0, 0), Instant::now());
    assert_eq!(app.menu.selected_index(), 1);
}
