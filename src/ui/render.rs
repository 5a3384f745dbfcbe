use crate::menu::{AlignItems, Direction, StepControl};
use crate::render::RenderedItem;
use crate::ui::app::{App, MenuLayout};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, app: &mut App) {
    let theme = app.theme;
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.bg)),
        frame.area(),
    );

    let main_chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(0),    // Menu
        Constraint::Length(1), // Footer
    ])
    .split(frame.area());

    render_header(frame, app, main_chunks[0]);

    let mut layout = MenuLayout::default();
    let body = main_chunks[1];
    let show_decrement = app.menu.decrement();
    let show_increment = app.menu.increment();

    let (decrement_area, options_area, increment_area) = match app.menu.direction() {
        Direction::Vertical => {
            let chunks = Layout::vertical([
                Constraint::Length(if show_decrement { 3 } else { 0 }),
                Constraint::Min(3),
                Constraint::Length(if show_increment { 3 } else { 0 }),
            ])
            .split(body);
            (chunks[0], chunks[1], chunks[2])
        }
        Direction::Horizontal => {
            let decrement_width = control_width(app, StepControl::Decrement);
            let increment_width = control_width(app, StepControl::Increment);
            let chunks = Layout::horizontal([
                Constraint::Length(if show_decrement { decrement_width } else { 0 }),
                Constraint::Min(3),
                Constraint::Length(if show_increment { increment_width } else { 0 }),
            ])
            .split(body);
            (chunks[0], chunks[1], chunks[2])
        }
    };

    if show_decrement {
        render_control(frame, app, StepControl::Decrement, decrement_area);
        layout.decrement = Some(decrement_area);
    }
    if show_increment {
        render_control(frame, app, StepControl::Increment, increment_area);
        layout.increment = Some(increment_area);
    }
    layout.items = render_options(frame, app, options_area);

    render_footer(frame, app, main_chunks[2]);
    app.layout = layout;
}

fn control_width(app: &App, control: StepControl) -> u16 {
    let text = app.menu.control_node(control).text_content();
    let width = Line::from(text.trim()).width() as u16;
    width.saturating_add(4)
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;
    let mut spans = vec![Span::styled(
        "  Scrolling Menu  ",
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )];
    if app.menu.disabled() {
        spans.push(Span::styled(
            " DISABLED ",
            Style::default()
                .fg(theme.bg)
                .bg(theme.warning)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent)),
    );
    frame.render_widget(header, area);
}

fn render_control(frame: &mut Frame, app: &App, control: StepControl, area: Rect) {
    let theme = app.theme;
    let text = app.menu.control_node(control).text_content();
    let style = if app.menu.disabled() {
        Style::default().fg(theme.fg_dim)
    } else if app.menu.is_pressed(control) {
        Style::default()
            .fg(theme.bg)
            .bg(theme.pressed)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg)
    };

    let button = Paragraph::new(text.trim().to_string())
        .alignment(Alignment::Center)
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.fg_dim)),
        );
    frame.render_widget(button, area);
}

/// Draw the visible items at their scrolled offsets and return their screen areas.
fn render_options(frame: &mut Frame, app: &mut App, area: Rect) -> Vec<(usize, Rect)> {
    let theme = app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", app.menu.renderer_kind().as_str()))
        .border_style(Style::default().fg(if app.menu.disabled() {
            theme.fg_dim
        } else {
            theme.accent
        }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let direction = app.menu.direction();
    let viewport = match direction {
        Direction::Vertical => inner.height,
        Direction::Horizontal => inner.width,
    };
    app.menu.set_viewport_extent(f64::from(viewport));

    let position = app.menu.scroll_position();
    let alignment = app.menu.alignment();
    let mut areas = Vec::new();

    for item in app.menu.rendered_items() {
        let Some((rect, clipped)) = place_item(item, position, direction, inner, alignment) else {
            continue;
        };

        let style = if item.selected {
            Style::default()
                .fg(theme.bg)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else if item.disabled {
            Style::default()
                .fg(theme.fg_dim)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(theme.fg)
        };

        let lines: Vec<Line> = item
            .label()
            .lines()
            .map(|line| Line::from(line.trim().to_string()))
            .collect();
        let mut paragraph = Paragraph::new(lines).style(style);
        paragraph = match direction {
            Direction::Vertical => paragraph
                .alignment(text_alignment(alignment))
                .scroll((clipped, 0)),
            Direction::Horizontal => paragraph
                .alignment(Alignment::Center)
                .scroll((0, clipped)),
        };
        frame.render_widget(paragraph, rect);
        areas.push((item.index, rect));
    }

    areas
}

fn text_alignment(alignment: Option<AlignItems>) -> Alignment {
    match alignment {
        Some(AlignItems::Start) => Alignment::Left,
        Some(AlignItems::End) => Alignment::Right,
        Some(AlignItems::Center) | None => Alignment::Center,
    }
}

/// Screen rect of an item inside `inner`, and how many cells are clipped off
/// its leading edge. `None` when the item is entirely outside the viewport.
fn place_item(
    item: &RenderedItem,
    position: f64,
    direction: Direction,
    inner: Rect,
    alignment: Option<AlignItems>,
) -> Option<(Rect, u16)> {
    let start = (item.offset - position).round() as i64;
    let end = start + item.extent.round().max(1.0) as i64;

    let (origin, length) = match direction {
        Direction::Vertical => (i64::from(inner.y), i64::from(inner.height)),
        Direction::Horizontal => (i64::from(inner.x), i64::from(inner.width)),
    };
    let visible_start = start.max(0);
    let visible_end = end.min(length);
    if visible_start >= visible_end {
        return None;
    }

    let clipped = (visible_start - start) as u16;
    let along = (origin + visible_start) as u16;
    let size = (visible_end - visible_start) as u16;

    let rect = match direction {
        Direction::Vertical => Rect::new(inner.x, along, inner.width, size),
        Direction::Horizontal => {
            if inner.height == 0 {
                return None;
            }
            let row = match alignment {
                Some(AlignItems::Start) => inner.y,
                Some(AlignItems::End) => inner.y + inner.height - 1,
                Some(AlignItems::Center) | None => inner.y + (inner.height - 1) / 2,
            };
            Rect::new(along, row, size, 1)
        }
    };
    Some((rect, clipped))
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;
    let value = app.menu.value().unwrap_or("-");
    let status = format!(
        " #{} {}  {}  {}  changes:{} ",
        app.menu.selected_index(),
        value,
        app.menu.direction().as_str(),
        app.theme.name,
        app.change_count(),
    );
    let help = "[↑↓/jk] Step  [Home/End] Jump  [d] Direction  [x] Disable  [c] Controls  [a/r] Add/Remove  [w] Renderer  [t] Theme  [q] Quit";

    let footer = Paragraph::new(Line::from(vec![
        Span::styled(status, Style::default().fg(theme.accent)),
        Span::styled(help, Style::default().fg(theme.fg_dim)),
    ]));
    frame.render_widget(footer, area);
}
