//! # Scrolling Menu CLI Entry Point
//!
//! Runs a [`ScrollingMenu`] full-screen in the terminal.
//!
//! ## Usage
//!
//! ```bash
//! # Built-in sample options
//! scrolling-menu
//!
//! # Options (and projected templates) from a markup or JSON file
//! scrolling-menu --file ./menu.html
//! scrolling-menu --file ./menu.json --renderer windowed --easing quartic
//!
//! # Print the built menu and exit
//! scrolling-menu --file ./menu.html --debug
//! ```
//!
//! ## Key Bindings
//!
//! - `q` / `Esc` - Quit
//! - `↑` `↓` `←` `→` / `hjkl` - Step to the previous / next enabled option
//! - `Home` / `End` - Jump to the first / last enabled option
//! - `d` - Toggle direction
//! - `x` - Toggle disabled
//! - `c` - Show / hide the step controls
//! - `a` / `r` - Append / remove an option
//! - `w` - Switch between naive and windowed rendering
//! - `t` - Cycle theme
//!
//! Holding the mouse on a step control repeats it.

use scrolling_menu::menu::{Direction, OptionDescriptor, ScrollingMenu};
use scrolling_menu::mutation::LightTree;
use scrolling_menu::observability;
use scrolling_menu::render::RendererKind;
use scrolling_menu::scroll::EasingKind;
use scrolling_menu::source;
use scrolling_menu::ui::config::Config;
use scrolling_menu::ui::theme::Theme;
use scrolling_menu::ui::{self, App};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::panic;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Poll interval while the menu animates or a control is held (~60fps).
const ACTIVE_POLL: Duration = Duration::from_millis(16);
/// Poll interval while idle.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Trait for reading terminal events (allows dependency injection for testing)
trait EventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Production event reader that uses crossterm's event polling + read
struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(event::read().context("Failed to read terminal event")?))
        } else {
            Ok(None)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DirectionArg {
    Vertical,
    Horizontal,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Vertical => Direction::Vertical,
            DirectionArg::Horizontal => Direction::Horizontal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RendererArg {
    Naive,
    Windowed,
}

impl From<RendererArg> for RendererKind {
    fn from(arg: RendererArg) -> Self {
        match arg {
            RendererArg::Naive => RendererKind::Naive,
            RendererArg::Windowed => RendererKind::Windowed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EasingArg {
    Halve,
    Quartic,
}

impl From<EasingArg> for EasingKind {
    fn from(arg: EasingArg) -> Self {
        match arg {
            EasingArg::Halve => EasingKind::Halve,
            EasingArg::Quartic => EasingKind::Quartic,
        }
    }
}

/// Scrolling Menu - an animated selection list for the terminal
#[derive(Parser, Debug)]
#[command(name = "scrolling-menu")]
#[command(author = "Luckystrike561")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "An animated, scrollable selection list", long_about = None)]
struct Args {
    /// Markup (.html) or JSON (.json) file with the menu's options
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    file: Option<PathBuf>,

    /// Layout direction
    #[arg(long, value_enum)]
    direction: Option<DirectionArg>,

    /// Rendering strategy (overrides the config file)
    #[arg(long, value_enum)]
    renderer: Option<RendererArg>,

    /// Scroll easing (overrides the config file)
    #[arg(long, value_enum)]
    easing: Option<EasingArg>,

    /// Start with the menu disabled
    #[arg(long)]
    disabled: bool,

    /// Theme name (overrides the config file)
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Print the built option list and exit
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up panic hook to ensure terminal is restored on panic
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        default_hook(panic_info);
    }));

    let result = run_application(args).await;

    let _ = panic::take_hook();

    result
}

fn sample_options() -> LightTree {
    let mut options: Vec<OptionDescriptor> = [
        "Apple", "Banana", "Cherry", "Damson", "Elderberry", "Fig", "Grape", "Honeydew",
        "Kiwi", "Lemon", "Mango", "Nectarine", "Orange", "Papaya", "Quince",
    ]
    .into_iter()
    .map(|label| OptionDescriptor::new(label).with_value(label.to_lowercase()))
    .collect();
    options[3] = options[3].clone().disabled();
    options[7] = options[7].clone().selected();

    let mut tree = LightTree::new();
    for option in options {
        tree.append_option(option);
    }
    tree
}

/// Build the menu described by `args` on top of `config`.
fn build_menu(args: &Args, config: &Config) -> Result<ScrollingMenu> {
    let tree = match &args.file {
        Some(path) => source::load(path)
            .with_context(|| format!("Failed to load options from: {}", path.display()))?,
        None => sample_options(),
    };

    let renderer = args.renderer.map(RendererKind::from).unwrap_or(config.renderer);
    let easing = Config {
        easing: args.easing.map(EasingKind::from).unwrap_or(config.easing),
        ..config.clone()
    }
    .scroll_easing();

    let mut menu = ScrollingMenu::new()
        .with_renderer(renderer)
        .with_easing(easing)
        .with_children(tree);
    menu.set_decrement(true);
    menu.set_increment(true);
    if let Some(direction) = args.direction {
        menu.set_direction(direction.into());
    }
    if args.disabled {
        menu.set_disabled(true);
    }
    Ok(menu)
}

async fn run_application(args: Args) -> Result<()> {
    let config = Config::load();
    observability::init_tracing(config.log_level.as_deref());

    let mut menu = build_menu(&args, &config)?;

    if args.debug {
        menu.connect();
        println!("=== Options ===");
        for (index, option) in menu.options().iter().enumerate() {
            println!(
                "  [{}] {} value={:?}{}{}",
                index,
                option.label,
                option.value,
                if option.disabled { " disabled" } else { "" },
                if option.selected { " selected" } else { "" },
            );
        }
        println!("\nselectedIndex = {}", menu.selected_index());
        return Ok(());
    }

    let theme = args
        .theme
        .as_deref()
        .or(Some(config.theme.as_str()))
        .and_then(Theme::by_name)
        .unwrap_or_else(Theme::default_theme);

    let mut app = App::new(menu, theme);

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to set up terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut event_reader = CrosstermEventReader;
    let run_result = run_app(&mut terminal, &mut app, &mut event_reader).await;

    // Restore terminal (always runs, even if run_app failed)
    let cleanup_result = cleanup_terminal(&mut terminal);

    app.menu.disconnect();
    run_result?;
    cleanup_result?;

    Ok(())
}

/// Clean up terminal state
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}

/// Route one terminal event to the app.
fn handle_event(app: &mut App, event: Event, now: Instant) {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => app.handle_key(key),
        Event::Mouse(mouse) => app.handle_mouse(mouse, now),
        _ => {}
    }
}

/// Read events until the reader runs dry or the app wants to quit, ticking
/// the menu between reads.
fn pump_events(app: &mut App, event_reader: &mut dyn EventReader) -> Result<()> {
    loop {
        let needs_tick = app.menu.tick(Instant::now());
        let timeout = if needs_tick { ACTIVE_POLL } else { IDLE_POLL };

        let Some(event) = event_reader.read_event(timeout)? else {
            return Ok(());
        };
        handle_event(app, event, Instant::now());
        if app.should_quit {
            return Ok(());
        }
    }
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_reader: &mut dyn EventReader,
) -> Result<()> {
    while !app.should_quit {
        terminal
            .draw(|f| ui::render(f, app))
            .context("Failed to draw terminal UI")?;
        pump_events(app, event_reader)?;
    }
    Ok(())
}
