mod app;
mod config;
mod core;
mod infrastructure;
mod modules;
mod store;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use app::{App, Focus, InputMode, Section, StatusLevel, View};
use crate::core::Module;
use infrastructure::runtime::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
use ui::layout::{dropdown_area, rect_contains, rect_inner};
use ui::sidebar::{cell_right_px, rect_right_px};

#[derive(Parser, Debug)]
#[command(name = "atis", about = "Tire inspection dashboard", version)]
struct Args {
    /// Path to the inspections database
    #[arg(long)]
    db: Option<PathBuf>,

    /// Seed the database with demo data if it is empty
    #[arg(long)]
    seed: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = config::Config::load()?;

    let db_path = match args.db.or_else(|| config.db.clone().map(PathBuf::from)) {
        Some(path) => path,
        None => config::default_db_path()?,
    };
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let seeded = if args.seed {
        let store = store::InspectionStore::open(&db_path)?;
        store::seed_demo_data(&store)?
    } else {
        0
    };

    let mut app = App::new();
    app.db_path = db_path.display().to_string();
    if seeded > 0 {
        app.set_status(format!("Seeded {seeded} demo inspections"), StatusLevel::Info);
    }

    let bridge = RuntimeBridge::new(app.db_path.clone(), config.recent_limit());
    let refresh_delay = Duration::from_millis(config.refresh_delay_ms());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &bridge, refresh_delay);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    bridge: &RuntimeBridge,
    refresh_delay: Duration,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        app.sync_context();
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    handle_mouse(app, mouse, size);
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            pump_background(app, bridge, refresh_delay);
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Drain worker events and flush the queued refresh request.
fn pump_background(app: &mut App, bridge: &RuntimeBridge, refresh_delay: Duration) {
    for event in bridge.poll_events() {
        match event {
            RuntimeEvent::Snapshot(snapshot) => {
                app.apply_snapshot(
                    snapshot.recent,
                    snapshot.history,
                    snapshot.alerts,
                    snapshot.stats,
                );
            }
            RuntimeEvent::Error { message } => app.apply_worker_error(message),
        }
    }

    if app.take_refresh_request() {
        bridge.send(RuntimeCommand::Refresh {
            delay: refresh_delay,
        });
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        InputMode::Search => handle_search_key(app, key),
        InputMode::Command => handle_command_key(app, key),
        InputMode::Normal => handle_normal_key(app, key),
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => app.exit_search(),
        KeyCode::Backspace => app.pop_query_char(),
        KeyCode::Char(ch) => app.push_query_char(ch),
        _ => {}
    }
}

fn handle_command_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.exit_command(),
        KeyCode::Enter => app.apply_command(),
        KeyCode::Up => {
            if let Some(last) = app.command.last.clone() {
                app.command.input = last;
            }
        }
        KeyCode::Backspace => {
            app.command.input.pop();
        }
        KeyCode::Char(ch) => app.command.input.push(ch),
        _ => {}
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) {
    if app.help_open {
        app.help_open = false;
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.help_open = true,
        KeyCode::Char('/') => app.enter_search(),
        KeyCode::Char(':') => app.enter_command(),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('n') => app.toggle_notifications(),
        KeyCode::Char('c') => app.toggle_sidebar(),
        KeyCode::Char('s') => app.cycle_status_filter(),
        KeyCode::Char('e') => {
            let action = modules::export::export_current_view(app);
            app.apply_action(action);
        }
        KeyCode::Char('y') => handle_copy_to_clipboard(app),
        KeyCode::Char('j') | KeyCode::Down => app.move_selection_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_selection_up(),
        KeyCode::Char('g') => {
            if app.consume_chord('g') {
                app.go_to_top();
            } else {
                app.set_chord('g');
            }
        }
        KeyCode::Char('G') => app.go_to_bottom(),
        KeyCode::PageDown => app.page_down(10),
        KeyCode::PageUp => app.page_up(10),
        KeyCode::Char('h') | KeyCode::Left => {
            if app.current_view() == View::Main {
                app.cycle_section(false);
            }
        }
        KeyCode::Char('l') | KeyCode::Right => {
            if app.current_view() == View::Main {
                app.cycle_section(true);
            }
        }
        KeyCode::Tab | KeyCode::BackTab => {
            if app.active_section == Section::Dashboard && app.current_view() == View::Main {
                let action = app.dashboard.handle_key(key, &mut app.ctx);
                app.apply_action(action);
            } else {
                app.cycle_section(key.code == KeyCode::Tab);
            }
        }
        KeyCode::Enter => app.enter_detail(),
        KeyCode::Esc => {
            if app.notifications_open {
                app.close_notifications();
            } else {
                app.pop_view();
            }
        }
        KeyCode::Char(digit @ '1'..='4') => {
            if let Some(section) = Section::ALL
                .iter()
                .find(|section| section.shortcut() == digit)
            {
                app.set_section(*section);
            }
        }
        _ => {}
    }
}

fn handle_copy_to_clipboard(app: &mut App) {
    let plate = match app.current_view() {
        View::InspectionDetail => app
            .detail_inspection
            .and_then(|id| app.inspection_by_id(id))
            .map(|row| row.plate_text().to_string()),
        View::Main => match app.active_section {
            Section::Alerts => app
                .alerts
                .get(app.selected_alert)
                .and_then(|alert| alert.plate.clone()),
            _ => app.selected_inspection().map(|row| row.plate_text().to_string()),
        },
    };

    let Some(plate) = plate.filter(|plate| !plate.is_empty()) else {
        app.set_status("Nothing to copy", StatusLevel::Warn);
        return;
    };

    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(plate.clone())) {
        Ok(()) => {
            app.apply_action(crate::core::Action::Copy(plate.clone()));
            app.set_status(format!("Copied {plate}"), StatusLevel::Info);
        }
        Err(err) => app.set_status(format!("Clipboard error: {err}"), StatusLevel::Error),
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent, size: Rect) {
    let areas = ui::layout::areas(size, &app.sidebar);
    let (col, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Moved => {
            if !app.sidebar.collapsed && rect_contains(areas.sidebar, col, row) {
                app.sidebar
                    .hover(cell_right_px(col), rect_right_px(areas.sidebar));
            } else {
                app.sidebar.leave();
            }
        }
        MouseEventKind::Down(MouseButton::Left) => handle_click(app, &areas, col, row),
        MouseEventKind::Drag(MouseButton::Left) => {
            if app.sidebar.is_dragging() {
                app.sidebar.drag_to(cell_right_px(col));
            }
        }
        MouseEventKind::Up(MouseButton::Left) => app.sidebar.end_drag(),
        MouseEventKind::ScrollDown => app.move_selection_down(),
        MouseEventKind::ScrollUp => app.move_selection_up(),
        _ => {}
    }
}

fn handle_click(app: &mut App, areas: &ui::layout::UiAreas, col: u16, row: u16) {
    // Resize handle wins over everything when the press lands in its zone.
    if !app.sidebar.collapsed
        && rect_contains(areas.sidebar_handle, col, row)
        && app.sidebar.begin_drag(cell_right_px(col))
    {
        return;
    }

    // Toggle consumes the press so the open dropdown does not immediately
    // treat it as an outside click.
    if rect_contains(areas.notification_toggle, col, row) {
        app.toggle_notifications();
        return;
    }

    if app.notifications_open {
        let dropdown = dropdown_area(areas.size);
        if rect_contains(dropdown, col, row) {
            handle_dropdown_click(app, dropdown, row);
            return;
        }
        // Outside press closes the dropdown, then keeps going to whatever
        // was underneath it.
        app.close_notifications();
    }

    if rect_contains(areas.refresh_btn, col, row) {
        app.refresh();
        return;
    }

    if rect_contains(areas.sidebar_collapse, col, row) {
        app.toggle_sidebar();
        return;
    }

    if rect_contains(areas.sidebar_sections, col, row) {
        let first = areas.sidebar_sections.y + 1;
        if row >= first {
            let idx = (row - first) as usize;
            if let Some(section) = Section::ALL.get(idx) {
                app.focus = Focus::Sidebar;
                app.set_section(*section);
            }
        }
        return;
    }

    if app.current_view() != View::Main {
        return;
    }

    if app.active_section.has_table() && rect_contains(areas.search_input, col, row) {
        app.enter_search();
        return;
    }

    if app.active_section.has_table() && rect_contains(areas.status_selector, col, row) {
        app.cycle_status_filter();
        return;
    }

    if rect_contains(areas.table, col, row) {
        app.focus = Focus::Table;
        match app.active_section {
            // List rows start right under the border.
            Section::Alerts => {
                let first = areas.table.y + 1;
                if row >= first {
                    app.set_selection((row - first) as usize);
                }
            }
            // Table rows start under the border and the header row.
            Section::Dashboard | Section::History => {
                let first = areas.table.y + 2;
                if row >= first {
                    app.set_selection((row - first) as usize);
                }
            }
            Section::Reports => {}
        }
    }
}

fn handle_dropdown_click(app: &mut App, dropdown: Rect, row: u16) {
    // List items start inside the border.
    let inner = rect_inner(dropdown);
    if row < inner.y || row >= inner.y + inner.height {
        return;
    }
    let idx = (row - inner.y) as usize;
    if idx == 0 {
        // "Clear all" entry
        app.close_notifications();
        app.set_status("Notifications cleared", StatusLevel::Info);
        return;
    }
    if let Some(alert) = app.dropdown_alerts().get(idx - 1) {
        let inspection_id = alert.inspection_id;
        app.close_notifications();
        app.open_inspection(inspection_id);
    }
}
