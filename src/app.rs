use std::time::{Duration, Instant};

use crate::core::Context;
use crate::store::{Alert, Inspection, InspectionStatus, Stats};
use crate::ui::sidebar::SidebarState;

/// Sections in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    History,
    Alerts,
    Reports,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Dashboard,
        Section::History,
        Section::Alerts,
        Section::Reports,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::History => "History",
            Section::Alerts => "Alerts",
            Section::Reports => "Reports",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Section::Dashboard => '1',
            Section::History => '2',
            Section::Alerts => '3',
            Section::Reports => '4',
        }
    }

    /// Does this section show the filterable inspection table?
    pub fn has_table(&self) -> bool {
        matches!(self, Section::Dashboard | Section::History)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Main,
    InspectionDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Table,
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing into the plate search input.
    Search,
    /// Typing a : command.
    Command,
}

/// The status selector next to the search input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Safe,
    Unsafe,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [StatusFilter::All, StatusFilter::Safe, StatusFilter::Unsafe];

    pub fn title(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Safe => "Safe",
            StatusFilter::Unsafe => "Unsafe",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "all" | "*" => Some(StatusFilter::All),
            "safe" | "ok" => Some(StatusFilter::Safe),
            "unsafe" | "bad" => Some(StatusFilter::Unsafe),
            _ => None,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Safe,
            StatusFilter::Safe => StatusFilter::Unsafe,
            StatusFilter::Unsafe => StatusFilter::All,
        }
    }

    fn matches(&self, status: InspectionStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Safe => status == InspectionStatus::Safe,
            StatusFilter::Unsafe => status == InspectionStatus::Unsafe,
        }
    }
}

/// Row visibility: the query must be empty or a case-insensitive substring of
/// the plate cell text, and the status selector must be `all` or match the
/// row's badge status. Derived on every evaluation, never stored.
pub fn row_visible(
    plate: &str,
    status: InspectionStatus,
    query: &str,
    filter: StatusFilter,
) -> bool {
    let match_plate = query.is_empty() || plate.to_lowercase().contains(&query.to_lowercase());
    match_plate && filter.matches(status)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Default, Clone)]
pub struct CommandBar {
    pub input: String,
    pub last: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub since: Instant,
}

#[derive(Debug, Clone)]
pub struct PendingChord {
    pub key: char,
    pub since: Instant,
}

#[derive(Debug)]
pub struct App {
    /// Shared context for modules
    pub ctx: Context,
    pub dashboard: crate::modules::dashboard::Dashboard,
    pub active_section: Section,
    pub view_stack: Vec<View>,
    pub focus: Focus,
    pub input_mode: InputMode,
    /// Plate search input contents.
    pub query: String,
    pub status_filter: StatusFilter,
    pub recent: Vec<Inspection>,
    pub history: Vec<Inspection>,
    pub alerts: Vec<Alert>,
    pub stats: Stats,
    pub sidebar: SidebarState,
    pub notifications_open: bool,
    /// Refresh control is disabled while this is set.
    pub refreshing: bool,
    pub selected_row: usize,
    pub selected_alert: usize,
    /// Inspection shown in the detail view.
    pub detail_inspection: Option<i64>,
    pub command: CommandBar,
    pub db_path: String,
    pub status: Option<StatusMessage>,
    pub pending_chord: Option<PendingChord>,
    pub pending_refresh_request: bool,
    pub help_open: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            ctx: Context::new(),
            dashboard: crate::modules::dashboard::Dashboard::new(),
            active_section: Section::Dashboard,
            view_stack: vec![View::Main],
            focus: Focus::Table,
            input_mode: InputMode::Normal,
            query: String::new(),
            status_filter: StatusFilter::All,
            recent: Vec::new(),
            history: Vec::new(),
            alerts: Vec::new(),
            stats: Stats::default(),
            sidebar: SidebarState::new(),
            notifications_open: false,
            refreshing: false,
            selected_row: 0,
            selected_alert: 0,
            detail_inspection: None,
            command: CommandBar::default(),
            db_path: String::new(),
            status: None,
            pending_chord: None,
            pending_refresh_request: false,
            help_open: false,
            should_quit: false,
        }
    }

    /// Sync context with app state
    pub fn sync_context(&mut self) {
        self.ctx.db_path = self.db_path.clone();
        self.ctx.pending_alerts = self.stats.pending_alerts;
        self.ctx.refreshing = self.refreshing;
        self.ctx.selected = match self.current_view() {
            View::InspectionDetail => match self.detail_inspection {
                Some(id) => crate::core::Selected::Inspection(id),
                None => crate::core::Selected::None,
            },
            View::Main => match self.active_section {
                Section::Alerts => match self.alerts.get(self.selected_alert) {
                    Some(alert) => crate::core::Selected::Alert(alert.id),
                    None => crate::core::Selected::None,
                },
                _ => match self.selected_inspection() {
                    Some(inspection) => crate::core::Selected::Inspection(inspection.id),
                    None => crate::core::Selected::None,
                },
            },
        };
    }

    pub fn current_view(&self) -> View {
        *self.view_stack.last().unwrap_or(&View::Main)
    }

    pub fn focus_label(&self) -> &'static str {
        match self.focus {
            Focus::Sidebar => "Sidebar",
            Focus::Table => "Table",
            Focus::Command => "Command",
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self) {
        self.clear_expired_chord();
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > Duration::from_secs(3) {
                self.status = None;
            }
        }
        self.clamp_selections();
    }

    // === Table filter ===

    /// The rows behind the table in the current section.
    pub fn table_rows(&self) -> &[Inspection] {
        match self.active_section {
            Section::Dashboard => &self.recent,
            Section::History => &self.history,
            _ => &[],
        }
    }

    /// Indices of rows visible under the current query and status selector.
    /// Re-derived on every call; same inputs always yield the same set.
    pub fn visible_row_indices(&self) -> Vec<usize> {
        self.table_rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                row_visible(row.plate_text(), row.status, &self.query, self.status_filter)
            })
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn selected_inspection(&self) -> Option<&Inspection> {
        let indices = self.visible_row_indices();
        let idx = indices.get(self.selected_row)?;
        self.table_rows().get(*idx)
    }

    pub fn inspection_by_id(&self, id: i64) -> Option<&Inspection> {
        self.history
            .iter()
            .chain(self.recent.iter())
            .find(|row| row.id == id)
    }

    pub fn alerts_for(&self, inspection_id: i64) -> Vec<&Alert> {
        self.alerts
            .iter()
            .filter(|alert| alert.inspection_id == inspection_id)
            .collect()
    }

    pub fn push_query_char(&mut self, ch: char) {
        self.query.push(ch);
        self.selected_row = 0;
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
        self.selected_row = 0;
    }

    pub fn set_query(&mut self, query: String) {
        self.query = query;
        self.selected_row = 0;
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
        self.selected_row = 0;
    }

    pub fn cycle_status_filter(&mut self) {
        self.set_status_filter(self.status_filter.next());
        self.set_status(
            format!("Status filter: {}", self.status_filter.title()),
            StatusLevel::Info,
        );
    }

    pub fn clear_filters(&mut self) {
        self.query.clear();
        self.status_filter = StatusFilter::All;
        self.selected_row = 0;
    }

    // === Refresh control ===

    /// Arm a refresh. Disabled (silent no-op) while one is already pending.
    pub fn refresh(&mut self) {
        if self.refreshing {
            return;
        }
        self.refreshing = true;
        self.pending_refresh_request = true;
        self.set_status("Refreshing…", StatusLevel::Info);
    }

    pub fn take_refresh_request(&mut self) -> bool {
        let pending = self.pending_refresh_request;
        self.pending_refresh_request = false;
        pending
    }

    /// Full snapshot replacement; the terminal analogue of a page reload.
    pub fn apply_snapshot(
        &mut self,
        recent: Vec<Inspection>,
        history: Vec<Inspection>,
        alerts: Vec<Alert>,
        stats: Stats,
    ) {
        let was_refreshing = self.refreshing;
        self.recent = recent;
        self.history = history;
        self.alerts = alerts;
        self.stats = stats;
        self.refreshing = false;
        self.selected_row = 0;
        self.selected_alert = 0;
        if was_refreshing {
            self.set_status("Dashboard reloaded", StatusLevel::Info);
        }
        self.clamp_selections();
    }

    pub fn apply_worker_error(&mut self, message: String) {
        self.refreshing = false;
        self.set_status(message, StatusLevel::Error);
    }

    // === Notification dropdown ===

    pub fn toggle_notifications(&mut self) {
        self.notifications_open = !self.notifications_open;
    }

    pub fn close_notifications(&mut self) {
        self.notifications_open = false;
    }

    /// The five most recent alerts shown in the dropdown.
    pub fn dropdown_alerts(&self) -> &[Alert] {
        let n = self.alerts.len().min(5);
        &self.alerts[..n]
    }

    // === Sidebar ===

    pub fn toggle_sidebar(&mut self) {
        self.sidebar.toggle_collapsed();
        let state = if self.sidebar.collapsed {
            "collapsed"
        } else {
            "expanded"
        };
        self.set_status(format!("Sidebar {state}"), StatusLevel::Info);
    }

    // === Navigation ===

    pub fn set_section(&mut self, section: Section) {
        self.active_section = section;
        self.reset_view();
    }

    pub fn cycle_section(&mut self, forward: bool) {
        let index = Section::ALL
            .iter()
            .position(|section| *section == self.active_section)
            .unwrap_or(0);
        let next = if forward {
            (index + 1) % Section::ALL.len()
        } else {
            (index + Section::ALL.len() - 1) % Section::ALL.len()
        };
        self.active_section = Section::ALL[next];
        self.reset_view();
    }

    fn reset_view(&mut self) {
        self.view_stack.truncate(1);
        self.detail_inspection = None;
        self.selected_row = 0;
        self.selected_alert = 0;
    }

    pub fn enter_detail(&mut self) {
        let id = match self.active_section {
            Section::Alerts => self.alerts.get(self.selected_alert).map(|a| a.inspection_id),
            _ => self.selected_inspection().map(|row| row.id),
        };
        if let Some(id) = id {
            self.open_inspection(id);
        }
    }

    pub fn open_inspection(&mut self, id: i64) {
        if self.inspection_by_id(id).is_none() {
            self.set_status(format!("Inspection #{id} not loaded"), StatusLevel::Warn);
            return;
        }
        self.detail_inspection = Some(id);
        if self.current_view() != View::InspectionDetail {
            self.view_stack.push(View::InspectionDetail);
        }
    }

    pub fn pop_view(&mut self) {
        if self.view_stack.len() > 1 {
            self.view_stack.pop();
            self.detail_inspection = None;
        }
    }

    pub fn list_len(&self) -> usize {
        match self.active_section {
            Section::Alerts => self.alerts.len(),
            Section::Reports => 0,
            _ => self.visible_row_indices().len(),
        }
    }

    pub fn current_selection(&self) -> usize {
        match self.active_section {
            Section::Alerts => self.selected_alert,
            _ => self.selected_row,
        }
    }

    pub fn set_selection(&mut self, selection: usize) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        let clamped = selection.min(len - 1);
        match self.active_section {
            Section::Alerts => self.selected_alert = clamped,
            _ => self.selected_row = clamped,
        }
    }

    pub fn move_selection_up(&mut self) {
        let current = self.current_selection();
        if current > 0 {
            self.set_selection(current - 1);
        }
    }

    pub fn move_selection_down(&mut self) {
        self.set_selection(self.current_selection() + 1);
    }

    pub fn go_to_top(&mut self) {
        self.set_selection(0);
    }

    pub fn go_to_bottom(&mut self) {
        let len = self.list_len();
        if len > 0 {
            self.set_selection(len - 1);
        }
    }

    pub fn page_up(&mut self, amount: usize) {
        let current = self.current_selection();
        self.set_selection(current.saturating_sub(amount));
    }

    pub fn page_down(&mut self, amount: usize) {
        self.set_selection(self.current_selection() + amount);
    }

    fn clamp_selections(&mut self) {
        let rows = self.visible_row_indices().len();
        if self.selected_row >= rows {
            self.selected_row = rows.saturating_sub(1);
        }
        if self.selected_alert >= self.alerts.len() {
            self.selected_alert = self.alerts.len().saturating_sub(1);
        }
    }

    // === Input modes ===

    pub fn enter_search(&mut self) {
        self.input_mode = InputMode::Search;
        self.focus = Focus::Command;
    }

    pub fn exit_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.focus = Focus::Table;
    }

    pub fn enter_command(&mut self) {
        self.input_mode = InputMode::Command;
        self.focus = Focus::Command;
        self.command.input.clear();
    }

    pub fn exit_command(&mut self) {
        self.input_mode = InputMode::Normal;
        self.focus = Focus::Table;
        self.command.input.clear();
    }

    pub fn apply_command(&mut self) {
        let input = self.command.input.trim().to_string();
        self.exit_command();
        if input.is_empty() {
            return;
        }
        self.command.last = Some(input.clone());
        let cmd = crate::core::parse_command(&input);
        let action = self.execute_command(&cmd);
        self.apply_action(action);
    }

    pub fn execute_command(&mut self, cmd: &crate::core::Command) -> crate::core::Action {
        use crate::core::{Action, Command, NavigateTarget, NotifyLevel};

        match cmd {
            Command::Dashboard => Action::Navigate(NavigateTarget::Dashboard),
            Command::History => Action::Navigate(NavigateTarget::History),
            Command::Alerts => Action::Navigate(NavigateTarget::Alerts),
            Command::Reports => Action::Navigate(NavigateTarget::Reports),
            Command::Inspection(id) => Action::Navigate(NavigateTarget::Inspection(*id)),
            Command::Back => Action::Navigate(NavigateTarget::Back),
            Command::Filter(arg) => {
                self.set_query(arg.clone().unwrap_or_default());
                Action::None
            }
            Command::Status(arg) => match arg.as_deref().map(StatusFilter::parse) {
                Some(Some(filter)) => {
                    self.set_status_filter(filter);
                    Action::Notify(
                        format!("Status filter: {}", filter.title()),
                        NotifyLevel::Info,
                    )
                }
                _ => Action::Notify(
                    "Usage: :status <all|safe|unsafe>".to_string(),
                    NotifyLevel::Warn,
                ),
            },
            Command::Clear => {
                self.clear_filters();
                Action::Notify("Filters cleared".to_string(), NotifyLevel::Info)
            }
            Command::Refresh => {
                self.refresh();
                Action::None
            }
            Command::Export(_) => crate::modules::export::export_current_view(self),
            Command::Collapse => {
                self.toggle_sidebar();
                Action::None
            }
            Command::Quit => Action::Quit,
            Command::Unknown(raw) => {
                Action::Notify(format!("Unknown command: {raw}"), NotifyLevel::Warn)
            }
        }
    }

    pub fn apply_action(&mut self, action: crate::core::Action) {
        use crate::core::{Action, NavigateTarget, NotifyLevel};

        match action {
            Action::None => {}
            Action::Navigate(target) => match target {
                NavigateTarget::Back => self.pop_view(),
                NavigateTarget::Dashboard => self.set_section(Section::Dashboard),
                NavigateTarget::History => self.set_section(Section::History),
                NavigateTarget::Alerts => self.set_section(Section::Alerts),
                NavigateTarget::Reports => self.set_section(Section::Reports),
                NavigateTarget::Inspection(id) => self.open_inspection(id),
            },
            Action::Copy(text) => self.ctx.set_clipboard(text),
            Action::Notify(text, level) => {
                let level = match level {
                    NotifyLevel::Info => StatusLevel::Info,
                    NotifyLevel::Warn => StatusLevel::Warn,
                    NotifyLevel::Error => StatusLevel::Error,
                };
                self.set_status(text, level);
            }
            Action::CloseOverlay => {
                self.close_notifications();
                self.help_open = false;
            }
            Action::Quit => self.should_quit = true,
        }
    }

    // === Chords ===

    pub fn set_chord(&mut self, key: char) {
        self.pending_chord = Some(PendingChord {
            key,
            since: Instant::now(),
        });
    }

    pub fn consume_chord(&mut self, key: char) -> bool {
        let matched = self
            .pending_chord
            .as_ref()
            .map(|chord| chord.key == key && chord.since.elapsed() < Duration::from_millis(600))
            .unwrap_or(false);
        if matched {
            self.pending_chord = None;
        }
        matched
    }

    pub fn clear_chord(&mut self) {
        self.pending_chord = None;
    }

    fn clear_expired_chord(&mut self) {
        if let Some(chord) = self.pending_chord.as_ref() {
            if chord.since.elapsed() >= Duration::from_millis(600) {
                self.pending_chord = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn inspection(id: i64, plate: Option<&str>, status: InspectionStatus) -> Inspection {
        Inspection {
            id,
            timestamp: NaiveDate::from_ymd_opt(2026, 2, 13)
                .unwrap()
                .and_hms_opt(14, 48, 33)
                .unwrap(),
            plate: plate.map(str::to_string),
            location: "Main Gate Entrance".to_string(),
            camera: Some("CAM-001".to_string()),
            status,
            confidence: 90,
            defects: Vec::new(),
        }
    }

    fn app_with_rows(rows: Vec<Inspection>) -> App {
        let mut app = App::new();
        app.apply_snapshot(rows.clone(), rows, Vec::new(), Stats::default());
        app
    }

    #[test]
    fn test_row_visible_query_substring() {
        // query "ab12" vs plate "AB12 XYZ" is a case-insensitive hit
        assert!(row_visible(
            "AB12 XYZ",
            InspectionStatus::Safe,
            "ab12",
            StatusFilter::All
        ));
        assert!(!row_visible(
            "CD99 XYZ",
            InspectionStatus::Safe,
            "ab12",
            StatusFilter::All
        ));
        // empty query matches everything
        assert!(row_visible(
            "",
            InspectionStatus::Unknown,
            "",
            StatusFilter::All
        ));
    }

    #[test]
    fn test_row_visible_status_conjunction() {
        // status filter applies regardless of query
        assert!(row_visible(
            "AB12 XYZ",
            InspectionStatus::Unsafe,
            "",
            StatusFilter::Unsafe
        ));
        assert!(!row_visible(
            "AB12 XYZ",
            InspectionStatus::Safe,
            "",
            StatusFilter::Unsafe
        ));
        // both legs must hold
        assert!(!row_visible(
            "AB12 XYZ",
            InspectionStatus::Unsafe,
            "cd99",
            StatusFilter::Unsafe
        ));
    }

    #[test]
    fn test_unknown_status_only_matches_all() {
        assert!(row_visible("X", InspectionStatus::Unknown, "", StatusFilter::All));
        assert!(!row_visible("X", InspectionStatus::Unknown, "", StatusFilter::Safe));
        assert!(!row_visible("X", InspectionStatus::Unknown, "", StatusFilter::Unsafe));
    }

    #[test]
    fn test_visible_rows_filtering() {
        let mut app = app_with_rows(vec![
            inspection(1, Some("AB12 XYZ"), InspectionStatus::Safe),
            inspection(2, Some("CD99 XYZ"), InspectionStatus::Unsafe),
            inspection(3, None, InspectionStatus::Safe),
        ]);

        assert_eq!(app.visible_row_indices(), vec![0, 1, 2]);

        app.set_query("ab12".to_string());
        assert_eq!(app.visible_row_indices(), vec![0]);

        app.set_query(String::new());
        app.set_status_filter(StatusFilter::Unsafe);
        assert_eq!(app.visible_row_indices(), vec![1]);

        // A missing plate reads as empty text: hidden by any non-empty query.
        app.set_status_filter(StatusFilter::All);
        app.set_query("x".to_string());
        assert_eq!(app.visible_row_indices(), vec![0, 1]);
    }

    #[test]
    fn test_filter_idempotence() {
        let mut app = app_with_rows(vec![
            inspection(1, Some("AB12 XYZ"), InspectionStatus::Safe),
            inspection(2, Some("CD99 XYZ"), InspectionStatus::Unsafe),
        ]);
        app.set_query("xyz".to_string());
        let first = app.visible_row_indices();
        let second = app.visible_row_indices();
        assert_eq!(first, second);
    }

    #[test]
    fn test_refresh_disabled_while_pending() {
        let mut app = App::new();
        app.refresh();
        assert!(app.refreshing);
        assert!(app.take_refresh_request());

        // Second activation is a silent no-op until the reload lands.
        app.refresh();
        assert!(!app.take_refresh_request());

        app.apply_snapshot(Vec::new(), Vec::new(), Vec::new(), Stats::default());
        assert!(!app.refreshing);
        app.refresh();
        assert!(app.take_refresh_request());
    }

    #[test]
    fn test_snapshot_resets_selection() {
        let mut app = app_with_rows(vec![
            inspection(1, Some("A"), InspectionStatus::Safe),
            inspection(2, Some("B"), InspectionStatus::Safe),
            inspection(3, Some("C"), InspectionStatus::Safe),
        ]);
        app.move_selection_down();
        app.move_selection_down();
        assert_eq!(app.selected_row, 2);

        app.apply_snapshot(
            vec![inspection(9, Some("Z"), InspectionStatus::Safe)],
            Vec::new(),
            Vec::new(),
            Stats::default(),
        );
        assert_eq!(app.selected_row, 0);
    }

    #[test]
    fn test_dropdown_toggle_and_close() {
        let mut app = App::new();
        assert!(!app.notifications_open);
        app.toggle_notifications();
        assert!(app.notifications_open);
        app.close_notifications();
        assert!(!app.notifications_open);
        // closing when already closed stays closed
        app.close_notifications();
        assert!(!app.notifications_open);
    }

    #[test]
    fn test_detail_navigation() {
        let mut app = app_with_rows(vec![
            inspection(7, Some("DPJ-2877"), InspectionStatus::Unsafe),
            inspection(8, Some("MLL-2498"), InspectionStatus::Safe),
        ]);
        app.move_selection_down();
        app.enter_detail();
        assert_eq!(app.current_view(), View::InspectionDetail);
        assert_eq!(app.detail_inspection, Some(8));
        app.pop_view();
        assert_eq!(app.current_view(), View::Main);
        assert_eq!(app.detail_inspection, None);
    }

    #[test]
    fn test_selection_clamped_to_visible_set() {
        let mut app = app_with_rows(vec![
            inspection(1, Some("AB12"), InspectionStatus::Safe),
            inspection(2, Some("AB34"), InspectionStatus::Safe),
            inspection(3, Some("CD56"), InspectionStatus::Safe),
        ]);
        app.set_selection(2);
        app.set_query("ab".to_string());
        app.on_tick();
        assert!(app.selected_row < app.visible_row_indices().len());
    }

    #[test]
    fn test_copy_action_lands_in_context() {
        let mut app = App::new();
        app.apply_action(crate::core::Action::Copy("DPJ-2877".to_string()));
        assert_eq!(app.ctx.get_clipboard(), Some("DPJ-2877"));
    }

    #[test]
    fn test_status_filter_cycle() {
        assert_eq!(StatusFilter::All.next(), StatusFilter::Safe);
        assert_eq!(StatusFilter::Safe.next(), StatusFilter::Unsafe);
        assert_eq!(StatusFilter::Unsafe.next(), StatusFilter::All);
        assert_eq!(StatusFilter::parse("Unsafe"), Some(StatusFilter::Unsafe));
        assert_eq!(StatusFilter::parse("nope"), None);
    }
}
