//! Screen layout
//!
//! Computes the named rectangles the rest of the UI draws into and the mouse
//! handlers hit-test against: the search input, status selector, inspection
//! table, refresh control, notification toggle, sidebar (with its collapse
//! control and resize handle column) and the main area. The main area starts
//! exactly where the sidebar ends, so its leading margin always equals the
//! sidebar width.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::sidebar::SidebarState;

#[derive(Debug, Clone, Copy)]
pub struct UiAreas {
    pub size: Rect,
    pub header: Rect,
    pub title: Rect,
    pub refresh_btn: Rect,
    pub notification_toggle: Rect,
    pub sidebar: Rect,
    pub sidebar_sections: Rect,
    pub sidebar_collapse: Rect,
    /// Trailing-edge column of the sidebar; the drag-to-resize hit zone.
    pub sidebar_handle: Rect,
    pub main_area: Rect,
    pub stats: Rect,
    pub filter_bar: Rect,
    pub search_input: Rect,
    pub status_selector: Rect,
    pub table: Rect,
    pub status_line: Rect,
    pub command_line: Rect,
}

pub fn areas(size: Rect, sidebar: &SidebarState) -> UiAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(size);

    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(15),
            Constraint::Length(10),
        ])
        .split(vertical[0]);

    let sidebar_cells = sidebar.width_cells().min(size.width.saturating_sub(10));
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_cells), Constraint::Min(0)])
        .split(vertical[1]);

    let sidebar_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(3)])
        .split(main_chunks[0]);

    let sidebar_handle = Rect {
        x: (main_chunks[0].x + main_chunks[0].width).saturating_sub(1),
        y: main_chunks[0].y,
        width: main_chunks[0].width.min(1),
        height: main_chunks[0].height,
    };

    let content_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(main_chunks[1]);

    let filter_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(content_chunks[1]);

    let footer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(vertical[2]);

    UiAreas {
        size,
        header: vertical[0],
        title: header_chunks[0],
        refresh_btn: header_chunks[1],
        notification_toggle: header_chunks[2],
        sidebar: main_chunks[0],
        sidebar_sections: sidebar_chunks[0],
        sidebar_collapse: sidebar_chunks[1],
        sidebar_handle,
        main_area: main_chunks[1],
        stats: content_chunks[0],
        filter_bar: content_chunks[1],
        search_input: filter_chunks[0],
        status_selector: filter_chunks[1],
        table: content_chunks[2],
        status_line: footer_chunks[0],
        command_line: footer_chunks[1],
    }
}

/// Dropdown popup anchored under the notification toggle.
pub fn dropdown_area(size: Rect) -> Rect {
    let width = size.width.min(46);
    let height = size.height.saturating_sub(3).min(9);
    Rect {
        x: size.x + size.width - width,
        y: size.y + 3.min(size.height),
        width,
        height,
    }
}

pub fn rect_contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

pub fn rect_inner(rect: Rect) -> Rect {
    Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}
