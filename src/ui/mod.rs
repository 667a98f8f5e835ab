pub mod layout;
pub mod sidebar;

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table},
    Frame,
};

use crate::app::{App, Focus, InputMode, Section, StatusFilter, StatusLevel, View};
use crate::store::{Alert, AlertStatus, Inspection, InspectionStatus, TIMESTAMP_FORMAT};

use layout::UiAreas;

pub fn draw(f: &mut Frame, app: &App) {
    let size = f.size();
    if size.width == 0 || size.height == 0 {
        return;
    }
    let areas = layout::areas(size, &app.sidebar);

    draw_header(f, app, &areas);
    draw_sidebar(f, app, &areas);

    match app.current_view() {
        View::InspectionDetail => draw_detail(f, app, &areas),
        View::Main => match app.active_section {
            Section::Dashboard | Section::History => draw_table_section(f, app, &areas),
            Section::Alerts => draw_alerts(f, app, &areas),
            Section::Reports => draw_reports(f, app, &areas),
        },
    }

    draw_status_line(f, app, areas.status_line);
    draw_command_line(f, app, areas.command_line);

    if app.notifications_open {
        draw_notification_dropdown(f, app, size);
    }
    if app.help_open {
        draw_help(f, size);
    }
}

fn draw_header(f: &mut Frame, app: &App, areas: &UiAreas) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            " ATIS ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Tire Inspection Dashboard  "),
        Span::styled(&app.db_path, Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("  [{}]", app.focus_label()),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, areas.title);

    // Refresh control: relabeled and visually disabled while a reload is
    // pending.
    let refresh = if app.refreshing {
        Paragraph::new("Refreshing…").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new("[ Refresh ]").style(Style::default().fg(Color::Green))
    };
    f.render_widget(
        refresh.block(Block::default().borders(Borders::BOTTOM)),
        areas.refresh_btn,
    );

    let pending = app.stats.pending_alerts;
    let bell_style = if app.notifications_open {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else if pending > 0 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let bell = Paragraph::new(format!("[N {pending}]"))
        .style(bell_style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(bell, areas.notification_toggle);
}

fn draw_sidebar(f: &mut Frame, app: &App, areas: &UiAreas) {
    let items: Vec<ListItem> = Section::ALL
        .iter()
        .map(|section| {
            let active = *section == app.active_section;
            let label = if app.sidebar.collapsed {
                format!(" {} ", section.shortcut())
            } else {
                format!(" {} {} ", section.shortcut(), section.title())
            };
            let style = if active {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            ListItem::new(Line::styled(label, style))
        })
        .collect();

    let border_style = if app.focus == Focus::Sidebar {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(if app.sidebar.collapsed { "" } else { "Sections" }),
    );
    f.render_widget(list, areas.sidebar_sections);

    let collapse_label = if app.sidebar.collapsed { "»" } else { "« Collapse" };
    let collapse = Paragraph::new(collapse_label)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL).border_style(border_style));
    f.render_widget(collapse, areas.sidebar_collapse);

    // Resize handle column lights up on hover and while dragging.
    if !app.sidebar.collapsed && areas.sidebar_handle.width > 0 {
        let style = if app.sidebar.is_dragging() {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else if app.sidebar.handle_armed() {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let bar: String = std::iter::repeat("┃\n")
            .take(areas.sidebar_handle.height as usize)
            .collect();
        f.render_widget(Paragraph::new(bar).style(style), areas.sidebar_handle);
    }
}

fn draw_table_section(f: &mut Frame, app: &App, areas: &UiAreas) {
    app.dashboard.render_cards(f, areas.stats, &app.stats);
    draw_filter_bar(f, app, areas);

    let indices = app.visible_row_indices();
    let table_rows = app.table_rows();
    let rows: Vec<Row> = indices
        .iter()
        .enumerate()
        .map(|(visible_idx, idx)| {
            let row = &table_rows[*idx];
            let style = if visible_idx == app.selected_row {
                Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            inspection_row(row).style(style)
        })
        .collect();

    let title = match app.active_section {
        Section::Dashboard => format!("Recent Inspections ({})", rows.len()),
        _ => format!("Inspection History ({})", rows.len()),
    };
    let table = Table::new(
        rows,
        [
            Constraint::Length(19),
            Constraint::Length(12),
            Constraint::Min(16),
            Constraint::Length(9),
            Constraint::Length(8),
            Constraint::Length(6),
        ],
    )
    .header(
        Row::new(["TIME", "PLATE", "LOCATION", "CAM", "STATUS", "CONF"])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, areas.table);
}

fn inspection_row(row: &Inspection) -> Row<'_> {
    Row::new(vec![
        Cell::from(row.timestamp.format(TIMESTAMP_FORMAT).to_string()),
        Cell::from(row.plate_text()),
        Cell::from(row.location.as_str()),
        Cell::from(row.camera.as_deref().unwrap_or("--")),
        Cell::from(Span::styled(
            row.status.badge(),
            Style::default().fg(status_color(row.status)),
        )),
        Cell::from(format!("{}%", row.confidence)),
    ])
}

fn status_color(status: InspectionStatus) -> Color {
    match status {
        InspectionStatus::Safe => Color::Green,
        InspectionStatus::Unsafe => Color::Red,
        InspectionStatus::Unknown => Color::DarkGray,
    }
}

fn draw_filter_bar(f: &mut Frame, app: &App, areas: &UiAreas) {
    let searching = app.input_mode == InputMode::Search;
    let search_style = if searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let search = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::raw(app.query.as_str()),
        Span::styled(if searching { "▏" } else { "" }, search_style),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(search_style)
            .title("Search plate (/)"),
    );
    f.render_widget(search, areas.search_input);

    let selector = Line::from(
        StatusFilter::ALL
            .iter()
            .flat_map(|filter| {
                let style = if *filter == app.status_filter {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Gray)
                };
                vec![Span::styled(format!(" {} ", filter.title()), style), Span::raw(" ")]
            })
            .collect::<Vec<_>>(),
    );
    f.render_widget(
        Paragraph::new(selector).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Status (s)"),
        ),
        areas.status_selector,
    );
}

fn draw_alerts(f: &mut Frame, app: &App, areas: &UiAreas) {
    app.dashboard.render_cards(f, areas.stats, &app.stats);

    // Alerts reuse the filter bar slot for a summary line.
    let pending = app
        .alerts
        .iter()
        .filter(|alert| alert.status == AlertStatus::Pending)
        .count();
    let summary = Paragraph::new(format!(
        " {} alerts, {} pending. Enter opens the inspection.",
        app.alerts.len(),
        pending
    ))
    .block(Block::default().borders(Borders::ALL).title("Alerts"));
    f.render_widget(summary, areas.filter_bar);

    let items: Vec<ListItem> = app
        .alerts
        .iter()
        .enumerate()
        .map(|(idx, alert)| {
            let style = if idx == app.selected_alert {
                Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(alert_line(alert)).style(style)
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Alert Queue ({})", app.alerts.len())),
    );
    f.render_widget(list, areas.table);
}

fn alert_line(alert: &Alert) -> Line<'_> {
    let (tag, color) = match alert.status {
        AlertStatus::Pending => ("PENDING", Color::Red),
        AlertStatus::Acknowledged => ("ACK", Color::Yellow),
        AlertStatus::Resolved => ("RESOLVED", Color::Green),
    };
    Line::from(vec![
        Span::styled(format!(" {tag:<8} "), Style::default().fg(color)),
        Span::raw(format!(
            "#{} {} @ {} ",
            alert.inspection_id,
            alert.plate.as_deref().unwrap_or("--"),
            alert.location
        )),
        Span::styled(
            alert.response.as_deref().unwrap_or(""),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

fn draw_reports(f: &mut Frame, app: &App, areas: &UiAreas) {
    app.dashboard.render_cards(f, areas.stats, &app.stats);

    let lines = vec![
        Line::raw(""),
        Line::raw(format!("  Inspections on record: {}", app.stats.total)),
        Line::raw(format!(
            "  Safe / Unsafe: {} / {}",
            app.stats.safe, app.stats.unsafe_count
        )),
        Line::raw(format!("  Pass rate: {:.1}%", app.stats.pass_rate)),
        Line::raw(""),
        Line::styled(
            "  Press e (or :export) to write the full history as CSV.",
            Style::default().fg(Color::Gray),
        ),
    ];
    let report = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Reports"));
    let area = Rect {
        x: areas.filter_bar.x,
        y: areas.filter_bar.y,
        width: areas.filter_bar.width,
        height: areas.filter_bar.height + areas.table.height,
    };
    f.render_widget(report, area);
}

fn draw_detail(f: &mut Frame, app: &App, areas: &UiAreas) {
    let area = Rect {
        x: areas.stats.x,
        y: areas.stats.y,
        width: areas.stats.width,
        height: areas.stats.height + areas.filter_bar.height + areas.table.height,
    };
    let Some(inspection) = app.detail_inspection.and_then(|id| app.inspection_by_id(id)) else {
        let empty = Paragraph::new("Inspection not loaded")
            .block(Block::default().borders(Borders::ALL).title("Inspection"));
        f.render_widget(empty, area);
        return;
    };

    let mut lines = vec![
        Line::raw(""),
        detail_line("Time", inspection.timestamp.format(TIMESTAMP_FORMAT).to_string()),
        detail_line("Plate", inspection.plate_text().to_string()),
        detail_line("Location", inspection.location.clone()),
        detail_line("Camera", inspection.camera.clone().unwrap_or_else(|| "--".into())),
        Line::from(vec![
            Span::styled("  Status      ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                inspection.status.badge(),
                Style::default()
                    .fg(status_color(inspection.status))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        detail_line("Confidence", format!("{}%", inspection.confidence)),
    ];

    if inspection.defects.is_empty() {
        lines.push(detail_line("Defects", "none".to_string()));
    } else {
        lines.push(detail_line("Defects", inspection.defects.join(", ")));
    }

    let related = app.alerts_for(inspection.id);
    if !related.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "  Alerts",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        for alert in related {
            lines.push(alert_line(alert));
        }
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "  Esc back  y copy plate  e export JSON",
        Style::default().fg(Color::DarkGray),
    ));

    let detail = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Inspection #{}", inspection.id)),
    );
    f.render_widget(detail, area);
}

fn detail_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label:<11} "), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

fn draw_status_line(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    if app.sidebar.is_dragging() {
        spans.push(Span::styled(
            format!(" sidebar {}px ", app.sidebar.width()),
            Style::default().fg(Color::Cyan),
        ));
    }
    match app.status_text() {
        Some((text, level)) => {
            let color = match level {
                StatusLevel::Info => Color::Gray,
                StatusLevel::Warn => Color::Yellow,
                StatusLevel::Error => Color::Red,
            };
            spans.push(Span::styled(format!(" {text}"), Style::default().fg(color)));
        }
        None => {
            let selected = match &app.ctx.selected {
                crate::core::Selected::Inspection(id) => format!(" | inspection #{id}"),
                crate::core::Selected::Alert(id) => format!(" | alert #{id}"),
                crate::core::Selected::None => String::new(),
            };
            spans.push(Span::styled(
                format!(
                    " {} | {} rows{selected} | ? help",
                    app.active_section.title(),
                    app.list_len()
                ),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_command_line(f: &mut Frame, app: &App, area: Rect) {
    let line = match app.input_mode {
        InputMode::Command => Line::from(vec![
            Span::styled(" :", Style::default().fg(Color::Yellow)),
            Span::raw(app.command.input.as_str()),
            Span::styled("▏", Style::default().fg(Color::Yellow)),
        ]),
        InputMode::Search => Line::from(vec![
            Span::styled(" Search plate: ", Style::default().fg(Color::Yellow)),
            Span::raw(app.query.as_str()),
            Span::styled("▏", Style::default().fg(Color::Yellow)),
        ]),
        InputMode::Normal => Line::styled(
            " / search  s status  r refresh  n alerts  c sidebar  : command  q quit",
            Style::default().fg(Color::DarkGray),
        ),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_notification_dropdown(f: &mut Frame, app: &App, size: Rect) {
    let area = layout::dropdown_area(size);
    if area.width == 0 || area.height == 0 {
        return;
    }
    f.render_widget(Clear, area);

    let mut items = vec![ListItem::new(Line::styled(
        " Clear all",
        Style::default().fg(Color::Cyan),
    ))];
    if app.dropdown_alerts().is_empty() {
        items.push(ListItem::new(Line::styled(
            " No alerts",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for alert in app.dropdown_alerts() {
        items.push(ListItem::new(alert_line(alert)));
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!("Notifications ({} pending)", app.stats.pending_alerts)),
    );
    f.render_widget(list, area);
}

fn draw_help(f: &mut Frame, size: Rect) {
    let width = size.width.min(52);
    let height = size.height.min(16);
    let area = Rect {
        x: size.x + (size.width - width) / 2,
        y: size.y + (size.height - height) / 2,
        width,
        height,
    };
    f.render_widget(Clear, area);

    let lines = vec![
        Line::raw(""),
        Line::raw("  1-4        jump to section"),
        Line::raw("  j/k        move selection"),
        Line::raw("  gg / G     top / bottom"),
        Line::raw("  Enter      open inspection"),
        Line::raw("  Esc        back / close"),
        Line::raw("  /          search plates"),
        Line::raw("  s          cycle status filter"),
        Line::raw("  r          refresh data"),
        Line::raw("  n          notifications"),
        Line::raw("  c          collapse sidebar"),
        Line::raw("  e          export view"),
        Line::raw("  y          copy plate"),
        Line::raw("  :          command line"),
    ];
    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title("Help"),
    );
    f.render_widget(help, area);
}
