use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::core::{Action, Context, Module, NavigateTarget};
use crate::store::Stats;

/// The stat cards across the top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatCard {
    #[default]
    Total,
    Safe,
    Unsafe,
    PassRate,
    PendingAlerts,
}

impl StatCard {
    pub const ALL: [StatCard; 5] = [
        StatCard::Total,
        StatCard::Safe,
        StatCard::Unsafe,
        StatCard::PassRate,
        StatCard::PendingAlerts,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            StatCard::Total => "Total Inspections",
            StatCard::Safe => "Safe",
            StatCard::Unsafe => "Unsafe",
            StatCard::PassRate => "Pass Rate",
            StatCard::PendingAlerts => "Pending Alerts",
        }
    }

    pub fn value(&self, stats: &Stats) -> String {
        match self {
            StatCard::Total => stats.total.to_string(),
            StatCard::Safe => stats.safe.to_string(),
            StatCard::Unsafe => stats.unsafe_count.to_string(),
            StatCard::PassRate => format!("{:.1}%", stats.pass_rate),
            StatCard::PendingAlerts => stats.pending_alerts.to_string(),
        }
    }

    fn accent(&self) -> Color {
        match self {
            StatCard::Total => Color::Cyan,
            StatCard::Safe => Color::Green,
            StatCard::Unsafe => Color::Red,
            StatCard::PassRate => Color::Yellow,
            StatCard::PendingAlerts => Color::Magenta,
        }
    }
}

#[derive(Debug, Default)]
pub struct Dashboard {
    pub active_card: StatCard,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_card(&mut self) {
        let index = StatCard::ALL
            .iter()
            .position(|card| *card == self.active_card)
            .unwrap_or(0);
        self.active_card = StatCard::ALL[(index + 1) % StatCard::ALL.len()];
    }

    pub fn prev_card(&mut self) {
        let index = StatCard::ALL
            .iter()
            .position(|card| *card == self.active_card)
            .unwrap_or(0);
        self.active_card = StatCard::ALL[(index + StatCard::ALL.len() - 1) % StatCard::ALL.len()];
    }

    /// Render the stat cards as a row of bordered boxes.
    pub fn render_cards(&self, f: &mut Frame, area: Rect, stats: &Stats) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let slots = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 5); 5])
            .split(area);

        for (card, slot) in StatCard::ALL.iter().zip(slots.iter()) {
            let active = *card == self.active_card;
            let border = if active {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let value_style = Style::default()
                .fg(card.accent())
                .add_modifier(Modifier::BOLD);
            let paragraph = Paragraph::new(vec![
                Line::styled(card.value(stats), value_style),
                Line::styled(card.title(), Style::default().fg(Color::Gray)),
            ])
            .block(Block::default().borders(Borders::ALL).border_style(border));
            f.render_widget(paragraph, *slot);
        }
    }
}

impl Module for Dashboard {
    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut Context) -> Action {
        match key.code {
            KeyCode::Tab => {
                self.next_card();
                Action::None
            }
            KeyCode::BackTab => {
                self.prev_card();
                Action::None
            }
            KeyCode::Enter => match self.active_card {
                StatCard::PendingAlerts => Action::Navigate(NavigateTarget::Alerts),
                _ => Action::Navigate(NavigateTarget::History),
            },
            _ => Action::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_cycle_wraps() {
        let mut dash = Dashboard::new();
        for _ in 0..StatCard::ALL.len() {
            dash.next_card();
        }
        assert_eq!(dash.active_card, StatCard::Total);
        dash.prev_card();
        assert_eq!(dash.active_card, StatCard::PendingAlerts);
    }

    #[test]
    fn test_card_values() {
        let stats = Stats {
            total: 22,
            safe: 15,
            unsafe_count: 7,
            pending_alerts: 3,
            pass_rate: 68.2,
        };
        assert_eq!(StatCard::Total.value(&stats), "22");
        assert_eq!(StatCard::PassRate.value(&stats), "68.2%");
        assert_eq!(StatCard::PendingAlerts.value(&stats), "3");
    }
}
