//! Home screen: the place the new-event screen returns to.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::model::NewEvent;
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;

/// State for the home screen: events created during this session.
#[derive(Debug, Clone, Default)]
pub struct HomeState {
    created: Vec<NewEvent>,
}

impl HomeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an event the backend accepted.
    pub fn record(&mut self, event: NewEvent) {
        self.created.push(event);
    }

    /// Events created this session, oldest first.
    pub fn created(&self) -> &[NewEvent] {
        &self.created
    }
}

impl ScreenState for HomeState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('n') => Action::Navigate(Screen::NewEvent),
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            _ => Action::None,
        }
    }
}

/// Renders the home screen.
#[mutants::skip]
pub fn draw_home(state: &HomeState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" eventdesk ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [summary_area, list_area, footer_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    let summary = match state.created.len() {
        0 => "No events created yet".to_string(),
        1 => "1 event created this session".to_string(),
        n => format!("{n} events created this session"),
    };
    frame.render_widget(Paragraph::new(Line::from(summary)), summary_area);

    let items: Vec<ListItem> = state
        .created
        .iter()
        .map(|e| {
            ListItem::new(format!(
                "{}  {}  {}  ({} seats)",
                e.date, e.name, e.location, e.capacity
            ))
        })
        .collect();
    frame.render_widget(List::new(items), list_area);

    let footer = Paragraph::new(Line::from("n: new event  q: quit"))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
