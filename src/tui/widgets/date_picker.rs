//! Calendar popup for picking a date.

use chrono::{Datelike, Days, Months, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Result of feeding one key to an open date picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePickerEvent {
    /// The cursor moved to a new date; the picker stays open.
    Moved(NaiveDate),
    /// The user confirmed the cursor date.
    Picked(NaiveDate),
    /// The user closed the picker without choosing.
    Dismissed,
    /// The key had no effect.
    Ignored,
}

/// Maps a key press to a picker event for a cursor at `cursor`.
///
/// Left/Right move a day, Up/Down a week, PageUp/PageDown a month.
pub fn handle_date_key(cursor: NaiveDate, key: KeyEvent) -> DatePickerEvent {
    let moved = match key.code {
        KeyCode::Enter => return DatePickerEvent::Picked(cursor),
        KeyCode::Esc => return DatePickerEvent::Dismissed,
        KeyCode::Left => cursor.checked_sub_days(Days::new(1)),
        KeyCode::Right => cursor.checked_add_days(Days::new(1)),
        KeyCode::Up => cursor.checked_sub_days(Days::new(7)),
        KeyCode::Down => cursor.checked_add_days(Days::new(7)),
        KeyCode::PageUp => cursor.checked_sub_months(Months::new(1)),
        KeyCode::PageDown => cursor.checked_add_months(Months::new(1)),
        _ => None,
    };
    moved.map_or(DatePickerEvent::Ignored, DatePickerEvent::Moved)
}

fn days_in_month(date: NaiveDate) -> u32 {
    let first = date.with_day(1).unwrap_or(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map_or(31, |last| last.day())
}

/// Calendar lines for the month containing `cursor`, weeks starting Monday.
pub fn calendar_lines(cursor: NaiveDate) -> Vec<Line<'static>> {
    let highlight = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(cursor.format("%B %Y").to_string()),
        Line::from(Span::styled(
            "Mo Tu We Th Fr Sa Su",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let offset = cursor
        .with_day(1)
        .map_or(0, |first| first.weekday().num_days_from_monday());
    let mut week: Vec<Span<'static>> = (0..offset).map(|_| Span::raw("   ")).collect();
    let mut column = offset;

    for day in 1..=days_in_month(cursor) {
        let text = format!("{day:>2}");
        if day == cursor.day() {
            week.push(Span::styled(text, highlight));
        } else {
            week.push(Span::raw(text));
        }
        week.push(Span::raw(" "));
        column += 1;
        if column == 7 {
            lines.push(Line::from(std::mem::take(&mut week)));
            column = 0;
        }
    }
    if !week.is_empty() {
        lines.push(Line::from(week));
    }
    lines
}

/// Renders the picker as a popup centered in `area`.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_date_picker(cursor: NaiveDate, frame: &mut Frame, area: Rect) {
    let [popup] = Layout::horizontal([Constraint::Length(24)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::vertical([Constraint::Length(11)])
        .flex(Flex::Center)
        .areas(popup);

    let block = Block::default()
        .title(" Pick Date ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(calendar_lines(cursor)).block(block), popup);
}
