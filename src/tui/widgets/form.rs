//! Form rendering and focus management for input screens.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// One rendered row of a form.
///
/// Rows are built fresh from screen state on every draw; the values
/// themselves live in the screen's controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRow {
    /// Display label shown in the row's border.
    pub label: String,
    /// Text currently shown as the value.
    pub value: String,
    /// Whether the label gets a required marker.
    pub required: bool,
    /// Validation error message, if any.
    pub error: Option<String>,
    /// Whether typing edits this row directly (shows a cursor when focused).
    pub editable: bool,
}

impl FormRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            required: false,
            error: None,
            editable: true,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }
}

/// Cyclic focus over a fixed number of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRing {
    len: usize,
    focus: usize,
}

impl FocusRing {
    /// Creates a ring over `len` rows with focus on the first.
    pub fn new(len: usize) -> Self {
        Self { len, focus: 0 }
    }

    /// Returns the index of the focused row.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Moves focus to the next row, wrapping around.
    pub fn next(&mut self) {
        if self.len == 0 {
            return;
        }
        self.focus = (self.focus + 1) % self.len;
    }

    /// Moves focus to the previous row, wrapping around.
    pub fn prev(&mut self) {
        if self.len == 0 {
            return;
        }
        self.focus = (self.focus + self.len - 1) % self.len;
    }

    /// Focuses `index`; out-of-range indices are ignored.
    pub fn set(&mut self, index: usize) {
        if index < self.len {
            self.focus = index;
        }
    }
}

/// Renders `rows` within the given area, highlighting `focus`.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form(rows: &[FormRow], focus: usize, frame: &mut Frame, area: Rect) {
    let row_height = 3_u16;
    let constraints: Vec<Constraint> = rows
        .iter()
        .map(|_| Constraint::Length(row_height))
        .collect();

    let areas = Layout::vertical(constraints).split(area);

    for (i, row) in rows.iter().enumerate() {
        let is_focused = i == focus;

        let border_color = if row.error.is_some() {
            Color::Red
        } else if is_focused {
            Color::Yellow
        } else {
            Color::DarkGray
        };

        let label = if row.required {
            format!("{} *", row.label)
        } else {
            row.label.clone()
        };

        let block = Block::default()
            .title(label)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let mut spans = vec![Span::raw(&row.value)];
        if is_focused && row.editable {
            spans.push(Span::styled(
                "\u{2588}",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(block);
        frame.render_widget(paragraph, areas[i]);

        // Error overlaps the bottom border of its row
        if let Some(ref err) = row.error {
            let error_line = Paragraph::new(Span::styled(err, Style::default().fg(Color::Red)));
            let err_area = Rect {
                x: areas[i].x + 2,
                y: areas[i].y + row_height.saturating_sub(1),
                width: areas[i].width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(error_line, err_area);
        }
    }
}
