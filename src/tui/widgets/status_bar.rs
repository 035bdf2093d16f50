//! Status bar widget: one-line display of the latest alert or pending work.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::workflow::{Alert, AlertKind};

/// Data passed to the status bar widget.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// The most recent alert raised by a workflow.
    pub alert: Option<Alert>,
    /// Description of work in flight, shown instead of the alert.
    pub busy: Option<String>,
}

/// Renders a one-line status bar.
///
/// Display format (left-aligned):
/// - Busy:    `… Submitting event` (Yellow)
/// - Success: `Success: Event created successfully!` (title bold Green)
/// - Error:   `Error: Failed to create event.` (title bold Red)
///
/// Renders nothing when there is neither work in flight nor an alert.
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    let spans: Vec<Span> = if let Some(busy) = &ctx.busy {
        vec![Span::styled(
            format!("\u{2026} {busy}"),
            Style::default().fg(Color::Yellow),
        )]
    } else if let Some(alert) = &ctx.alert {
        let color = match alert.kind {
            AlertKind::Success => Color::Green,
            AlertKind::Error => Color::Red,
        };
        vec![
            Span::styled(
                format!("{}: ", alert.title),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(alert.message.clone(), Style::default().fg(color)),
        ]
    } else {
        return;
    };

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
