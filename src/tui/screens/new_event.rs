//! New event screen: form for entering an event and submitting it.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::form::FormState;
use crate::model::{DateField, FieldKey, TextField};
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;
use crate::tui::widgets::{
    DatePickerEvent, FocusRing, FormRow, draw_date_picker, draw_form, handle_date_key,
};

/// Row index for the event name.
const NAME: usize = 0;
/// Row index for the event location.
const LOCATION: usize = 1;
/// Row index for the event date.
const DATE: usize = 2;
/// Row index for the maximum number of attendees.
const CAPACITY: usize = 3;
/// Row index for the banner image.
const BANNER: usize = 4;

const ROW_COUNT: usize = 5;

fn text_field(row: usize) -> Option<TextField> {
    match row {
        NAME => Some(TextField::Name),
        LOCATION => Some(TextField::Location),
        CAPACITY => Some(TextField::Capacity),
        _ => None,
    }
}

/// State for the new event screen.
#[derive(Debug, Clone)]
pub struct NewEventState {
    form: FormState,
    focus: FocusRing,
    /// Date under the picker cursor while the picker is open.
    date_cursor: NaiveDate,
    /// Path typed so far while the banner prompt is open.
    banner_prompt: Option<String>,
    field_error: Option<(FieldKey, String)>,
}

impl NewEventState {
    /// Creates an empty form dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            form: FormState::new(today),
            focus: FocusRing::new(ROW_COUNT),
            date_cursor: today,
            banner_prompt: None,
            field_error: None,
        }
    }

    /// Returns the form state controller.
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Mutable access for workflows that update the form.
    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    /// Returns the focused row index.
    pub fn focus(&self) -> usize {
        self.focus.focus()
    }

    /// Returns the date under the picker cursor.
    pub fn date_cursor(&self) -> NaiveDate {
        self.date_cursor
    }

    /// Returns the banner path typed so far, if the prompt is open.
    pub fn banner_prompt(&self) -> Option<&str> {
        self.banner_prompt.as_deref()
    }

    /// Closes the banner prompt after the picker has run.
    pub fn close_banner_prompt(&mut self) {
        self.banner_prompt = None;
    }

    /// Marks one field as invalid and moves focus to it.
    pub fn set_field_error(&mut self, field: FieldKey, message: String) {
        let row = match field {
            FieldKey::Name => NAME,
            FieldKey::Location => LOCATION,
            FieldKey::Date => DATE,
            FieldKey::Capacity => CAPACITY,
        };
        self.focus.set(row);
        self.field_error = Some((field, message));
    }

    /// Returns the error shown on `field`, if any.
    pub fn field_error(&self, field: FieldKey) -> Option<&str> {
        self.field_error
            .as_ref()
            .filter(|(key, _)| *key == field)
            .map(|(_, msg)| msg.as_str())
    }

    fn handle_date_picker_key(&mut self, key: KeyEvent) -> Action {
        match handle_date_key(self.date_cursor, key) {
            DatePickerEvent::Moved(date) => self.date_cursor = date,
            DatePickerEvent::Picked(date) => {
                self.form.set_date_field(DateField::Date, Some(date));
                self.form.toggle_date_picker(FieldKey::Date, false);
            }
            DatePickerEvent::Dismissed => {
                self.form.set_date_field(DateField::Date, None);
                self.form.toggle_date_picker(FieldKey::Date, false);
            }
            DatePickerEvent::Ignored => {}
        }
        Action::None
    }

    fn handle_banner_prompt_key(&mut self, key: KeyEvent) -> Action {
        let Some(buffer) = self.banner_prompt.as_mut() else {
            return Action::None;
        };
        match key.code {
            KeyCode::Char(ch) => buffer.push(ch),
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Enter => return Action::PickBanner(buffer.trim().to_string()),
            KeyCode::Esc => return Action::PickBanner(String::new()),
            _ => {}
        }
        Action::None
    }

    fn open_date_picker(&mut self) {
        self.date_cursor = self.form.draft().date;
        self.form.toggle_date_picker(FieldKey::Date, true);
    }

    fn open_banner_prompt(&mut self) {
        self.banner_prompt = Some(String::new());
    }

    fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) {
        let Some(field) = text_field(self.focus.focus()) else {
            return;
        };
        let mut value = self.form.draft().text(field).to_string();
        edit(&mut value);
        self.form.set_field(field, value);
    }

    fn submit(&mut self) -> Action {
        self.field_error = None;
        Action::SubmitEvent
    }

    fn rows(&self) -> Vec<FormRow> {
        let draft = self.form.draft();
        let error = |key| self.field_error(key).map(str::to_string);
        let banner = self
            .form
            .banner()
            .map(|image| image.display_name())
            .or_else(|| (!draft.banner_url.is_empty()).then(|| "uploaded".to_string()))
            .unwrap_or_else(|| "none (Ctrl+B to choose)".to_string());
        vec![
            FormRow::new("Event Name", draft.name.as_str())
                .required()
                .with_error(error(FieldKey::Name)),
            FormRow::new("Location", draft.location.as_str())
                .required()
                .with_error(error(FieldKey::Location)),
            FormRow::new("Date (Enter to pick)", draft.date.format("%d/%m/%Y").to_string())
                .required()
                .read_only()
                .with_error(error(FieldKey::Date)),
            FormRow::new("Maximum Attendees", draft.capacity.as_str())
                .required()
                .with_error(error(FieldKey::Capacity)),
            FormRow::new("Banner", banner).read_only(),
        ]
    }
}

impl ScreenState for NewEventState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.form.is_submitting() {
            return Action::None;
        }
        if self.form.is_date_picker_open(FieldKey::Date) {
            return self.handle_date_picker_key(key);
        }
        if self.banner_prompt.is_some() {
            return self.handle_banner_prompt_key(key);
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('s') => self.submit(),
                KeyCode::Char('b') => {
                    self.open_banner_prompt();
                    Action::None
                }
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Tab => {
                self.focus.next();
                Action::None
            }
            KeyCode::BackTab => {
                self.focus.prev();
                Action::None
            }
            KeyCode::Char(ch) => {
                let focus = self.focus.focus();
                if focus == CAPACITY && !ch.is_ascii_digit() {
                    return Action::None;
                }
                self.edit_focused(|value| value.push(ch));
                Action::None
            }
            KeyCode::Backspace => {
                self.edit_focused(|value| {
                    value.pop();
                });
                Action::None
            }
            KeyCode::Enter => match self.focus.focus() {
                DATE => {
                    self.open_date_picker();
                    Action::None
                }
                BANNER => {
                    self.open_banner_prompt();
                    Action::None
                }
                _ => self.submit(),
            },
            KeyCode::Esc => Action::Navigate(Screen::Home),
            _ => Action::None,
        }
    }
}

/// Renders the new event screen.
#[mutants::skip]
pub fn draw_new_event(state: &NewEventState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Create New Event ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [form_area, _spacer, footer_area] = Layout::vertical([
        Constraint::Length(3 * ROW_COUNT as u16),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    draw_form(&state.rows(), state.focus(), frame, form_area);

    let footer = if state.form.is_submitting() {
        "Submitting..."
    } else {
        "Tab: next  Enter: pick/submit  Ctrl+B: banner  Ctrl+S: submit  Esc: back"
    };
    frame.render_widget(
        Paragraph::new(Line::from(footer)).style(Style::default().fg(Color::DarkGray)),
        footer_area,
    );

    if state.form.is_date_picker_open(FieldKey::Date) {
        draw_date_picker(state.date_cursor, frame, inner);
    }
    if let Some(path) = state.banner_prompt() {
        draw_banner_prompt(path, frame, inner);
    }
}

#[mutants::skip]
fn draw_banner_prompt(path: &str, frame: &mut Frame, area: Rect) {
    let [popup] = Layout::vertical([Constraint::Length(4)])
        .flex(Flex::Center)
        .areas(area);
    let block = Block::default()
        .title(" Banner image path (Enter: choose, Esc: cancel) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let input = Paragraph::new(Line::from(vec![
        Span::raw(path),
        Span::styled(
            "\u{2588}",
            Style::default().add_modifier(Modifier::SLOW_BLINK),
        ),
    ]))
    .block(block);
    frame.render_widget(Clear, popup);
    frame.render_widget(input, popup);
}
