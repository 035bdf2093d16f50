use std::path::PathBuf;
use std::sync::Arc;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};
use tokio::runtime::Runtime;
use tracing::debug;

use crate::config::Config;
use crate::services::{FilePathPicker, HttpEventService, HttpObjectStorage, TokenFileIdentity};
use crate::workflow::{Alert, RecordingHost, Rejection, SubmitOutcome, Submission, pick_banner};

use super::action::{Action, ScreenState};
use super::error::AppError;
use super::screens::{HomeState, NewEventState, draw_home, draw_new_event};
use super::widgets::{StatusBarContext, draw_status_bar};

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Summary of the session; the screen new-event returns to.
    Home,
    /// Create a new event.
    NewEvent,
}

/// Workflow queued by a key press, run after the next draw.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Pending {
    Submit,
    PickBanner(String),
}

impl Pending {
    fn label(&self) -> &'static str {
        match self {
            Self::Submit => "Submitting event",
            Self::PickBanner(_) => "Opening banner",
        }
    }
}

/// Top-level application state.
pub struct App {
    screen: Screen,
    home: HomeState,
    new_event: NewEventState,
    submission: Submission,
    media_root: Option<PathBuf>,
    runtime: Runtime,
    alert: Option<Alert>,
    pending: Option<Pending>,
    should_quit: bool,
}

impl App {
    /// Creates a new `App` starting on the [`Screen::Home`] screen.
    pub fn new(submission: Submission, media_root: Option<PathBuf>) -> Result<Self, AppError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            screen: Screen::Home,
            home: HomeState::new(),
            new_event: NewEventState::new(today()),
            submission,
            media_root,
            runtime,
            alert: None,
            pending: None,
            should_quit: false,
        })
    }

    /// Wires the HTTP and file-backed collaborators described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("eventdesk/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let submission = Submission::new(
            Arc::new(TokenFileIdentity::new(&config.token_path)),
            Arc::new(HttpObjectStorage::new(client.clone(), &config.storage_url)),
            Arc::new(HttpEventService::new(client, &config.api_url)),
        )
        .stay_on_failure(config.stay_on_failure);
        Self::new(submission, config.media_root.clone())
    }

    /// Main event loop: draw → run queued workflow or read event → check quit.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if self.pending.is_some() {
                self.run_pending();
                continue;
            }
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let [main_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        match self.screen {
            Screen::Home => draw_home(&self.home, frame, main_area),
            Screen::NewEvent => draw_new_event(&self.new_event, frame, main_area),
        }

        let ctx = StatusBarContext {
            alert: self.alert.clone(),
            busy: self.pending.as_ref().map(|p| p.label().to_string()),
        };
        draw_status_bar(&ctx, frame, status_area);
    }

    /// Dispatches a key press to the current screen and applies its action.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press || self.pending.is_some() {
            return;
        }
        let action = match self.screen {
            Screen::Home => self.home.handle_key(key),
            Screen::NewEvent => self.new_event.handle_key(key),
        };
        self.apply(action);
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => self.navigate(screen),
            Action::SubmitEvent => self.pending = Some(Pending::Submit),
            Action::PickBanner(path) => self.pending = Some(Pending::PickBanner(path)),
            Action::Quit => self.should_quit = true,
        }
    }

    fn navigate(&mut self, screen: Screen) {
        debug!(from = ?self.screen, to = ?screen, "navigate");
        if screen == Screen::NewEvent {
            // The draft does not outlive the screen.
            self.new_event = NewEventState::new(today());
            self.alert = None;
        }
        self.screen = screen;
    }

    /// Runs the queued workflow, if any, to completion.
    pub fn run_pending(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        let mut host = RecordingHost::default();
        match pending {
            Pending::Submit => {
                let outcome = self
                    .runtime
                    .block_on(self.submission.submit(self.new_event.form_mut(), &mut host));
                match outcome {
                    SubmitOutcome::Created(event) => self.home.record(event),
                    SubmitOutcome::Rejected(Rejection::Invalid(e)) => {
                        self.new_event.set_field_error(e.field(), e.to_string());
                    }
                    SubmitOutcome::Rejected(Rejection::Unauthenticated) | SubmitOutcome::Failed => {}
                }
            }
            Pending::PickBanner(path) => {
                let picker = FilePathPicker::new(path, self.media_root.clone());
                self.runtime
                    .block_on(pick_banner(self.new_event.form_mut(), &picker, &mut host));
                self.new_event.close_banner_prompt();
            }
        }
        self.apply_host(host);
    }

    fn apply_host(&mut self, host: RecordingHost) {
        if let Some(alert) = host.alerts.into_iter().last() {
            self.alert = Some(alert);
        }
        for _ in 0..host.navigated_back {
            self.navigate(Screen::Home);
        }
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the most recent alert.
    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Returns the home screen state.
    pub fn home(&self) -> &HomeState {
        &self.home
    }

    /// Returns the new event screen state.
    pub fn new_event(&self) -> &NewEventState {
        &self.new_event
    }
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
