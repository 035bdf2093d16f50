use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, Utc};
use tracing::{debug, error, info, warn};

use super::host::{Alert, Host};
use crate::form::FormState;
use crate::model::{IdToken, NewEvent, ValidationError};
use crate::services::{EventPersistence, IdentityProvider, ObjectStorage, ServiceError};

/// Steps of a submission, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Authenticating,
    UploadingBanner,
    Persisting,
    Succeeded,
    Failed,
}

/// Why a submission stopped before touching any backend state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("user not authenticated")]
    Unauthenticated,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// How a call to [`Submission::submit`] settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The event was persisted with this payload.
    Created(NewEvent),
    /// A precondition failed and nothing was uploaded or persisted.
    Rejected(Rejection),
    /// A collaborator failed; the cause has been logged.
    Failed,
}

#[derive(Debug, thiserror::Error)]
enum SubmitError {
    #[error("submission rejected: {0}")]
    Rejected(#[from] Rejection),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Object storage key for a banner uploaded at `now`.
///
/// Millisecond resolution keeps repeated uploads for the same draft apart.
pub fn banner_key(now: DateTime<Utc>) -> String {
    format!("banners/banner_{}", now.timestamp_millis())
}

/// Runs the new-event submission: authenticate, validate, upload the
/// banner if one was picked, persist, then reset the form.
pub struct Submission {
    identity: Arc<dyn IdentityProvider>,
    storage: Arc<dyn ObjectStorage>,
    events: Arc<dyn EventPersistence>,
    clock: fn() -> DateTime<Utc>,
    today: fn() -> NaiveDate,
    stay_on_failure: bool,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl Submission {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        storage: Arc<dyn ObjectStorage>,
        events: Arc<dyn EventPersistence>,
    ) -> Self {
        Self {
            identity,
            storage,
            events,
            clock: Utc::now,
            today: local_today,
            stay_on_failure: false,
        }
    }

    /// Replaces the clock used to derive banner keys.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the calendar used to date the fresh draft after a success.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// When set, rejected or failed submissions keep the user on the form
    /// instead of navigating back.
    pub fn stay_on_failure(mut self, stay: bool) -> Self {
        self.stay_on_failure = stay;
        self
    }

    /// Submits the current draft.
    ///
    /// Never returns an error: every failure is logged, alerted to the
    /// host, and reported through the outcome. The in-progress flag is
    /// cleared on every path before navigation is considered.
    pub async fn submit(&self, form: &mut FormState, host: &mut impl Host) -> SubmitOutcome {
        form.begin_submit();

        let outcome = match self.run(form).await {
            Ok(event) => {
                debug!(phase = ?Phase::Succeeded, "submit");
                info!(name = %event.name, date = %event.date, "event created");
                host.alert(Alert::success("Success", "Event created successfully!"));
                form.reset_draft_on((self.today)());
                SubmitOutcome::Created(event)
            }
            Err(SubmitError::Rejected(rejection)) => {
                debug!(phase = ?Phase::Failed, "submit");
                warn!(%rejection, "submit: rejected before any upload");
                let alert = match &rejection {
                    Rejection::Unauthenticated => Alert::error("Error", "User not authenticated."),
                    Rejection::Invalid(e) => Alert::error("Invalid event", e.to_string()),
                };
                host.alert(alert);
                SubmitOutcome::Rejected(rejection)
            }
            Err(SubmitError::Service(e)) => {
                debug!(phase = ?Phase::Failed, "submit");
                error!(error = %e, "failed to create event");
                host.alert(Alert::error("Error", "Failed to create event."));
                SubmitOutcome::Failed
            }
        };

        form.finish_submit();
        if self.leaves_form(&outcome) {
            host.navigate_back();
        }
        debug!(phase = ?Phase::Idle, "submit");
        outcome
    }

    fn leaves_form(&self, outcome: &SubmitOutcome) -> bool {
        matches!(outcome, SubmitOutcome::Created(_)) || !self.stay_on_failure
    }

    async fn run(&self, form: &mut FormState) -> Result<NewEvent, SubmitError> {
        let token = self.authenticate().await?;
        let event = form
            .draft()
            .validate(String::new())
            .map_err(Rejection::from)?;
        let banner_url = self.resolve_banner(form).await?;
        let event = NewEvent { banner_url, ..event };

        debug!(phase = ?Phase::Persisting, "submit");
        self.events.create_event(&event, &token).await?;
        Ok(event)
    }

    async fn authenticate(&self) -> Result<IdToken, SubmitError> {
        debug!(phase = ?Phase::Authenticating, "submit");
        let token = self.identity.id_token().await?;
        token.ok_or(SubmitError::Rejected(Rejection::Unauthenticated))
    }

    /// Uploads the picked banner and returns its durable URL, or falls back
    /// to the URL already on the draft when nothing was picked.
    async fn resolve_banner(&self, form: &mut FormState) -> Result<String, ServiceError> {
        let Some(image) = form.banner().cloned() else {
            return Ok(form.draft().banner_url.clone());
        };
        let key = banner_key((self.clock)());
        debug!(phase = ?Phase::UploadingBanner, %key, "submit");
        self.storage.put_file(&key, &image).await?;
        let url = self.storage.download_url(&key).await?;
        form.set_uploaded_banner_url(url.clone());
        Ok(url)
    }
}
