//! Workflows triggered from the new-event screen: banner picking and submission.

#[cfg(test)]
pub(crate) mod fakes;
mod host;
mod pick;
mod submit;

pub use host::{Alert, AlertKind, Host, RecordingHost};
pub use pick::{PickOutcome, pick_banner};
pub use submit::{Phase, Rejection, SubmitOutcome, Submission, banner_key};
