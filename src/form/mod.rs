//! Form state controller for the new-event screen.

mod state;

pub use state::FormState;
