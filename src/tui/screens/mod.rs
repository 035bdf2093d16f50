//! TUI screen implementations.

pub mod home;
pub mod new_event;

pub use home::{HomeState, draw_home};
pub use new_event::{NewEventState, draw_new_event};
