#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Terminal client for creating events on a hosted event backend.

pub mod config;
pub mod form;
pub mod logging;
pub mod model;
pub mod services;
pub mod tui;
pub mod workflow;
