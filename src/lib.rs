//! Relay short desktop notifications between machines over HTTP, with an
//! optional sqlite audit trail of what was sent and received.

pub mod api;
pub mod app;
pub mod audit;
pub mod cli;
pub mod client;
pub mod common;
pub mod config;
pub mod logging;
pub mod models;
pub mod notifier;
pub mod schema;
