//! helpdesk-core — Pure domain logic, no UI.
//!
//! This crate contains the scripted reply engine, the conversation state
//! and the delayed-reply machinery for the support chat widget. It is
//! completely UI-agnostic; frontends drive a `ChatWidget` and may subscribe
//! to its events via tokio::broadcast.

pub mod config;
pub mod error;
pub mod events;
pub mod resolver;
pub mod rules;
pub mod scheduler;
pub mod session;
pub mod skins;
pub mod tracking;
pub mod types;
pub mod widget;
