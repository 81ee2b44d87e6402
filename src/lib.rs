//! Harbor: the navigation core of a mobile browser shell.
//!
//! Tabs with synthetic per-tab history, a content frame adapter for an
//! embedded renderer whose own history is opaque, address-bar normalization,
//! translation wrapping, settings, and the bookmark/history/notes/download
//! libraries. This library crate exposes all modules for the demo binary and
//! integration tests.

pub mod app;
pub mod database;
pub mod frame;
pub mod managers;
pub mod services;
pub mod types;
