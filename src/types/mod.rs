// Harbor shared type definitions
// Each submodule defines types used across the application.

pub mod bookmark;
pub mod download;
pub mod errors;
pub mod history;
pub mod note;
pub mod permission;
pub mod settings;
pub mod tab;
pub mod view;
