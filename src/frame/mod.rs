//! Bridge between the tab store and the embedded content renderer.

pub mod adapter;
pub mod policy;

pub use adapter::{BackOutcome, ContentFrameAdapter, FrameHistory, BACK_DEBOUNCE_MS};
pub use policy::{FrameAttributes, FrameFeature, FramePolicy, FrameSource, SandboxToken};
