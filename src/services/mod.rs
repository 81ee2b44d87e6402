// Harbor services
// Services provide stateless or outward-facing logic: URL normalization,
// translation wrapping, settings, suggestions, offline snapshots and clocks.

pub mod clock;
pub mod offline_snapshot;
pub mod settings_engine;
pub mod suggestions;
pub mod translation;
pub mod url_normalizer;
