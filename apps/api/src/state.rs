use crate::config::Config;
use crate::puzzle::PuzzleBuilder;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Stateless builder carrying the injected clock, id source and limits.
    pub builder: PuzzleBuilder,
}
