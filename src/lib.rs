// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod answer;
pub mod config;
pub mod game;
pub mod hints;
pub mod history;
pub mod puzzle;
pub mod runtime;
pub mod util;
