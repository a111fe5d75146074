//! Terminal UI using ratatui.

mod app;
mod input;
pub mod render;
mod worker;

pub use app::{App, Focus, Mode, RequestState, ResultsState, UiState};
pub use input::handle_input;
pub use render::render;
