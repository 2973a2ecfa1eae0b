// Reading screen: state, input handling and the UI loop

pub mod input;
mod run;
pub mod state;

pub use input::{parse_key, AppAction, KeyMap};
pub use run::run_app;
pub use state::{AppState, StatusLine};
