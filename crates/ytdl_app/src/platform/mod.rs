mod app;
mod effects;
mod logging;
mod settings;
mod ui;

pub use app::{run_app, LaunchOptions};
pub use logging::LogDestination;
pub use settings::{Backend, Overrides};
