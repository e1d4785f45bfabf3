pub mod backend;
pub mod cli;
pub mod color;
mod config;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod notification;
pub mod presets;
pub mod storage;
pub mod store;
pub mod sync;
pub mod theme;
pub mod ui;
pub use error::{AppError, AppResult};

/// Entrypoint used by the `mirage` binary.
pub fn run() -> anyhow::Result<()> {
    logging::init();
    tracing::debug!("starting mirage");
    cli::run()
}
