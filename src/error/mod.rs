use crate::backend::BackendError;
use crate::storage::StorageError;
use crate::sync::SyncError;
use crate::theme::ThemeError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Theme(#[from] ThemeError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Sync(#[from] SyncError),
    #[error("no preset named `{0}`")]
    UnknownPreset(String),
    #[error("preset name must not be empty")]
    EmptyPresetName,
    #[error("built-in preset `{0}` is read-only")]
    BuiltinPreset(String),
}
