use std::io;

use thiserror::Error;

use crate::theme::ThemeError;

/// Errors that end the program before or after the game loop.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Theme(#[from] ThemeError),
    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
