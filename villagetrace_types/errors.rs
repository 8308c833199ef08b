use thiserror::Error;

pub mod app_error;
pub mod game_error;

pub use app_error::AppError;
pub use game_error::GameError;

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    App(#[from] AppError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
