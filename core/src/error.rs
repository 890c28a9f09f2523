use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("coordinates out of bounds")]
    InvalidCoords,
    #[error("board size must be positive and leave at least one safe cell")]
    InvalidConfig,
}

pub type Result<T> = core::result::Result<T, GameError>;
