use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("Cancelled")]
    Cancelled,
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PageError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PageError::Cancelled)
    }
}

pub type Result<T, E = PageError> = std::result::Result<T, E>;
