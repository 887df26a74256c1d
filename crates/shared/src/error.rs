use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Ledger error: {0}")]
    Ledger(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
