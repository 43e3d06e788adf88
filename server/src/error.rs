use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetuiError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Constraint error: {0}")]
    Constraint(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for NetuiError {
    fn from(err: rusqlite::Error) -> Self {
        NetuiError::Store(err.to_string())
    }
}
