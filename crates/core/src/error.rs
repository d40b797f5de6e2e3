use thiserror::Error;

pub type AbnResult<T> = Result<T, AbnError>;

#[derive(Error, Debug)]
pub enum AbnError {
    #[error("Unknown variant: {0}")]
    UnknownVariant(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Division undefined: {0}")]
    DivisionUndefined(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AbnError {
    pub fn unknown_index(index: usize, len: usize) -> Self {
        Self::UnknownVariant(format!("index {index} out of range for {len} variants"))
    }
}
