//! Error types for NSIGII

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("noise source unavailable: {0}")]
    NoiseUnavailable(String),

    #[error("noise source exhausted: requested {requested} bytes, {available} available")]
    NoiseExhausted { requested: usize, available: usize },

    #[error("invalid symbol: {0}")]
    InvalidSymbol(String),

    #[error("invalid register code: {0:#04b}")]
    InvalidRegister(u8),

    #[error("register 0b11 is channel clear, not a symbol")]
    ChannelClear,

    #[error("expected {expected} cost contributions, got {actual}")]
    CostLengthMismatch { expected: usize, actual: usize },

    #[error("work is zero or not finite; bit rate is undefined")]
    ZeroWork,

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn noise_unavailable(reason: impl Into<String>) -> Self {
        Self::NoiseUnavailable(reason.into())
    }

    pub fn invalid_symbol(token: impl Into<String>) -> Self {
        Self::InvalidSymbol(token.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
