use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ShabbatError {
    /// Coordinates out of range, unknown timezone, or a date on which the
    /// sun does not set at that location.
    InvalidLocation(String),
    /// The solar position computation itself failed.
    Astronomy(String),
    /// A caller-supplied timestamp could not be parsed.
    InvalidInstant(String),
}

impl fmt::Display for ShabbatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShabbatError::InvalidLocation(msg) => write!(f, "invalid location: {msg}"),
            ShabbatError::Astronomy(msg) => write!(f, "astronomy error: {msg}"),
            ShabbatError::InvalidInstant(msg) => write!(f, "invalid instant: {msg}"),
        }
    }
}

impl std::error::Error for ShabbatError {}

pub type Result<T> = std::result::Result<T, ShabbatError>;
