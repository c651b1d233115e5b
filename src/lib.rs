pub mod app;
pub mod config;
pub mod data;
pub mod models;
pub mod source;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing construction parameter; never retried.
    InvalidConfig,
    /// Network failure or non-success HTTP status, propagated verbatim.
    Transport,
    /// Response JSON missing expected fields or carrying unexpected shapes.
    Parse,
    /// Exchange returned fewer rows than requested.
    InsufficientData,
    /// The final row is a candle the exchange has not closed yet.
    IncompleteCandle,
    /// An accessor or write was called before any successful fetch.
    NoData,
    /// Local file-system failure while writing output.
    Io,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidConfig, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse, message)
    }

    pub fn insufficient_data(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InsufficientData, message)
    }

    pub fn incomplete_candle(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IncompleteCandle, message)
    }

    pub fn no_data(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoData, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
