use std::path::PathBuf;
use thiserror::Error;

/// Error surface of the client.
///
/// Every failure carries a stable machine-readable code (the server's
/// `messageKey` vocabulary where one exists) plus a human-readable
/// message; see [`BbbError::code`] and [`BbbError::message`]. There is no
/// internal recovery: operations either fully succeed or surface one of
/// these.
#[derive(Error, Debug)]
pub enum BbbError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-200 status; the body is not parsed.
    #[error("server returned HTTP status {0}")]
    Status(u16),

    #[error("parsingError: {0}")]
    Parse(String),

    /// The server reported a failure; `code` is its `messageKey`, passed
    /// through verbatim. The vocabulary is the server's, not ours.
    #[error("{code}: {message}")]
    Api { code: String, message: String },

    /// Upload precondition: the local file was not found.
    #[error("fileDoesNotExist: {}", .0.display())]
    FileDoesNotExist(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The operation is a documented stub and never reaches the network.
    #[error("notYetImplemented: {0}")]
    NotImplemented(&'static str),

    #[error("configuration error: {0}")]
    Config(#[from] crate::core::config::ConfigError),
}

impl BbbError {
    /// Stable code for programmatic matching. Server-side failures pass
    /// the `messageKey` through; local failures use fixed keys; transport
    /// statuses render as their digits.
    pub fn code(&self) -> String {
        match self {
            Self::Http(_) => "transportError".to_string(),
            Self::Status(status) => status.to_string(),
            Self::Parse(_) => "parsingError".to_string(),
            Self::Api { code, .. } => code.clone(),
            Self::FileDoesNotExist(_) => "fileDoesNotExist".to_string(),
            Self::Io(_) => "ioError".to_string(),
            Self::NotImplemented(_) => "notYetImplemented".to_string(),
            Self::Config(_) => "configurationError".to_string(),
        }
    }

    /// Human-readable companion to [`BbbError::code`]. Empty for bare
    /// status failures, matching the server's silence.
    pub fn message(&self) -> String {
        match self {
            Self::Http(e) => e.to_string(),
            Self::Status(_) => String::new(),
            Self::Parse(message) => message.clone(),
            Self::Api { message, .. } => message.clone(),
            Self::FileDoesNotExist(_) => "The upload file does not exist".to_string(),
            Self::Io(e) => e.to_string(),
            Self::NotImplemented(message) => (*message).to_string(),
            Self::Config(e) => e.to_string(),
        }
    }
}
