use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Problems with the runtime configuration, raised before any file is read.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {var} is not set")]
    MissingApiKey { var: &'static str },

    #[error("invalid API key: {0}")]
    InvalidApiKey(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to open '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no game found in '{}'", .path.display())]
    NoGame { path: PathBuf },

    #[error("illegal move '{san}' at ply {ply}: {reason}")]
    IllegalMove {
        ply: usize,
        san: String,
        reason: String,
    },

    #[error("invalid FEN tag '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },
}

/// Failures of the chat-completion call. None of them are retried.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("service returned an empty completion")]
    EmptyCompletion,
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to create directory '{}': {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("input error: {0}")]
    Input(#[from] InputError),

    #[error("commentary service error: {0}")]
    Service(#[from] ServiceError),

    #[error("output error: {0}")]
    Output(#[from] OutputError),
}

impl AppError {
    /// Process exit status, following the BSD `sysexits` codes.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 78,
            Self::Input(_) => 66,
            Self::Service(_) => 69,
            Self::Output(_) => 73,
        }
    }
}
