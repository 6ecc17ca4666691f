use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to resolve cluster configuration: {0}")]
    ConfigResolution(String),

    #[error("failed to load cluster configuration from {}: {source}", .path.display())]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("failed to construct cluster client: {0}")]
    ClientConstruction(#[source] BoxError),

    #[error("failed to list pods in namespace \"{namespace}\": {source}")]
    PodList {
        namespace: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to stream logs for pod {namespace}/{pod}: {source}")]
    LogStream {
        namespace: String,
        pod: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to write logs for pod {pod} to {}: {source}", .path.display())]
    LogWrite {
        pod: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification of an [`AppError`], used as a structured log field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConfigResolution,
    ClientConstruction,
    PodList,
    LogStream,
    LogWrite,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::ConfigResolution(_) | AppError::ConfigLoad { .. } => {
                ErrorKind::ConfigResolution
            }
            AppError::ClientConstruction(_) => ErrorKind::ClientConstruction,
            AppError::PodList { .. } => ErrorKind::PodList,
            AppError::LogStream { .. } => ErrorKind::LogStream,
            AppError::LogWrite { .. } => ErrorKind::LogWrite,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::ConfigResolution => "config-resolution",
            ErrorKind::ClientConstruction => "client-construction",
            ErrorKind::PodList => "pod-list",
            ErrorKind::LogStream => "log-stream",
            ErrorKind::LogWrite => "log-write",
        };
        f.write_str(s)
    }
}
