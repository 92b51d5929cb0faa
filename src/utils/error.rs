use std::fmt;
use thiserror::Error;

/// Failure of a single call against the music catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{operation} returned HTTP {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("Batch of {len} tracks exceeds the per-request limit of {limit}")]
    BatchTooLarge { len: usize, limit: usize },
}

/// Why a credential could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialProblem {
    Missing,
    Expired { expired_at_epoch_ms: i64 },
}

impl fmt::Display for CredentialProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialProblem::Missing => write!(f, "no access token stored"),
            CredentialProblem::Expired {
                expired_at_epoch_ms,
            } => write!(f, "access token expired at {} (epoch ms)", expired_at_epoch_ms),
        }
    }
}

/// Catalog call that aborted a playlist build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOperation {
    FetchProfile,
    CreatePlaylist,
    /// `appended` tracks already landed in the playlist before the failing batch.
    AppendTracks {
        playlist_url: String,
        appended: usize,
    },
}

impl fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteOperation::FetchProfile => write!(f, "fetching the user profile"),
            RemoteOperation::CreatePlaylist => write!(f, "creating the playlist"),
            RemoteOperation::AppendTracks {
                playlist_url,
                appended,
            } => write!(
                f,
                "adding tracks to {} ({} already added)",
                playlist_url, appended
            ),
        }
    }
}

/// The only failures a playlist build reports to its caller.
#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error("Credential error: {0}")]
    Credential(CredentialProblem),

    #[error("Remote error while {operation}: {source}")]
    Remote {
        operation: RemoteOperation,
        #[source]
        source: CatalogError,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error("Catalog request failed: {0}")]
    Catalog(#[from] CatalogError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Login failed: {message}")]
    Login { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    Remote,
    Configuration,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::Assembly(AssemblyError::Credential(_)) | AppError::Login { .. } => {
                ErrorCategory::Authentication
            }
            AppError::Assembly(AssemblyError::Remote { .. }) | AppError::Catalog(_) => {
                ErrorCategory::Remote
            }
            AppError::ConfigError { .. }
            | AppError::InvalidConfigValueError { .. }
            | AppError::MissingConfigError { .. } => ErrorCategory::Configuration,
            AppError::IoError(_) | AppError::SerializationError(_) => ErrorCategory::Io,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Authentication => ErrorSeverity::Medium,
            ErrorCategory::Remote => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::Assembly(AssemblyError::Credential(CredentialProblem::Missing)) => {
                "Not logged in to Spotify.".to_string()
            }
            AppError::Assembly(AssemblyError::Credential(CredentialProblem::Expired { .. })) => {
                "Token expired. Please login again.".to_string()
            }
            AppError::Assembly(AssemblyError::Remote {
                operation: RemoteOperation::AppendTracks {
                    playlist_url,
                    appended,
                },
                ..
            }) => format!(
                "Playlist created but only {} tracks could be added: {}",
                appended, playlist_url
            ),
            AppError::Assembly(AssemblyError::Remote { operation, .. }) => {
                format!("Failed to create playlist: Spotify refused {}", operation)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Authentication => "Run `tubelist login` to obtain a fresh access token",
            ErrorCategory::Remote => "Check your network connection and try again",
            ErrorCategory::Configuration => "Check the configuration file and command line flags",
            ErrorCategory::Io => "Check file paths and permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
