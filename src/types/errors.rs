use std::fmt;

/// Message shown for transport failures, where the server never answered.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error, please try again later";

// === StorageError ===

/// Errors related to the durable key-value store.
#[derive(Debug)]
pub enum StorageError {
    /// Database operation failed.
    DatabaseError(String),
    /// A store mutex was poisoned by a panicking writer.
    Poisoned,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::DatabaseError(msg) => write!(f, "Storage database error: {}", msg),
            StorageError::Poisoned => write!(f, "Storage lock poisoned"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::DatabaseError(e.to_string())
    }
}

// === SessionError ===

/// Errors related to session persistence.
#[derive(Debug)]
pub enum SessionError {
    /// Failed to serialize or deserialize the stored user.
    SerializationError(String),
    /// The durable store rejected a read or write.
    StorageError(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::SerializationError(msg) => {
                write!(f, "Session serialization error: {}", msg)
            }
            SessionError::StorageError(msg) => write!(f, "Session storage error: {}", msg),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<StorageError> for SessionError {
    fn from(e: StorageError) -> Self {
        SessionError::StorageError(e.to_string())
    }
}

// === SettingsError ===

/// Errors related to client settings.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === ApiError ===

/// Classified outcome of a failed call to the bookmark API.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// HTTP 401 on a call that carried a bearer token. The body is not read.
    Unauthenticated,
    /// Any other non-2xx status, with the body's `error` field when present.
    Application { status: u16, message: Option<String> },
    /// The request could not be sent or the response could not be read.
    Transport(String),
    /// A 2xx response whose body was not the expected JSON.
    Decode(String),
}

impl ApiError {
    /// Text to show the user for this failure.
    ///
    /// Server-supplied messages win; transport failures get the generic network
    /// message; everything else falls back to the caller's `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Application {
                message: Some(msg), ..
            } if !msg.is_empty() => msg.clone(),
            ApiError::Transport(_) => NETWORK_ERROR_MESSAGE.to_string(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, ApiError::Unauthenticated)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthenticated => write!(f, "Not authenticated"),
            ApiError::Application {
                status,
                message: Some(msg),
            } => write!(f, "API error {}: {}", status, msg),
            ApiError::Application {
                status,
                message: None,
            } => write!(f, "API error {}", status),
            ApiError::Transport(msg) => write!(f, "Transport error: {}", msg),
            ApiError::Decode(msg) => write!(f, "Response decode error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

// === ValidationError ===

/// Local form validation failures. These block the request entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Login submitted without a username or password.
    MissingCredentials,
    /// Password and its confirmation differ.
    PasswordMismatch,
    /// Password is shorter than the minimum length.
    PasswordTooShort(usize),
    /// Register submitted without a verification code.
    MissingVerificationCode,
    /// Delete-account checkbox left unticked.
    DeletionNotConfirmed,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingCredentials => {
                write!(f, "Please enter username and password")
            }
            ValidationError::PasswordMismatch => write!(f, "Passwords do not match"),
            ValidationError::PasswordTooShort(min) => {
                write!(f, "Password must be at least {} characters", min)
            }
            ValidationError::MissingVerificationCode => {
                write!(f, "Please enter the verification code")
            }
            ValidationError::DeletionNotConfirmed => {
                write!(f, "Please confirm that you want to delete your account")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

// === ReorderError ===

/// Errors related to drag reordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderError {
    /// No drag binding is attached (narrow viewport or nothing rendered).
    Detached,
    /// A previous reorder is still being synchronised.
    SyncInFlight,
    /// The dropped order was empty.
    EmptyOrder,
}

impl fmt::Display for ReorderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReorderError::Detached => write!(f, "Drag reordering is not enabled"),
            ReorderError::SyncInFlight => write!(f, "A reorder is already being saved"),
            ReorderError::EmptyOrder => write!(f, "Reorder contained no bookmarks"),
        }
    }
}

impl std::error::Error for ReorderError {}

// === AppError ===

/// Failures a user flow cannot turn into a visible message.
///
/// API failures are never returned here; the app shows them or logs out.
#[derive(Debug)]
pub enum AppError {
    /// The session could not be read or written.
    Session(SessionError),
    /// View preferences could not be read or written.
    Storage(StorageError),
    /// A bookmark flow was invoked without a session.
    NotLoggedIn,
    /// No bookmark with this id is in the current list.
    UnknownBookmark(i64),
    /// The drag gesture was rejected.
    Reorder(ReorderError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Session(e) => write!(f, "{}", e),
            AppError::Storage(e) => write!(f, "{}", e),
            AppError::NotLoggedIn => write!(f, "Not logged in"),
            AppError::UnknownBookmark(id) => write!(f, "Unknown bookmark: {}", id),
            AppError::Reorder(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::Session(e)
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        AppError::Storage(e)
    }
}

impl From<ReorderError> for AppError {
    fn from(e: ReorderError) -> Self {
        AppError::Reorder(e)
    }
}
