use std::error::Error;
use std::fmt;

/// Error type for converter parse failures.
///
/// Stored text is trusted, so any of these on a read path means the data
/// is corrupt or the schema has drifted. They are never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// Calendar-date column did not parse as `YYYY-MM-DD`.
    InvalidDate(String),
    /// Wall-clock column did not parse as `HH:MM:SS`.
    InvalidTime(String),
    /// Timestamp column did not parse as RFC 3339.
    InvalidTimestamp(String),
    /// Zone-identifier column is not a name the zone registry recognizes.
    UnknownZone(String),
    /// Offset column is not a valid `±HH:MM[:SS]` literal.
    InvalidOffset(String),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::InvalidDate(raw) => write!(f, "invalid calendar date: {}", raw),
            ConvertError::InvalidTime(raw) => write!(f, "invalid wall-clock time: {}", raw),
            ConvertError::InvalidTimestamp(raw) => write!(f, "invalid timestamp: {}", raw),
            ConvertError::UnknownZone(raw) => write!(f, "unknown zone identifier: {}", raw),
            ConvertError::InvalidOffset(raw) => write!(f, "invalid zone offset: {}", raw),
        }
    }
}

impl Error for ConvertError {}

/// Error type for storage gateway operations.
///
/// Not-found is deliberately absent: a missing id is `Ok(None)`, not an error.
#[derive(Debug)]
pub enum RepositoryError {
    /// A stored column failed to convert back to its temporal type.
    Convert(ConvertError),
    /// The storage engine reported an error (constraint violation, I/O, ...).
    /// Propagated unmodified, never recovered or retried.
    Sqlite(rusqlite::Error),
    /// The connection lock was poisoned during the named operation.
    LockPoisoned(&'static str),
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::Convert(e) => write!(f, "stored value failed conversion: {}", e),
            RepositoryError::Sqlite(e) => write!(f, "storage engine error: {}", e),
            RepositoryError::LockPoisoned(operation) => {
                write!(f, "repository lock poisoned during {}", operation)
            }
        }
    }
}

impl Error for RepositoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RepositoryError::Convert(e) => Some(e),
            RepositoryError::Sqlite(e) => Some(e),
            RepositoryError::LockPoisoned(_) => None,
        }
    }
}

impl From<ConvertError> for RepositoryError {
    fn from(err: ConvertError) -> Self {
        RepositoryError::Convert(err)
    }
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        RepositoryError::Sqlite(err)
    }
}
