//! Error types shared by block devices and the file store.

/// Failure of a single sector transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoError {
    /// Drive never dropped BSY / raised DRDY before a command could be issued
    NotReady,
    /// Drive raised ERR while a transfer was pending
    DataFault,
    /// A wait after the command was issued ran out of iterations
    Timeout,
    /// LBA beyond the end of the device
    OutOfRange,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            IoError::NotReady => write!(f, "Drive not ready"),
            IoError::DataFault => write!(f, "Drive reported an error"),
            IoError::Timeout => write!(f, "Drive timed out"),
            IoError::OutOfRange => write!(f, "Sector out of range"),
        }
    }
}

/// Errors surfaced by file store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    Io(IoError),
    NotFound,
    TableFull,
    SizeExceeded,
    InvalidName,
}

impl From<IoError> for FsError {
    fn from(err: IoError) -> Self {
        FsError::Io(err)
    }
}

impl core::fmt::Display for FsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FsError::Io(err) => write!(f, "Disk I/O failed: {}", err),
            FsError::NotFound => write!(f, "File not found"),
            FsError::TableFull => write!(f, "File table full"),
            FsError::SizeExceeded => write!(f, "File too large (max 1024 bytes)"),
            FsError::InvalidName => write!(f, "Invalid file name (1-15 bytes, no NUL)"),
        }
    }
}
