use thiserror::Error;

/// Exit code for fatal configuration and usage errors. Normal runs exit with
/// the backend compiler's own exit code instead.
pub const FATAL_EXIT_CODE: i32 = 2;

/// Errors that abort a driver invocation.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Toolchain installation or environment configuration is unusable.
    #[error("{0}")]
    Config(String),

    /// The command line itself is invalid.
    #[error("{0}")]
    Usage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
