//! Error types for the Wavefield engine
//!
//! This module defines the error type used throughout the engine
//! (graphics device, resources, uniforms) and the logging helpers
//! `engine_err!` / `engine_bail!`.

use std::fmt;

/// Result type for Wavefield engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wavefield engine errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Backend-specific error (WebGL, mock, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (buffer, shader, geometry parameters, etc.)
    InvalidResource(String),

    /// Initialization failed (device, renderer, subsystems)
    InitializationFailed(String),

    /// Uniform value does not match the uniform's declared kind
    InvalidUniform(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidUniform(msg) => write!(f, "Invalid uniform: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR message and build an `Error::BackendError` with the same text
///
/// # Example
///
/// ```no_run
/// # use wavefield_engine::engine_err;
/// let err = engine_err!("wavefield::Geometry", "segment count {} is invalid", 0);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::wavefield::Error::BackendError(message)
    }};
}

/// Log an ERROR message and return early with `Err(Error::BackendError)`
///
/// # Example
///
/// ```no_run
/// # use wavefield_engine::engine_bail;
/// fn check(count: u32) -> wavefield_engine::wavefield::Result<()> {
///     if count == 0 {
///         engine_bail!("wavefield::Geometry", "segment count must be > 0");
///     }
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
