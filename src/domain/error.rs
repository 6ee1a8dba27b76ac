//! Error types for surface operations.
//!
//! This module defines the centralized error type [`SurfaceError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Every variant is recoverable and local to the operation that produced it: a
//! rejected command never tears down a surface, and teardown paths (`hide`,
//! session destruction) never return errors at all.

use thiserror::Error;

/// The main error type for surface operations.
///
/// This enum consolidates all error conditions that can occur while mediating
/// between application logic and the host-rendered surfaces, from missing host
/// capabilities to state-machine calls made in the wrong screen state.
///
/// # Examples
///
/// ```
/// use navsurface::domain::{Result, SurfaceError};
///
/// fn require_visible(visible: bool) -> Result<()> {
///     if visible {
///         Ok(())
///     } else {
///         Err(SurfaceError::NotVisible)
///     }
/// }
///
/// assert!(require_visible(false).is_err());
/// ```
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The host has not granted the overlay-drawing capability.
    ///
    /// Returned by `show` when the surface cannot be created. The capability
    /// grant flow itself is a host concern; callers are expected to request it
    /// and retry.
    #[error("overlay permission not granted")]
    PermissionDenied,

    /// A mutation was requested on a surface that does not exist.
    ///
    /// Returned by `update` and the pointer protocol when the overlay is
    /// hidden. Callers racing a `hide` receive this for any update that lands
    /// after teardown.
    #[error("overlay not shown")]
    NotVisible,

    /// A required host context is unavailable.
    ///
    /// Occurs when an operation needs a foreground host context (for example
    /// to request a capability grant) and none is attached.
    #[error("no active host context available")]
    NoActiveHost,

    /// A state-machine call was made in a screen state that does not support it.
    ///
    /// Occurs for calls like a search-text change while the settings screen is
    /// on top. The string names the rejected transition.
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    /// Configuration is invalid or malformed.
    ///
    /// The string describes the specific configuration problem.
    #[error("configuration error: {0}")]
    Config(String),

    /// Message bridge communication failed.
    ///
    /// Occurs when a command or event cannot be serialized or the peer
    /// endpoint has disconnected. The string contains details about the
    /// failure.
    #[error("bridge error: {0}")]
    Bridge(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for surface operations.
///
/// This is a type alias for `std::result::Result<T, SurfaceError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, SurfaceError>;
