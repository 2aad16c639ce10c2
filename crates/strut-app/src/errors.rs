//! Categorized application errors.
//!
//! Two failure domains exist in this core: overlay presentation and feed
//! pagination. Each gets a structured error type plus the severity routing
//! the render boundary needs to pick a toast level. Failures in one
//! domain never propagate into the other; a failed page fetch leaves the
//! overlay stack and every other pagination session untouched.

use crate::notifications::ToastLevel;
use thiserror::Error;

/// Errors surfaced through an overlay's pending dismissal handle or by
/// [`crate::overlay::OverlayStack::open`] itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlayError {
    /// The stack has shut down; nothing can be presented or settled.
    ///
    /// Reported as a rejection so callers awaiting a dismissal are never
    /// left hanging across teardown.
    #[error("overlay stack is closed")]
    StackClosed,

    /// The requested view failed before it ever mounted.
    #[error("overlay view failed to construct: {reason}")]
    ViewConstruction {
        /// What the render boundary reported.
        reason: String,
    },
}

impl OverlayError {
    /// A construction failure reported by the render boundary.
    pub fn construction(reason: impl Into<String>) -> Self {
        Self::ViewConstruction {
            reason: reason.into(),
        }
    }

    /// Whether this is a view construction failure.
    pub fn is_construction(&self) -> bool {
        matches!(self, Self::ViewConstruction { .. })
    }

    /// Toast severity for this error.
    pub fn toast_level(&self) -> ToastLevel {
        match self {
            Self::StackClosed => ToastLevel::Warning,
            Self::ViewConstruction { .. } => ToastLevel::Error,
        }
    }
}

/// A page request failed.
///
/// Recoverable by design: the pager keeps its cursor and the accumulated
/// items, so a retry resumes from exactly the page that failed. Already
/// rendered content is never demoted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// Transport-level failure.
    #[error("network error: {message}")]
    Network {
        /// Transport diagnostic.
        message: String,
        /// Whether a retry is worthwhile.
        recoverable: bool,
    },

    /// The service answered with a failure status.
    #[error("server rejected page request ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Service diagnostic.
        message: String,
    },

    /// The response body did not match the page contract.
    #[error("malformed page response: {message}")]
    Decode {
        /// Decoder diagnostic.
        message: String,
    },
}

impl FeedError {
    /// A recoverable transport failure.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            recoverable: true,
        }
    }

    /// A transport failure not worth retrying.
    pub fn network_fatal(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            recoverable: false,
        }
    }

    /// A failure status from the service.
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// A malformed response body.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Whether a retry with the same cursor may succeed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network { recoverable, .. } => *recoverable,
            Self::Server { status, .. } => *status >= 500 || *status == 429,
            Self::Decode { .. } => false,
        }
    }

    /// Toast severity for this error.
    pub fn toast_level(&self) -> ToastLevel {
        if self.is_recoverable() {
            ToastLevel::Warning
        } else {
            ToastLevel::Error
        }
    }
}
