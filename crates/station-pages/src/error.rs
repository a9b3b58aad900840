//! Page-object errors.

use std::time::Duration;

use station_browser::BrowserError;
use thiserror::Error;

/// Errors raised by page objects and scenario commands.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("{description} not visible within {timeout:?}")]
    ElementNotVisible {
        description: String,
        timeout: Duration,
    },

    #[error("{description} still visible after {timeout:?}")]
    ElementStillVisible {
        description: String,
        timeout: Duration,
    },

    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    #[error("Unknown page kind: {0}")]
    UnknownPageKind(String),

    #[error("Station extension service worker not found")]
    ExtensionNotFound,

    #[error("No page matching '{fragment}' opened within {timeout:?}")]
    NavigationTimedOut { fragment: String, timeout: Duration },

    #[error("Navigation to '{0}' cancelled")]
    NavigationCancelled(String),

    #[error("Gave up after {attempts} attempt(s): {last}")]
    RetriesExhausted { attempts: u32, last: Box<PageError> },

    #[error("Secret not configured; set {0}")]
    MissingSecret(&'static str),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Browser(#[from] BrowserError),
}

impl PageError {
    pub(crate) fn not_visible(description: impl ToString, timeout: Duration) -> Self {
        PageError::ElementNotVisible {
            description: description.to_string(),
            timeout,
        }
    }

    pub(crate) fn still_visible(description: impl ToString, timeout: Duration) -> Self {
        PageError::ElementStillVisible {
            description: description.to_string(),
            timeout,
        }
    }
}
