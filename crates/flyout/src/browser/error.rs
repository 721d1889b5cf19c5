//! Browser host errors.

use thiserror::Error;

/// The page globals the browser host needs are missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BrowserError {
    /// No `window` (not running in a browser main thread)
    #[error("no global `window`")]
    NoWindow,
    /// No `document` on the window
    #[error("window has no `document`")]
    NoDocument,
    /// The document has no `body` yet
    #[error("document has no `body`")]
    NoBody,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(BrowserError::NoWindow.to_string(), "no global `window`");
        assert_eq!(BrowserError::NoBody.to_string(), "document has no `body`");
    }
}
