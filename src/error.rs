use thiserror::Error;

/// Errors produced by the browser, configuration, storage and backend layers.
///
/// The extraction engine itself never surfaces errors: a field or section
/// that cannot be located is reported as `None` or an empty list, and a
/// malformed selector expression counts as a non-match for that candidate
/// only.
#[derive(Debug, Error)]
pub enum ReachError {
    /// Failed to launch a browser instance
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Failed to connect to an existing browser instance
    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    /// Navigation to a URL failed
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// A tab-level operation (create, close, activate) failed
    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    /// The profile page did not finish loading in time
    #[error("Page load timed out: {0}")]
    PageLoadTimeout(String),

    /// The rendered page has no main content element to capture
    #[error("Could not find main profile content on the page")]
    MainContentMissing,

    /// JavaScript evaluation in the page failed
    #[error("Evaluation failed: {0}")]
    EvaluationFailed(String),

    /// The selector configuration could not be loaded or failed validation
    #[error("Invalid selector configuration: {0}")]
    InvalidConfig(String),

    /// No API key is configured for the backend
    #[error("No API key configured - set one with `coldreach config set-key`")]
    MissingApiKey,

    /// The backend reported that the model is overloaded (HTTP 503)
    #[error("The model is overloaded. Please try again later.")]
    BackendOverloaded,

    /// The backend rejected the request
    #[error("Backend error ({status}): {message}")]
    BackendError { status: u16, message: String },

    /// The backend could not be reached
    #[error("Could not connect to AI service: {0}")]
    NetworkError(String),

    /// Reading or writing the settings file failed
    #[error("Storage failed: {0}")]
    StorageFailed(String),

    /// A tool failed while executing
    #[error("Tool '{tool}' failed: {reason}")]
    ToolExecutionFailed { tool: String, reason: String },

    /// No tool is registered under the requested name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Tool parameters did not match the tool's schema
    #[error("Invalid parameters for tool '{tool}': {reason}")]
    InvalidParams { tool: String, reason: String },
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, ReachError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReachError::NavigationFailed("timeout after 25s".to_string());
        assert_eq!(err.to_string(), "Navigation failed: timeout after 25s");

        let err = ReachError::BackendError {
            status: 500,
            message: "internal error".to_string(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("internal error"));
    }

    #[test]
    fn test_overloaded_message_matches_backend_wording() {
        let err = ReachError::BackendOverloaded;
        assert_eq!(
            err.to_string(),
            "The model is overloaded. Please try again later."
        );
    }
}
