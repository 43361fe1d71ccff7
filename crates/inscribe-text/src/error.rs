/// Errors that can occur while rendering text overlays.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// Font selector outside the font table.
    #[error("font {index} is not available ({available} fonts loaded)")]
    InvalidFont { index: i32, available: usize },

    /// Timestamp pattern that strftime cannot interpret.
    #[error("invalid timestamp format {0:?}")]
    InvalidTimestampFormat(String),
}

/// Result type for text operations.
pub type TextResult<T> = Result<T, TextError>;
