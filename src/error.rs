//! Error classification shared by services and routes.

/// Grepable error code and retryable flag for structured error bodies.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

impl ErrorCode for crate::store::StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_NOT_FOUND",
        }
    }
}

impl ErrorCode for crate::design::DesignError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ElementNotFound(_) => "E_ELEMENT_NOT_FOUND",
            Self::DuplicateElement(_) => "E_DUPLICATE_ELEMENT",
            Self::BlankText => "E_BLANK_TEXT",
            Self::NothingSelected => "E_NOTHING_SELECTED",
        }
    }
}
