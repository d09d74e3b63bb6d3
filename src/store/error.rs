/// Errors that can occur during store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("business not found: {0}")]
    BusinessNotFound(String),

    #[error("a business with slug '{0}' already exists")]
    DuplicateSlug(String),

    #[error("invalid slug '{0}': only lowercase letters, numbers, and hyphens are allowed")]
    InvalidSlug(String),

    #[error("feedback not found: {0}")]
    FeedbackNotFound(String),
}
