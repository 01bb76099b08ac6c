use thiserror::Error;

/// Form-input errors detected synchronously, before any store mutation.
///
/// Every variant maps to a one-shot notification in the client; no state
/// is written when one of these is raised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),

    #[error("Card number must be 16 digits")]
    InvalidCardNumber,

    #[error("Card expiry must be MM/YY")]
    InvalidExpiry,

    #[error("Card CVC must be 3 digits")]
    InvalidCvc,
}

impl ValidationError {
    /// Title shown on the notification for this error.
    pub fn notice_title(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "Missing information",
            ValidationError::RatingOutOfRange(_) => "Invalid rating",
            ValidationError::InvalidCardNumber
            | ValidationError::InvalidExpiry
            | ValidationError::InvalidCvc => "Missing payment information",
        }
    }
}
