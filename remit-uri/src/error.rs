//! Error types for payment-request links.

use thiserror::Error;

/// Result type alias for payment-link operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or parsing a payment link.
#[derive(Debug, Error)]
pub enum Error {
    /// The string is not a payment link.
    #[error("Invalid payment link: {0}")]
    InvalidLink(String),

    /// A required query parameter is absent.
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// The `to` parameter is not a valid EVM address.
    #[error("Invalid recipient address: {0}")]
    InvalidRecipient(String),

    /// The `amount` parameter is not a valid decimal amount.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// The `message` parameter is over the 200 character cap.
    #[error("Message too long (max 200 characters)")]
    MessageTooLong,

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}
