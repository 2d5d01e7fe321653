//! Error types for payment submission.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::amount::format_eth;

/// Result type alias for payment submission operations
pub type Result<T> = std::result::Result<T, SubmitError>;

/// Errors raised while validating a payment request, before any collaborator
/// is contacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Recipient is not a valid EVM address.
    #[error("Invalid recipient address")]
    InvalidRecipient,

    /// Amount is not a parseable number.
    #[error("Please enter a valid number")]
    InvalidAmountFormat,

    /// Amount is zero or negative.
    #[error("Amount must be greater than 0")]
    AmountNotPositive,

    /// Amount is above the per-payment ceiling.
    #[error("Amount cannot exceed 1000 ETH")]
    AmountExceedsLimit,

    /// Amount looked numeric but has no exact wei representation.
    #[error("Invalid amount format")]
    AmountConversionFailed,

    /// Message is longer than the 200 character cap.
    #[error("Message too long (max 200 characters)")]
    MessageTooLong,
}

/// Coarse classification of a collaborator failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureCategory {
    /// The user or signer refused to sign.
    Rejected,
    /// The node could not be reached or the transport failed.
    Network,
    /// The transaction was mined but reverted on-chain.
    Reverted,
    /// The account could not fund gas for the transaction.
    Fee,
    /// Anything the gateway could not classify.
    Other,
}

impl FailureCategory {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureCategory::Rejected => "rejected",
            FailureCategory::Network => "network",
            FailureCategory::Reverted => "reverted",
            FailureCategory::Fee => "fee",
            FailureCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Failure reported by a wallet or contract collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{detail}")]
pub struct GatewayError {
    /// Coarse failure classification.
    pub category: FailureCategory,
    /// Human-readable detail from the underlying client.
    pub detail: String,
}

impl GatewayError {
    /// Create a categorized gateway error.
    pub fn new(category: FailureCategory, detail: impl Into<String>) -> Self {
        Self {
            category,
            detail: detail.into(),
        }
    }
}

/// Pipeline phase at which a submission failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPhase {
    /// Checking the request fields.
    Validating,
    /// Fetching and comparing the account balance.
    CheckingBalance,
    /// Handing the transaction to a collaborator.
    Dispatching,
}

/// Errors surfaced by [`PaymentSubmitter::submit`].
///
/// [`PaymentSubmitter::submit`]: crate::PaymentSubmitter::submit
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The request failed validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No account is connected to the wallet gateway.
    #[error("Wallet not connected")]
    WalletNotConnected,

    /// The wallet could not report a balance for the account.
    #[error("Balance query failed: {0}")]
    BalanceUnavailable(GatewayError),

    /// The account holds less than the payment requires.
    #[error(
        "Insufficient balance. You need {} ETH but only have {} ETH",
        format_eth(*required_wei),
        format_eth(*available_wei)
    )]
    InsufficientBalance {
        /// Payment value in wei.
        required_wei: u128,
        /// Balance reported by the wallet, in wei.
        available_wei: u128,
    },

    /// The transaction was handed to a collaborator and failed.
    #[error("Payment failed: {0}")]
    Dispatch(GatewayError),
}

impl SubmitError {
    /// Pipeline phase at which the failure occurred.
    pub fn phase(&self) -> SubmissionPhase {
        match self {
            SubmitError::Validation(_) => SubmissionPhase::Validating,
            SubmitError::WalletNotConnected
            | SubmitError::BalanceUnavailable(_)
            | SubmitError::InsufficientBalance { .. } => SubmissionPhase::CheckingBalance,
            SubmitError::Dispatch(_) => SubmissionPhase::Dispatching,
        }
    }

    /// Failure category, when the failure came from a collaborator.
    pub fn category(&self) -> Option<FailureCategory> {
        match self {
            SubmitError::BalanceUnavailable(e) | SubmitError::Dispatch(e) => Some(e.category),
            _ => None,
        }
    }
}
