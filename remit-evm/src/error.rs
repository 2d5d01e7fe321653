//! Error types and failure classification for the ethers gateway.

use thiserror::Error;

use remit_core::{FailureCategory, GatewayError};

/// Errors from constructing EVM clients.
#[derive(Debug, Error)]
pub enum EvmError {
    /// RPC endpoint URL could not be parsed.
    #[error("invalid RPC endpoint: {0}")]
    InvalidEndpoint(String),

    /// Private key material could not be parsed.
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    /// The operation needs a signing key but the wallet is read-only.
    #[error("no signing key configured")]
    MissingKey,
}

/// Classify a node or signer failure message.
///
/// ethers surfaces everything as strings at this level, so classification
/// goes by substring. On-chain outcomes are checked before signer-side
/// wording: a revert reason may itself contain "rejected". Unknown shapes
/// land in [`FailureCategory::Other`].
pub fn categorize_failure(detail: &str) -> FailureCategory {
    let lower = detail.to_lowercase();
    if lower.contains("insufficient funds") {
        FailureCategory::Fee
    } else if lower.contains("revert") {
        FailureCategory::Reverted
    } else if lower.contains("rejected") || lower.contains("denied") || lower.contains("cancelled")
    {
        FailureCategory::Rejected
    } else if lower.contains("connection")
        || lower.contains("timed out")
        || lower.contains("timeout")
        || lower.contains("network")
        || lower.contains("error sending request")
        || lower.contains("dns")
    {
        FailureCategory::Network
    } else {
        FailureCategory::Other
    }
}

/// Build a categorized gateway error from a failure message.
pub(crate) fn gateway_failure(context: &str, detail: &str) -> GatewayError {
    GatewayError::new(
        categorize_failure(detail),
        format!("{}: {}", context, detail),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorization() {
        assert_eq!(
            categorize_failure("user rejected transaction"),
            FailureCategory::Rejected
        );
        assert_eq!(
            categorize_failure("User denied transaction signature"),
            FailureCategory::Rejected
        );
        assert_eq!(
            categorize_failure("insufficient funds for gas * price + value"),
            FailureCategory::Fee
        );
        assert_eq!(
            categorize_failure("execution reverted: payment rejected"),
            FailureCategory::Reverted
        );
        assert_eq!(
            categorize_failure("connection refused"),
            FailureCategory::Network
        );
        assert_eq!(
            categorize_failure("error sending request for url (http://localhost:8545/)"),
            FailureCategory::Network
        );
        assert_eq!(
            categorize_failure("something else entirely"),
            FailureCategory::Other
        );
    }

    #[test]
    fn test_gateway_failure_keeps_context() {
        let err = gateway_failure("send failed", "connection refused");
        assert_eq!(err.category, FailureCategory::Network);
        assert_eq!(err.detail, "send failed: connection refused");
    }
}
