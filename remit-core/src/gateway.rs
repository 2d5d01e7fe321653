//! Collaborator traits for the wallet and the remittance contract.
//!
//! The submission pipeline reaches the chain only through these traits, so
//! the same flow runs against the ethers clients in `remit-evm` or against
//! mocks in tests.

use async_trait::async_trait;

use crate::address::Address;
use crate::error::GatewayError;
use crate::payment::TxHash;

/// Access to the user's wallet.
#[async_trait]
pub trait WalletGateway: Send + Sync {
    /// The connected account, if any.
    fn account(&self) -> Option<Address>;

    /// Current balance of an account in wei.
    ///
    /// Queried fresh per call; implementations must not cache across
    /// submissions.
    async fn balance(&self, account: Address) -> Result<u128, GatewayError>;

    /// Send a plain native-currency transfer and return the hash of the
    /// accepted transaction.
    async fn transfer(&self, to: Address, value_wei: u128) -> Result<TxHash, GatewayError>;
}

/// The fixed remittance contract.
#[async_trait]
pub trait RemittanceContract: Send + Sync {
    /// Invoke `sendPayment(recipient, message)` with `value_wei` attached
    /// and return the hash of the accepted transaction.
    async fn send_payment(
        &self,
        recipient: Address,
        message: &str,
        value_wei: u128,
    ) -> Result<TxHash, GatewayError>;
}
