//! # Remit Core
//!
//! Payment submission pipeline for native-currency payments on Base.
//!
//! ## Overview
//!
//! A payment starts as user-typed strings (recipient, amount, message) and
//! travels through a fixed pipeline:
//!
//! ```text
//! PaymentRequest -> validate -> check balance -> dispatch -> Receipt
//!                      |             |              |
//!                 ValidationError  InsufficientBalance  DispatchError
//! ```
//!
//! Validation parses the recipient address (including the EIP-55 mixed-case
//! checksum), converts the amount to wei exactly on the decimal string, and
//! caps the message length. The balance is fetched fresh from the wallet for
//! every submission and compared in integer wei. Dispatch takes one of two
//! routes fixed when the [`PaymentSubmitter`] is built: through the
//! remittance contract, which forwards the message on-chain, or as a plain
//! wallet transfer, which drops it.
//!
//! The pipeline talks to the chain only through the [`WalletGateway`] and
//! [`RemittanceContract`] traits, so the same flow runs against the ethers
//! clients in `remit-evm` or against mocks in tests.

mod address;
mod amount;
mod chain;
mod error;
mod gateway;
mod notify;
mod payment;
mod quote;
mod submit;

pub use address::Address;
pub use amount::{format_eth, parse_eth_amount};
pub use chain::ChainConfig;
pub use error::{
    FailureCategory, GatewayError, Result, SubmissionPhase, SubmitError, ValidationError,
};
pub use gateway::{RemittanceContract, WalletGateway};
pub use notify::{NotificationSink, Notice, NullSink};
pub use payment::{validate, NormalizedPayment, PaymentRequest, Receipt, RouteKind, TxHash};
pub use quote::{fiat_value_cents, format_cents, FiatCurrency, UnknownCurrency};
pub use submit::{DispatchRoute, PaymentSubmitter, SubmissionResult};

/// Wei per whole ETH.
pub const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;

/// Decimal places of the native currency.
pub const ETH_DECIMALS: usize = 18;

/// Largest payment accepted in a single submission, in whole ETH.
pub const MAX_PAYMENT_ETH: u128 = 1000;

/// Largest payment accepted in a single submission, in wei.
pub const MAX_PAYMENT_WEI: u128 = MAX_PAYMENT_ETH * WEI_PER_ETH;

/// Longest accepted payment message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 200;

/// Remittance contract deployed on Base mainnet.
pub const REMITTANCE_CONTRACT_ADDRESS: &str = "0x1d10E2239c95468c5e9154633132C97e0858Fe19";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(WEI_PER_ETH, 10u128.pow(18));
        assert_eq!(MAX_PAYMENT_WEI, 1000 * WEI_PER_ETH);
        assert!(REMITTANCE_CONTRACT_ADDRESS.parse::<Address>().is_ok());
    }
}
