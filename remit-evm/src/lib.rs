//! # Remit EVM
//!
//! ethers-backed collaborators for the submission pipeline: a wallet
//! gateway over JSON-RPC and a client for the remittance contract's
//! payable `sendPayment(address,string)` entry point.
//!
//! Wallet and contract share one signing client. Build the wallet first
//! and derive the contract facade from it:
//!
//! ```text
//! let wallet = EvmWallet::new(&chain, &private_key)?;
//! let contract = wallet.remittance_client(contract_address)?;
//! ```

mod contract;
mod convert;
mod error;
mod wallet;

pub use contract::RemittanceClient;
pub use error::{categorize_failure, EvmError};
pub use wallet::EvmWallet;
