//! Chain configuration for the Base network.

use serde::{Deserialize, Serialize};

use crate::payment::TxHash;

/// Configuration for one EVM network.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Numeric chain ID.
    pub chain_id: u64,
    /// Network name.
    pub name: String,
    /// RPC endpoint URL.
    pub rpc_url: String,
    /// Block explorer base URL.
    pub explorer_url: String,
    /// Native token symbol.
    pub native_symbol: String,
}

impl ChainConfig {
    /// Base mainnet configuration.
    pub fn base_mainnet(rpc_url: impl Into<String>) -> Self {
        Self {
            chain_id: 8453,
            name: "base".to_string(),
            rpc_url: rpc_url.into(),
            explorer_url: "https://basescan.org".to_string(),
            native_symbol: "ETH".to_string(),
        }
    }

    /// Base Sepolia testnet configuration.
    pub fn base_sepolia(rpc_url: impl Into<String>) -> Self {
        Self {
            chain_id: 84532,
            name: "base-sepolia".to_string(),
            rpc_url: rpc_url.into(),
            explorer_url: "https://sepolia.basescan.org".to_string(),
            native_symbol: "ETH".to_string(),
        }
    }

    /// Block explorer link for a transaction.
    pub fn tx_url(&self, tx_hash: &TxHash) -> String {
        format!("{}/tx/{}", self.explorer_url, tx_hash)
    }
}
