//! ethers-backed wallet gateway.

use std::sync::Arc;

use async_trait::async_trait;
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{TransactionRequest, U256, U64};
use tracing::{debug, info};

use remit_core::{Address, ChainConfig, FailureCategory, GatewayError, TxHash, WalletGateway};

use crate::contract::RemittanceClient;
use crate::convert::{to_core_address, to_core_hash, to_eth_address, u256_to_wei};
use crate::error::{gateway_failure, EvmError};

/// Signing client shared by the wallet and the contract facade.
pub(crate) type SignerClient = Arc<SignerMiddleware<Provider<Http>, LocalWallet>>;

/// Wallet gateway over a JSON-RPC endpoint.
///
/// With a signing key the wallet reports its account and can send
/// transfers. Without one it is read-only: `account` is `None` and any
/// send fails as a rejection.
pub struct EvmWallet {
    provider: Provider<Http>,
    client: Option<SignerClient>,
    account: Option<Address>,
}

impl EvmWallet {
    /// Connect with a signing key.
    pub fn new(chain: &ChainConfig, private_key: &str) -> Result<Self, EvmError> {
        let provider = Provider::<Http>::try_from(chain.rpc_url.as_str())
            .map_err(|e| EvmError::InvalidEndpoint(e.to_string()))?;

        let wallet: LocalWallet = private_key
            .parse()
            .map_err(|e| EvmError::InvalidKey(format!("{:?}", e)))?;
        let wallet = wallet.with_chain_id(chain.chain_id);
        let account = to_core_address(wallet.address());

        let client = Arc::new(SignerMiddleware::new(provider.clone(), wallet));

        Ok(Self {
            provider,
            client: Some(client),
            account: Some(account),
        })
    }

    /// Connect without a signing key; balance queries only.
    pub fn read_only(chain: &ChainConfig) -> Result<Self, EvmError> {
        let provider = Provider::<Http>::try_from(chain.rpc_url.as_str())
            .map_err(|e| EvmError::InvalidEndpoint(e.to_string()))?;

        Ok(Self {
            provider,
            client: None,
            account: None,
        })
    }

    /// Client for the remittance contract, sharing this wallet's signer.
    pub fn remittance_client(&self, contract: Address) -> Result<RemittanceClient, EvmError> {
        let client = self.client.clone().ok_or(EvmError::MissingKey)?;
        Ok(RemittanceClient::new(client, contract))
    }
}

#[async_trait]
impl WalletGateway for EvmWallet {
    fn account(&self) -> Option<Address> {
        self.account
    }

    async fn balance(&self, account: Address) -> Result<u128, GatewayError> {
        let balance = self
            .provider
            .get_balance(to_eth_address(account), None)
            .await
            .map_err(|e| {
                GatewayError::new(
                    FailureCategory::Network,
                    format!("balance query failed: {}", e),
                )
            })?;
        Ok(u256_to_wei(balance))
    }

    async fn transfer(&self, to: Address, value_wei: u128) -> Result<TxHash, GatewayError> {
        let client = self.client.as_ref().ok_or_else(|| {
            GatewayError::new(FailureCategory::Rejected, "no signing key configured")
        })?;

        let tx = TransactionRequest::new()
            .to(to_eth_address(to))
            .value(U256::from(value_wei));

        debug!("sending {} wei to {}", value_wei, to);
        send_and_confirm(client, tx).await
    }
}

/// Send a transaction and wait for its first confirmation.
pub(crate) async fn send_and_confirm(
    client: &SignerClient,
    tx: TransactionRequest,
) -> Result<TxHash, GatewayError> {
    let pending = client
        .send_transaction(tx, None)
        .await
        .map_err(|e| gateway_failure("send failed", &e.to_string()))?;
    let tx_hash = pending.tx_hash();
    info!("transaction submitted: {:?}", tx_hash);

    let receipt = pending
        .await
        .map_err(|e| gateway_failure("confirmation failed", &e.to_string()))?
        .ok_or_else(|| {
            GatewayError::new(
                FailureCategory::Other,
                "transaction dropped from the mempool",
            )
        })?;

    if receipt.status == Some(U64::zero()) {
        return Err(GatewayError::new(
            FailureCategory::Reverted,
            format!("transaction {:?} reverted", receipt.transaction_hash),
        ));
    }

    Ok(to_core_hash(receipt.transaction_hash))
}
