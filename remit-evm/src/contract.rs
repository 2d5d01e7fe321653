//! Client for the remittance contract.
//!
//! The contract exposes one payable entry point,
//! `sendPayment(address recipient, string message)`, which forwards the
//! attached value to the recipient and logs the message. The client builds
//! the calldata by hand (selector plus ABI-encoded arguments) and submits
//! it through the shared signing client.

use async_trait::async_trait;
use ethers::abi::Token;
use ethers::types::{Bytes, TransactionRequest, U256};
use ethers::utils::keccak256;
use tracing::debug;

use remit_core::{Address, GatewayError, RemittanceContract, TxHash};

use crate::convert::to_eth_address;
use crate::wallet::{send_and_confirm, SignerClient};

/// Solidity signature of the contract's payable entry point.
const SEND_PAYMENT_SIG: &str = "sendPayment(address,string)";

/// Client for the remittance contract's `sendPayment` entry point.
///
/// Built from an [`EvmWallet`] so the contract call signs with the same
/// key as plain transfers.
///
/// [`EvmWallet`]: crate::EvmWallet
pub struct RemittanceClient {
    client: SignerClient,
    contract: Address,
}

impl RemittanceClient {
    pub(crate) fn new(client: SignerClient, contract: Address) -> Self {
        Self { client, contract }
    }

    /// Address of the contract this client calls.
    pub fn contract_address(&self) -> Address {
        self.contract
    }
}

/// Calldata for `sendPayment(recipient, message)`.
fn send_payment_calldata(recipient: Address, message: &str) -> Vec<u8> {
    let selector = &keccak256(SEND_PAYMENT_SIG.as_bytes())[..4];
    let args = ethers::abi::encode(&[
        Token::Address(to_eth_address(recipient)),
        Token::String(message.to_string()),
    ]);

    let mut calldata = selector.to_vec();
    calldata.extend_from_slice(&args);
    calldata
}

#[async_trait]
impl RemittanceContract for RemittanceClient {
    async fn send_payment(
        &self,
        recipient: Address,
        message: &str,
        value_wei: u128,
    ) -> Result<TxHash, GatewayError> {
        let calldata = send_payment_calldata(recipient, message);

        let tx = TransactionRequest::new()
            .to(to_eth_address(self.contract))
            .value(U256::from(value_wei))
            .data(Bytes::from(calldata));

        debug!(
            "calling sendPayment on {} with {} wei attached",
            self.contract, value_wei
        );
        send_and_confirm(&self.client, tx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECIPIENT: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";

    #[test]
    fn test_calldata_starts_with_selector() {
        let calldata = send_payment_calldata(RECIPIENT.parse().unwrap(), "rent");
        let selector = &keccak256(SEND_PAYMENT_SIG.as_bytes())[..4];
        assert_eq!(&calldata[..4], selector);
    }

    #[test]
    fn test_calldata_layout() {
        let recipient: Address = RECIPIENT.parse().unwrap();
        let calldata = send_payment_calldata(recipient, "rent");

        // Word 1: recipient, left-padded to 32 bytes.
        assert_eq!(&calldata[4..16], &[0u8; 12]);
        assert_eq!(&calldata[16..36], recipient.as_bytes());

        // Word 2: offset of the string data (0x40, past the two head words).
        let mut offset_word = [0u8; 32];
        offset_word[31] = 0x40;
        assert_eq!(&calldata[36..68], &offset_word);

        // Word 3: string length, then the bytes padded to a word.
        let mut len_word = [0u8; 32];
        len_word[31] = 4;
        assert_eq!(&calldata[68..100], &len_word);
        assert_eq!(&calldata[100..104], b"rent");
        assert_eq!(&calldata[104..132], &[0u8; 28]);
        assert_eq!(calldata.len(), 132);
    }

    #[test]
    fn test_empty_message_still_encodes() {
        let calldata = send_payment_calldata(RECIPIENT.parse().unwrap(), "");
        // Selector + recipient word + offset word + zero-length word.
        assert_eq!(calldata.len(), 100);
        assert_eq!(&calldata[68..100], &[0u8; 32]);
    }
}
