//! Payment request types and validation.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::address::Address;
use crate::amount::parse_eth_amount;
use crate::error::ValidationError;
use crate::{MAX_MESSAGE_CHARS, MAX_PAYMENT_ETH, MAX_PAYMENT_WEI};

/// A payment as entered by the user, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Recipient address string.
    pub recipient: String,
    /// Amount in ETH as a decimal string.
    pub amount: String,
    /// Optional message to the recipient.
    #[serde(default)]
    pub message: String,
}

impl PaymentRequest {
    /// Create a request with an empty message.
    pub fn new(recipient: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            amount: amount.into(),
            message: String::new(),
        }
    }

    /// Attach a message for the recipient.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Validate this request into its canonical on-chain form.
    pub fn validate(&self) -> Result<NormalizedPayment, ValidationError> {
        validate(self)
    }
}

/// A validated payment in its canonical on-chain form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedPayment {
    /// Parsed recipient address.
    pub recipient: Address,
    /// Payment value in wei.
    pub value_wei: u128,
    /// Message to forward when the contract route is used.
    pub message: String,
}

/// Validate a payment request.
///
/// Checks run in a fixed order and the first failure wins: recipient
/// address, numeric amount format, positivity, the 1000 ETH ceiling, exact
/// wei conversion, then message length. Pure and idempotent; no collaborator
/// is contacted.
pub fn validate(request: &PaymentRequest) -> Result<NormalizedPayment, ValidationError> {
    let recipient: Address = request
        .recipient
        .parse()
        .map_err(|_| ValidationError::InvalidRecipient)?;

    // Coarse numeric checks on the typed amount. These pick the precise
    // complaint before the exact conversion below.
    let approx: f64 = request
        .amount
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidAmountFormat)?;
    if !approx.is_finite() {
        return Err(ValidationError::InvalidAmountFormat);
    }
    if approx <= 0.0 {
        return Err(ValidationError::AmountNotPositive);
    }
    if approx > MAX_PAYMENT_ETH as f64 {
        return Err(ValidationError::AmountExceedsLimit);
    }

    let value_wei = parse_eth_amount(&request.amount)?;
    // The float ceiling check cannot see the last few wei; re-check exactly.
    if value_wei > MAX_PAYMENT_WEI {
        return Err(ValidationError::AmountExceedsLimit);
    }

    if request.message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ValidationError::MessageTooLong);
    }

    Ok(NormalizedPayment {
        recipient,
        value_wei,
        message: request.message.clone(),
    })
}

/// A 32-byte transaction hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxHash([u8; 32]);

impl TxHash {
    /// Construct from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw hash bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse from a `0x`-prefixed hex string.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex_part = s.strip_prefix("0x")?;
        if hex_part.len() != 64 {
            return None;
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(hex_part, &mut bytes).ok()?;
        Some(Self(bytes))
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for TxHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TxHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TxHash::from_hex(&s).ok_or_else(|| de::Error::custom("invalid transaction hash"))
    }
}

/// Route a payment took through dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    /// Through the remittance contract; the message went on-chain.
    Contract,
    /// A plain wallet transfer; no message was carried.
    Direct,
}

/// Outcome of a successfully dispatched payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Hash of the accepted transaction.
    pub tx_hash: TxHash,
    /// Recipient the payment went to.
    pub recipient: Address,
    /// Value carried, in wei.
    pub value_wei: u128,
    /// Route the payment took.
    pub route: RouteKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECIPIENT: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";

    fn request(amount: &str) -> PaymentRequest {
        PaymentRequest::new(RECIPIENT, amount)
    }

    #[test]
    fn test_valid_request_normalizes() {
        let payment = request("0.05")
            .with_message("rent")
            .validate()
            .expect("request should validate");
        assert_eq!(payment.recipient.to_string(), RECIPIENT);
        assert_eq!(payment.value_wei, 50_000_000_000_000_000);
        assert_eq!(payment.message, "rent");
    }

    #[test]
    fn test_invalid_recipient_wins_over_other_failures() {
        let req = PaymentRequest::new("not-an-address", "abc");
        assert_eq!(req.validate(), Err(ValidationError::InvalidRecipient));
    }

    #[test]
    fn test_amount_errors() {
        assert_eq!(
            request("abc").validate(),
            Err(ValidationError::InvalidAmountFormat)
        );
        assert_eq!(
            request("0").validate(),
            Err(ValidationError::AmountNotPositive)
        );
        assert_eq!(
            request("-3").validate(),
            Err(ValidationError::AmountNotPositive)
        );
        assert_eq!(
            request("1001").validate(),
            Err(ValidationError::AmountExceedsLimit)
        );
        // Parses as 100 ETH numerically but has no plain-decimal form.
        assert_eq!(
            request("1e2").validate(),
            Err(ValidationError::AmountConversionFailed)
        );
        assert_eq!(
            request("0.0000000000000000001").validate(),
            Err(ValidationError::AmountConversionFailed)
        );
    }

    #[test]
    fn test_exact_ceiling() {
        assert!(request("1000").validate().is_ok());
        // One wei over the cap; indistinguishable from 1000.0 as a float.
        assert_eq!(
            request("1000.000000000000000001").validate(),
            Err(ValidationError::AmountExceedsLimit)
        );
    }

    #[test]
    fn test_message_length_cap() {
        let at_cap = "m".repeat(MAX_MESSAGE_CHARS);
        assert!(request("1").with_message(at_cap).validate().is_ok());

        let over_cap = "m".repeat(MAX_MESSAGE_CHARS + 1);
        assert_eq!(
            request("1").with_message(over_cap).validate(),
            Err(ValidationError::MessageTooLong)
        );
    }

    #[test]
    fn test_validate_is_idempotent() {
        let req = request("0.05").with_message("rent");
        let first = validate(&req).unwrap();
        let second = validate(&req).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_tx_hash_hex_roundtrip() {
        let hash = TxHash::from_bytes([0xab; 32]);
        let rendered = hash.to_string();
        assert!(rendered.starts_with("0x"));
        assert_eq!(TxHash::from_hex(&rendered), Some(hash));
        assert_eq!(TxHash::from_hex("0x1234"), None);
    }

    #[test]
    fn test_receipt_serialization() {
        let receipt = Receipt {
            tx_hash: TxHash::from_bytes([0x11; 32]),
            recipient: RECIPIENT.parse().unwrap(),
            value_wei: 50_000_000_000_000_000,
            route: RouteKind::Contract,
        };
        let json = serde_json::to_string(&receipt).unwrap();
        assert!(json.contains(RECIPIENT));
        assert!(json.contains("\"route\":\"contract\""));
        let back: Receipt = serde_json::from_str(&json).unwrap();
        assert_eq!(back, receipt);
    }
}
