//! Building and parsing payment-request links.
//!
//! ## Link format
//!
//! ```text
//! https://baseremit.app/pay?to=0xfB69...d359&amount=0.05&message=Lunch%20money
//! ```
//!
//! `to` is required; `amount` (decimal ETH) and `message` are optional.
//! A link prefills the sender's form, so everything it carries is
//! re-validated by the submission pipeline before any funds move.

use std::fmt;
use std::str::FromStr;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use remit_core::{format_eth, parse_eth_amount, Address, MAX_MESSAGE_CHARS};

use crate::error::{Error, Result};
use crate::{LINK_HOST, LINK_PATH};

/// A parsed payment-request link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentLink {
    /// Requested recipient.
    recipient: Address,
    /// Requested amount in wei, when the link names one.
    amount_wei: Option<u128>,
    /// Suggested message, when the link names one.
    message: Option<String>,
}

impl PaymentLink {
    /// Get the requested recipient
    pub fn recipient(&self) -> Address {
        self.recipient
    }

    /// Get the requested amount in wei
    pub fn amount_wei(&self) -> Option<u128> {
        self.amount_wei
    }

    /// Get the requested amount as a decimal ETH string
    pub fn amount_str(&self) -> Option<String> {
        self.amount_wei.map(format_eth)
    }

    /// Get the suggested message
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Generate the full link string
    pub fn to_link_string(&self) -> String {
        let mut link = format!(
            "https://{}/{}?to={}",
            LINK_HOST,
            LINK_PATH,
            self.recipient.to_checksum_hex()
        );

        if let Some(wei) = self.amount_wei {
            link.push_str("&amount=");
            link.push_str(&format_eth(wei));
        }
        if let Some(ref message) = self.message {
            link.push_str("&message=");
            link.push_str(&utf8_percent_encode(message, NON_ALPHANUMERIC).to_string());
        }

        link
    }
}

impl fmt::Display for PaymentLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_link_string())
    }
}

impl FromStr for PaymentLink {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_link(s)
    }
}

/// Builder for payment-request links.
pub struct PaymentLinkBuilder {
    recipient: Address,
    amount_wei: Option<u128>,
    message: Option<String>,
}

impl PaymentLinkBuilder {
    /// Start a link for a recipient.
    pub fn new(recipient: Address) -> Self {
        Self {
            recipient,
            amount_wei: None,
            message: None,
        }
    }

    /// Request a specific amount, in wei.
    pub fn amount_wei(mut self, wei: u128) -> Self {
        self.amount_wei = Some(wei);
        self
    }

    /// Request a specific amount from a decimal ETH string.
    pub fn amount_str(mut self, amount: &str) -> Result<Self> {
        let wei =
            parse_eth_amount(amount).map_err(|_| Error::InvalidAmount(amount.to_string()))?;
        self.amount_wei = Some(wei);
        Ok(self)
    }

    /// Suggest a message to attach to the payment.
    pub fn message(mut self, message: impl Into<String>) -> Result<Self> {
        let message = message.into();
        if message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(Error::MessageTooLong);
        }
        self.message = Some(message);
        Ok(self)
    }

    /// Build the payment link
    pub fn build(self) -> PaymentLink {
        PaymentLink {
            recipient: self.recipient,
            amount_wei: self.amount_wei,
            message: self.message,
        }
    }
}

/// Parse a payment-request link.
pub fn parse_link(link_str: &str) -> Result<PaymentLink> {
    let url = url::Url::parse(link_str)?;

    if url.scheme() != "https" {
        return Err(Error::InvalidLink("Scheme must be https".to_string()));
    }

    let host = url
        .host_str()
        .ok_or_else(|| Error::InvalidLink("Missing host".to_string()))?;
    if host != LINK_HOST {
        return Err(Error::InvalidLink(format!("Unknown host: {}", host)));
    }

    let path = url.path();
    if path != format!("/{}", LINK_PATH) && path != format!("/{}/", LINK_PATH) {
        return Err(Error::InvalidLink(format!("Invalid path: {}", path)));
    }

    let mut recipient: Option<Address> = None;
    let mut amount_wei: Option<u128> = None;
    let mut message: Option<String> = None;

    for (name, value) in url.query_pairs() {
        match name.as_ref() {
            "to" => {
                let parsed = value
                    .parse()
                    .map_err(|_| Error::InvalidRecipient(value.into_owned()))?;
                recipient = Some(parsed);
            }
            "amount" => {
                let wei = parse_eth_amount(&value)
                    .map_err(|_| Error::InvalidAmount(value.into_owned()))?;
                amount_wei = Some(wei);
            }
            "message" => {
                if value.chars().count() > MAX_MESSAGE_CHARS {
                    return Err(Error::MessageTooLong);
                }
                message = Some(value.into_owned());
            }
            _ => {
                // Ignore unknown parameters for forward compatibility.
            }
        }
    }

    let recipient = recipient.ok_or(Error::MissingParameter("to"))?;

    Ok(PaymentLink {
        recipient,
        amount_wei,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECIPIENT: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";

    fn recipient() -> Address {
        RECIPIENT.parse().unwrap()
    }

    #[test]
    fn test_minimal_link() {
        let link = PaymentLinkBuilder::new(recipient()).build();
        assert_eq!(
            link.to_link_string(),
            format!("https://baseremit.app/pay?to={}", RECIPIENT)
        );
        assert_eq!(link.amount_wei(), None);
        assert_eq!(link.message(), None);
    }

    #[test]
    fn test_full_link_roundtrip() {
        let link = PaymentLinkBuilder::new(recipient())
            .amount_str("0.05")
            .unwrap()
            .message("Lunch money")
            .unwrap()
            .build();

        let rendered = link.to_link_string();
        assert!(rendered.contains("amount=0.05"));
        assert!(rendered.contains("message=Lunch%20money"));

        let parsed: PaymentLink = rendered.parse().unwrap();
        assert_eq!(parsed, link);
        assert_eq!(parsed.amount_wei(), Some(50_000_000_000_000_000));
        assert_eq!(parsed.amount_str().as_deref(), Some("0.05"));
        assert_eq!(parsed.message(), Some("Lunch money"));
    }

    #[test]
    fn test_parse_requires_recipient() {
        let err = parse_link("https://baseremit.app/pay?amount=1").unwrap_err();
        assert!(matches!(err, Error::MissingParameter("to")));
    }

    #[test]
    fn test_parse_rejects_wrong_location() {
        assert!(matches!(
            parse_link(&format!("http://baseremit.app/pay?to={}", RECIPIENT)),
            Err(Error::InvalidLink(_))
        ));
        assert!(matches!(
            parse_link(&format!("https://example.com/pay?to={}", RECIPIENT)),
            Err(Error::InvalidLink(_))
        ));
        assert!(matches!(
            parse_link(&format!("https://baseremit.app/send?to={}", RECIPIENT)),
            Err(Error::InvalidLink(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_parameters() {
        assert!(matches!(
            parse_link("https://baseremit.app/pay?to=0x1234"),
            Err(Error::InvalidRecipient(_))
        ));
        assert!(matches!(
            parse_link(&format!(
                "https://baseremit.app/pay?to={}&amount=abc",
                RECIPIENT
            )),
            Err(Error::InvalidAmount(_))
        ));

        let long = "m".repeat(MAX_MESSAGE_CHARS + 1);
        assert!(matches!(
            parse_link(&format!(
                "https://baseremit.app/pay?to={}&message={}",
                RECIPIENT, long
            )),
            Err(Error::MessageTooLong)
        ));
    }

    #[test]
    fn test_parse_ignores_unknown_parameters() {
        let link = parse_link(&format!(
            "https://baseremit.app/pay?to={}&utm_source=qr&amount=1",
            RECIPIENT
        ))
        .unwrap();
        assert_eq!(link.recipient(), recipient());
        assert_eq!(link.amount_wei(), Some(1_000_000_000_000_000_000));
    }

    #[test]
    fn test_trailing_slash_path_accepted() {
        let link = parse_link(&format!("https://baseremit.app/pay/?to={}", RECIPIENT)).unwrap();
        assert_eq!(link.recipient(), recipient());
    }

    #[test]
    fn test_builder_validates_inputs() {
        assert!(matches!(
            PaymentLinkBuilder::new(recipient()).amount_str("1e5"),
            Err(Error::InvalidAmount(_))
        ));
        assert!(matches!(
            PaymentLinkBuilder::new(recipient()).message("m".repeat(201)),
            Err(Error::MessageTooLong)
        ));
    }
}
