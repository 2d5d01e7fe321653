//! # Remit URI
//!
//! Payment-request links for Base remittances.
//!
//! A link names a recipient and optionally an amount and a message:
//!
//! ```text
//! https://baseremit.app/pay?to=0xfB69...d359&amount=0.05&message=Lunch%20money
//! ```
//!
//! Links are a prefill mechanism: whoever follows one lands on the send
//! form with the fields filled in, and the submission pipeline in
//! `remit-core` re-validates everything before funds move. QR rendering of
//! links is left to the presentation layer.

mod error;
mod link;

pub use error::{Error, Result};
pub use link::{parse_link, PaymentLink, PaymentLinkBuilder};

/// Host payment links are served from.
pub const LINK_HOST: &str = "baseremit.app";

/// Path component of a payment link.
pub const LINK_PATH: &str = "pay";
