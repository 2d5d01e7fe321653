//! Exact decimal amount handling.
//!
//! Payment amounts arrive as user-typed decimal strings and must convert to
//! wei without rounding, so conversion works on the string itself with
//! checked integer arithmetic. Floating point never touches a value that is
//! compared or sent; it is only used for the coarse range pre-checks during
//! request validation.

use crate::error::ValidationError;
use crate::{ETH_DECIMALS, WEI_PER_ETH};

/// Parse an ETH amount string to wei.
///
/// Accepts plain decimals with at most 18 fractional digits. Exponents,
/// signs, and anything else `parseEther`-style conversion would reject fail
/// with [`ValidationError::AmountConversionFailed`]. The per-payment ceiling
/// is not enforced here; that is validation's job.
pub fn parse_eth_amount(amount_str: &str) -> Result<u128, ValidationError> {
    let amount_str = amount_str.trim();

    if amount_str.is_empty() {
        return Err(ValidationError::AmountConversionFailed);
    }

    let parts: Vec<&str> = amount_str.split('.').collect();
    if parts.len() > 2 {
        return Err(ValidationError::AmountConversionFailed);
    }

    let whole_part = parts[0];
    let frac_part = if parts.len() == 2 { parts[1] } else { "" };

    if !whole_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(ValidationError::AmountConversionFailed);
    }
    // "." on its own has neither a whole nor a fractional part.
    if whole_part.is_empty() && frac_part.is_empty() {
        return Err(ValidationError::AmountConversionFailed);
    }
    if frac_part.len() > ETH_DECIMALS {
        return Err(ValidationError::AmountConversionFailed);
    }

    let whole_wei: u128 = if whole_part.is_empty() {
        0
    } else {
        whole_part
            .parse::<u128>()
            .map_err(|_| ValidationError::AmountConversionFailed)?
            .checked_mul(WEI_PER_ETH)
            .ok_or(ValidationError::AmountConversionFailed)?
    };

    let frac_wei: u128 = if frac_part.is_empty() {
        0
    } else {
        let padded = format!("{:0<18}", frac_part);
        padded
            .parse::<u128>()
            .map_err(|_| ValidationError::AmountConversionFailed)?
    };

    whole_wei
        .checked_add(frac_wei)
        .ok_or(ValidationError::AmountConversionFailed)
}

/// Format wei as a decimal ETH string, trimming trailing zeros.
pub fn format_eth(wei: u128) -> String {
    let whole = wei / WEI_PER_ETH;
    let frac = wei % WEI_PER_ETH;

    if frac == 0 {
        format!("{}", whole)
    } else {
        let frac_str = format!("{:018}", frac);
        let trimmed = frac_str.trim_end_matches('0');
        format!("{}.{}", whole, trimmed)
    }
}
