//! Conversions between core and ethers types.

use ethers::types::{H160, H256, U256};

use remit_core::{Address, TxHash};

pub(crate) fn to_eth_address(address: Address) -> H160 {
    H160(*address.as_bytes())
}

pub(crate) fn to_core_address(address: H160) -> Address {
    Address::from_bytes(address.0)
}

pub(crate) fn to_core_hash(hash: H256) -> TxHash {
    TxHash::from_bytes(hash.0)
}

/// Narrow a U256 balance to u128 wei, saturating at the maximum.
pub(crate) fn u256_to_wei(value: U256) -> u128 {
    if value > U256::from(u128::MAX) {
        u128::MAX
    } else {
        value.as_u128()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_roundtrip() {
        let core: Address = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359"
            .parse()
            .unwrap();
        assert_eq!(to_core_address(to_eth_address(core)), core);
    }

    #[test]
    fn test_u256_narrowing() {
        assert_eq!(u256_to_wei(U256::zero()), 0);
        assert_eq!(u256_to_wei(U256::from(u128::MAX)), u128::MAX);
        assert_eq!(u256_to_wei(U256::from(u128::MAX) + 1), u128::MAX);
        assert_eq!(u256_to_wei(U256::MAX), u128::MAX);
    }
}
