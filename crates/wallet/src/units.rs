use alloy_primitives::{
    U256,
    utils::{ParseUnits, Unit},
};

/// Formats a wei balance as a decimal amount of the native token with four
/// fractional digits, e.g. `0xde0b6b3a7640000` (10^18 wei) -> `"1.0000"`.
///
/// The fractional part is truncated, not rounded, so the displayed amount
/// never exceeds what the account holds.
pub fn format_balance(wei: U256) -> String {
    let formatted = ParseUnits::U256(wei).format_units(Unit::ETHER);
    match formatted.split_once('.') {
        Some((whole, frac)) => format!("{whole}.{:0<4}", &frac[..frac.len().min(4)]),
        None => format!("{formatted}.0000"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_ether() {
        let wei = U256::from_str_radix("de0b6b3a7640000", 16).unwrap();
        assert_eq!(format_balance(wei), "1.0000");
    }

    #[test]
    fn zero() {
        assert_eq!(format_balance(U256::ZERO), "0.0000");
    }

    #[test]
    fn truncates_to_four_digits() {
        let wei = U256::from(1_234_567_890_123_456_789_u64);
        assert_eq!(format_balance(wei), "1.2345");
    }

    #[test]
    fn sub_unit_amounts_keep_leading_zeros() {
        // 0.0005 ETH
        let wei = U256::from(500_000_000_000_000_u64);
        assert_eq!(format_balance(wei), "0.0005");
    }

    #[test]
    fn large_balances() {
        // 123456 ETH
        let wei = U256::from(123_456_u64) * U256::from(10_u64).pow(U256::from(18_u64));
        assert_eq!(format_balance(wei), "123456.0000");
    }
}
