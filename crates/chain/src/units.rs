//! Display scaling for raw token amounts

use alloy_primitives::U256;

/// Format a raw `amount` with `decimals` fractional digits, trimming
/// trailing zeros. Integer arithmetic throughout; no float rounding.
pub fn format_units(amount: U256, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }
    let Some(divisor) = U256::from(10u8).checked_pow(U256::from(decimals)) else {
        // decimals so large the divisor overflows 256 bits; show the raw amount
        return amount.to_string();
    };

    let whole = amount / divisor;
    let frac = amount % divisor;
    if frac.is_zero() {
        return whole.to_string();
    }

    let frac = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_whole_amounts() {
        assert_eq!(format_units(U256::from(0u64), 18), "0");
        assert_eq!(format_units(U256::from(5u64), 0), "5");
        assert_eq!(
            format_units(U256::from(2_000_000_000_000_000_000u64), 18),
            "2"
        );
    }

    #[test]
    fn formats_fractional_amounts() {
        assert_eq!(
            format_units(U256::from(1_500_000_000_000_000_000u64), 18),
            "1.5"
        );
        // Leading fractional zeros survive the padding.
        assert_eq!(format_units(U256::from(1_002u64), 3), "1.002");
        assert_eq!(format_units(U256::from(1u64), 18), "0.000000000000000001");
    }
}
