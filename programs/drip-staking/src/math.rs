//! Fixed-point multiply-divide helpers.
//!
//! `acc_reward_per_share` math runs through a 256-bit intermediate so the
//! multiply can never wrap; only a quotient that does not fit `u128` is an
//! error.

use uint::construct_uint;

construct_uint! {
    pub struct U256(4);
}

/// Computes `a * b / denominator`, rounding down.
///
/// Returns `None` on a zero denominator or a quotient wider than `u128`.
pub fn mul_div_floor(a: u128, b: u128, denominator: u128) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let numerator = U256::from(a).checked_mul(U256::from(b))?;
    let quotient = numerator / U256::from(denominator);
    if quotient > U256::from(u128::MAX) {
        return None;
    }
    Some(quotient.as_u128())
}

/// Basis-point fee on `amount`, rounding down.
pub fn fee_amount(amount: u64, fee_bps: u16, bps_denominator: u64) -> Option<u64> {
    let fee = mul_div_floor(amount as u128, fee_bps as u128, bps_denominator as u128)?;
    u64::try_from(fee).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn mul_div_exact() {
        assert_eq!(mul_div_floor(10_000, 5_000, 10_000), Some(5_000));
        assert_eq!(mul_div_floor(1, 1, 1), Some(1));
        assert_eq!(mul_div_floor(0, u128::MAX, 3), Some(0));
    }

    #[test]
    fn mul_div_rounds_down() {
        assert_eq!(mul_div_floor(7, 3, 2), Some(10)); // 21 / 2
        assert_eq!(mul_div_floor(1, 1, 2), Some(0));
    }

    #[test]
    fn mul_div_zero_denominator() {
        assert_eq!(mul_div_floor(1, 1, 0), None);
    }

    #[test]
    fn mul_div_survives_u128_width_products() {
        // u128::MAX * u128::MAX would wrap any native multiply; the helper
        // only rejects it because the quotient is too wide.
        assert_eq!(mul_div_floor(u128::MAX, u128::MAX, 1), None);
        assert_eq!(mul_div_floor(u128::MAX, u128::MAX, u128::MAX), Some(u128::MAX));
    }

    #[test]
    fn fee_bounds() {
        assert_eq!(fee_amount(10_000, 0, 10_000), Some(0));
        assert_eq!(fee_amount(10_000, 2_000, 10_000), Some(2_000));
        assert_eq!(fee_amount(3, 2_000, 10_000), Some(0));
    }

    proptest! {
        #[test]
        fn mul_div_never_exceeds_exact(a in any::<u64>(), b in any::<u64>(), d in 1u64..) {
            let got = mul_div_floor(a as u128, b as u128, d as u128).unwrap();
            let exact = (a as u128) * (b as u128) / (d as u128);
            prop_assert_eq!(got, exact);
        }

        #[test]
        fn mul_div_floor_is_monotone_in_a(a in any::<u64>(), b in any::<u64>(), d in 1u64..) {
            let lo = mul_div_floor(a as u128, b as u128, d as u128).unwrap();
            let hi = mul_div_floor(a as u128 + 1, b as u128, d as u128).unwrap();
            prop_assert!(hi >= lo);
        }

        #[test]
        fn fee_never_exceeds_amount(amount in any::<u64>(), bps in 0u16..=10_000) {
            let fee = fee_amount(amount, bps, 10_000).unwrap();
            prop_assert!(fee <= amount);
        }
    }
}
