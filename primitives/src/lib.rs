//! Shared fixed-point arithmetic and key-encoding primitives for the OMNI economic
//! core pallets (`pallet-tokenomics`, `pallet-fee-pipeline`, `pallet-treasury-redirect`,
//! `pallet-poc`, `pallet-governance-timelock`).
//!
//! Every quantity that flows between these pallets is either an [`Amount`] (a raw
//! token count, denomination-tagged by convention rather than by type — the runtime
//! has a single native denomination) or a [`Ratio`] (an 18-fractional-digit
//! fixed-point fraction). Keeping both here, leaf-level in the dependency graph,
//! means no pallet ever reaches for floating point or a second incompatible
//! fixed-point representation.

#![cfg_attr(not(feature = "std"), no_std)]

use codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use sp_runtime::{FixedPointNumber, FixedU128, RuntimeDebug};

/// Non-negative token quantity. All supply, fee, and credit amounts in the core use
/// this alias; the runtime's `Balance` is defined to be the same type.
pub type Amount = u128;

/// An 18-fractional-digit fixed-point ratio in `[0, 2^256/10^18)`, per spec §3.
///
/// Wraps [`FixedU128`] (which is already scaled by `10^18`) rather than reimplementing
/// fixed-point arithmetic, and narrows its API to the truncating-toward-zero
/// operations the economic core requires: every multiplication here floors instead
/// of rounding, and division by zero returns `None` instead of saturating.
#[derive(
    Clone, Copy, Encode, Decode, Eq, PartialEq, PartialOrd, Ord, Default, TypeInfo, MaxEncodedLen, RuntimeDebug,
)]
pub struct Ratio(FixedU128);

impl Ratio {
    pub fn zero() -> Self {
        Self(FixedU128::from_inner(0))
    }

    pub fn one() -> Self {
        Self(FixedU128::one())
    }

    pub fn from_percent(percent: u32) -> Self {
        Self(FixedU128::from_rational(percent as u128, 100))
    }

    pub fn from_rational(numerator: u128, denominator: u128) -> Self {
        Self(FixedU128::from_rational(numerator, denominator))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == FixedU128::from_inner(0)
    }

    /// `amount * self`, truncated toward zero. `None` only on overflow of the
    /// intermediate representation (never on a merely large but representable
    /// product), mirroring `FixedU128::checked_mul_int`.
    pub fn checked_mul_trunc(&self, amount: Amount) -> Option<Amount> {
        self.0.checked_mul_int(amount)
    }

    /// `self / rhs`. `None` if `rhs` is zero, per spec §3 ("division by zero fails
    /// the transaction").
    pub fn checked_div(&self, rhs: Ratio) -> Option<Ratio> {
        if rhs.is_zero() {
            return None;
        }
        self.0.checked_div(&rhs.0).map(Self)
    }

    pub fn saturating_add(&self, rhs: Ratio) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    pub fn saturating_sub(&self, rhs: Ratio) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    /// Exponential-smoothing step: `(1 - alpha) * self + alpha * target`, truncated.
    /// `alpha` is expected to be `1 / smoothing_blocks` per spec §4.2.
    pub fn smoothed_towards(&self, target: Ratio, alpha: Ratio) -> Self {
        let one_minus_alpha = Ratio::one().saturating_sub(alpha);
        let retained = Self(FixedU128::from_inner(
            one_minus_alpha.0.into_inner().saturating_mul(self.0.into_inner()) / FixedU128::accuracy(),
        ));
        let moved = Self(FixedU128::from_inner(
            alpha.0.into_inner().saturating_mul(target.0.into_inner()) / FixedU128::accuracy(),
        ));
        retained.saturating_add(moved)
    }

    pub fn into_fixed(self) -> FixedU128 {
        self.0
    }
}

impl From<FixedU128> for Ratio {
    fn from(value: FixedU128) -> Self {
        Self(value)
    }
}

/// Fixed-width big-endian key encoding helpers, per spec §6: "Keys are fixed-width
/// big-endian for numeric components (ids, heights) ... no variable-width encodings
/// in the key." Used when a pallet wants a byte-for-byte deterministic, lexicographically
/// ordered key rather than relying solely on the storage map's content hasher.
pub mod fixed_key {
    /// Big-endian encoding of a dense `u64` id or block height.
    pub fn encode_u64_be(value: u64) -> [u8; 8] {
        value.to_be_bytes()
    }

    /// Big-endian encoding of a `u32` (e.g. a day-slot index).
    pub fn encode_u32_be(value: u32) -> [u8; 4] {
        value.to_be_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_mul_trunc_floors() {
        let r = Ratio::from_percent(30);
        // 30% of 7 = 2.1 -> truncates to 2
        assert_eq!(r.checked_mul_trunc(7), Some(2));
    }

    #[test]
    fn ratio_div_by_zero_is_none() {
        let r = Ratio::from_percent(50);
        assert_eq!(r.checked_div(Ratio::zero()), None);
    }

    #[test]
    fn smoothing_uses_target_when_alpha_is_one() {
        let last = Ratio::from_percent(10);
        let target = Ratio::from_percent(90);
        let smoothed = last.smoothed_towards(target, Ratio::one());
        assert_eq!(smoothed.checked_mul_trunc(100), Some(90));
    }

    #[test]
    fn smoothing_keeps_last_when_alpha_is_zero() {
        let last = Ratio::from_percent(10);
        let target = Ratio::from_percent(90);
        let smoothed = last.smoothed_towards(target, Ratio::zero());
        assert_eq!(smoothed.checked_mul_trunc(100), Some(10));
    }

    #[test]
    fn fixed_key_round_trips_order() {
        let a = fixed_key::encode_u64_be(1);
        let b = fixed_key::encode_u64_be(2);
        assert!(a < b);
    }
}
