//! GP (Game Points) amounts.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// A non-negative quantity of Game Points.
///
/// Balances and allowances are `Gp`; requested debits arrive as signed integers
/// and are validated through [`Gp::try_from_signed`] so a negative request is
/// rejected before it can touch a balance.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gp(u64);

impl ValueObject for Gp {}

impl Gp {
    pub const ZERO: Gp = Gp(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    /// Validate a caller-supplied amount.
    pub fn try_from_signed(amount: i64) -> DomainResult<Self> {
        u64::try_from(amount)
            .map(Self)
            .map_err(|_| DomainError::validation(format!("amount must be non-negative (got {amount})")))
    }

    /// Whether this balance is large enough to pay `amount`.
    pub fn covers(self, amount: Gp) -> bool {
        self.0 >= amount.0
    }

    /// Subtract `amount`, refusing to go below zero.
    pub fn checked_debit(self, amount: Gp) -> DomainResult<Gp> {
        self.0
            .checked_sub(amount.0)
            .map(Self)
            .ok_or_else(|| DomainError::invariant("balance cannot go negative"))
    }
}

impl From<u64> for Gp {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Gp> for u64 {
    fn from(value: Gp) -> Self {
        value.0
    }
}

impl core::fmt::Display for Gp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} GP", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn negative_amounts_are_rejected() {
        let err = Gp::try_from_signed(-1).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn debit_below_zero_is_an_invariant_violation() {
        let err = Gp::new(10).checked_debit(Gp::new(11)).unwrap_err();
        assert_eq!(err, DomainError::invariant("balance cannot go negative"));
    }

    #[test]
    fn serializes_as_a_bare_number() {
        assert_eq!(serde_json::to_string(&Gp::new(300)).unwrap(), "300");
        assert_eq!(Gp::new(300).to_string(), "300 GP");
    }

    proptest! {
        #[test]
        fn covers_agrees_with_checked_debit(balance in 0u64..10_000, amount in 0u64..10_000) {
            let balance = Gp::new(balance);
            let amount = Gp::new(amount);
            prop_assert_eq!(balance.covers(amount), balance.checked_debit(amount).is_ok());
        }
    }
}
