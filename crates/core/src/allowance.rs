//! The daily allowance seam.
//!
//! The ledger does not own the allowance amount; it asks an `AllowanceSource`
//! at the moment it needs the value and never caches the answer.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::amount::Gp;

/// Supplies the currently configured daily allowance.
pub trait AllowanceSource: Send + Sync {
    fn daily_allowance(&self) -> Gp;
}

impl<A> AllowanceSource for Arc<A>
where
    A: AllowanceSource + ?Sized,
{
    fn daily_allowance(&self) -> Gp {
        (**self).daily_allowance()
    }
}

/// An allowance held in memory; can be changed at runtime.
#[derive(Debug, Default)]
pub struct FixedAllowance {
    amount: AtomicU64,
}

impl FixedAllowance {
    pub fn new(amount: Gp) -> Self {
        Self {
            amount: AtomicU64::new(amount.value()),
        }
    }

    pub fn set(&self, amount: Gp) {
        self.amount.store(amount.value(), Ordering::SeqCst);
    }
}

impl AllowanceSource for FixedAllowance {
    fn daily_allowance(&self) -> Gp {
        Gp::new(self.amount.load(Ordering::SeqCst))
    }
}
