use seri_arcade_core::Gp;
use thiserror::Error;

/// Why a ledger operation was refused.
///
/// None of these are faults: they are expected outcomes the caller turns into
/// "not affordable" or "not ready yet".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient GP: requested {requested}, available {available}")]
    InsufficientFunds { requested: Gp, available: Gp },

    #[error("invalid GP amount: {amount}")]
    InvalidAmount { amount: i64 },

    #[error("GP ledger has not been initialized")]
    NotLoaded,
}

/// Result of a debit attempt against the persisted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeductOutcome {
    Debited { new_balance: Gp },
    /// Nothing was debited; `balance` is the (current-period) balance.
    Rejected { balance: Gp, reason: LedgerError },
}

impl DeductOutcome {
    pub fn success(&self) -> bool {
        matches!(self, DeductOutcome::Debited { .. })
    }

    /// Balance after the attempt (unchanged when rejected).
    pub fn new_balance(&self) -> Gp {
        match self {
            DeductOutcome::Debited { new_balance } => *new_balance,
            DeductOutcome::Rejected { balance, .. } => *balance,
        }
    }

    pub fn into_result(self) -> Result<Gp, LedgerError> {
        match self {
            DeductOutcome::Debited { new_balance } => Ok(new_balance),
            DeductOutcome::Rejected { reason, .. } => Err(reason),
        }
    }
}
