//! The live GP balance.
//!
//! `GpStore` is the one object the rest of the portal uses to read and spend
//! GP. It starts uninitialized; [`GpStore::initialize`] loads the persisted
//! record and the store stays loaded from then on. Reading the balance before
//! that is an error, not a zero.
//!
//! The daily allowance is asked of the [`AllowanceSource`] on every operation
//! that may reset the balance, so a settings change is picked up without the
//! store caching it.

use tokio::sync::watch;

use seri_arcade_core::{AllowanceSource, Gp, PeriodClock};
use seri_arcade_infra::KeyValueStore;

use crate::engine::LedgerEngine;
use crate::error::{DeductOutcome, LedgerError};

/// What a balance display needs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GpSnapshot {
    /// `None` until the store is initialized.
    pub balance: Option<Gp>,
    pub daily_amount: Gp,
}

impl GpSnapshot {
    pub fn is_loaded(&self) -> bool {
        self.balance.is_some()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Status {
    Uninitialized,
    Loaded { balance: Gp },
}

#[derive(Debug)]
pub struct GpStore<S, C, A> {
    engine: LedgerEngine<S, C>,
    allowance: A,
    status: Status,
    updates: watch::Sender<GpSnapshot>,
}

impl<S, C, A> GpStore<S, C, A>
where
    S: KeyValueStore,
    C: PeriodClock,
    A: AllowanceSource,
{
    pub fn new(storage: S, clock: C, allowance: A) -> Self {
        let (updates, _) = watch::channel(GpSnapshot {
            balance: None,
            daily_amount: allowance.daily_allowance(),
        });
        Self {
            engine: LedgerEngine::new(storage, clock),
            allowance,
            status: Status::Uninitialized,
            updates,
        }
    }

    /// Load (and normalize) the persisted balance and mark the store loaded.
    ///
    /// Safe to call again: a balance that is still current is left as is.
    pub fn initialize(&mut self) -> Gp {
        let daily_amount = self.allowance.daily_allowance();
        let state = self.engine.load(daily_amount);
        tracing::info!(
            balance = state.balance.value(),
            period = %state.period_key,
            reset = state.was_reset,
            "GP ledger initialized"
        );
        self.publish(state.balance, daily_amount);
        state.balance
    }

    /// Spend `amount` GP; `false` means nothing was spent.
    pub fn deduct(&mut self, amount: i64) -> bool {
        self.try_deduct(amount).is_ok()
    }

    /// Spend `amount` GP, returning the remaining balance or why it was refused.
    pub fn try_deduct(&mut self, amount: i64) -> Result<Gp, LedgerError> {
        let Status::Loaded { balance: mirrored } = self.status else {
            tracing::warn!(amount, "GP debit attempted before initialize");
            return Err(LedgerError::NotLoaded);
        };

        let daily_amount = self.allowance.daily_allowance();
        match self.engine.deduct(amount, daily_amount) {
            DeductOutcome::Debited { new_balance } => {
                self.publish(new_balance, daily_amount);
                Ok(new_balance)
            }
            DeductOutcome::Rejected { balance, reason } => {
                // A rejected debit can still have crossed into a new period, in
                // which case the stored balance was reset underneath us.
                if balance != mirrored {
                    self.publish(balance, daily_amount);
                }
                Err(reason)
            }
        }
    }

    /// `balance >= amount`, from the in-memory balance only. Always `false`
    /// before initialize.
    pub fn can_afford(&self, amount: i64) -> bool {
        match self.status {
            Status::Loaded { balance } => i128::from(balance.value()) >= i128::from(amount),
            Status::Uninitialized => false,
        }
    }

    /// Reset the balance to the currently configured allowance, e.g. after the
    /// user changed it.
    pub fn refresh_balance(&mut self) -> Result<Gp, LedgerError> {
        if !self.is_loaded() {
            return Err(LedgerError::NotLoaded);
        }
        let daily_amount = self.allowance.daily_allowance();
        let state = self.engine.reset_with(daily_amount);
        self.publish(state.balance, daily_amount);
        Ok(state.balance)
    }

    pub fn balance(&self) -> Result<Gp, LedgerError> {
        match self.status {
            Status::Loaded { balance } => Ok(balance),
            Status::Uninitialized => Err(LedgerError::NotLoaded),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.status, Status::Loaded { .. })
    }

    /// The allowance as currently configured.
    pub fn daily_amount(&self) -> Gp {
        self.allowance.daily_allowance()
    }

    pub fn snapshot(&self) -> GpSnapshot {
        *self.updates.borrow()
    }

    /// Observe every published balance change.
    pub fn subscribe(&self) -> watch::Receiver<GpSnapshot> {
        self.updates.subscribe()
    }

    fn publish(&mut self, balance: Gp, daily_amount: Gp) {
        self.status = Status::Loaded { balance };
        self.updates.send_replace(GpSnapshot {
            balance: Some(balance),
            daily_amount,
        });
    }
}
