use std::sync::Arc;

use anyhow::Context;
use thiserror::Error;

use seri_arcade_core::{Gp, PeriodClock};
use seri_arcade_gp::{GpStore, LedgerError};
use seri_arcade_infra::{FileKeyValueStore, KeyValueStore, LogFormat, PortalConfig};
use seri_arcade_settings::{SettingsError, SettingsService};

pub type SharedStorage = Arc<dyn KeyValueStore>;
pub type SharedClock = Arc<dyn PeriodClock>;
pub type SharedSettings = Arc<SettingsService<SharedStorage>>;
pub type PortalLedger = GpStore<SharedStorage, SharedClock, SharedSettings>;

#[derive(Debug, Error)]
pub enum PortalError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Application context: settings plus an initialized GP ledger sharing one
/// storage backend.
pub struct Portal {
    settings: SharedSettings,
    ledger: PortalLedger,
}

impl Portal {
    /// Build the portal from configuration: logging, file storage, clock.
    pub fn bootstrap(config: &PortalConfig) -> anyhow::Result<Self> {
        match config.log_format {
            LogFormat::Json => seri_arcade_observability::init(),
            LogFormat::Pretty => seri_arcade_observability::init_pretty(),
        }

        let storage = FileKeyValueStore::open(&config.data_dir).with_context(|| {
            format!("failed to open portal storage at {:?}", config.data_dir)
        })?;
        tracing::info!(
            data_dir = %config.data_dir.display(),
            period = ?config.period,
            "portal storage ready"
        );

        Ok(Self::with_parts(Arc::new(storage), config.period.clock()))
    }

    /// [`Portal::bootstrap`] with configuration read from the environment.
    pub fn bootstrap_from_env() -> anyhow::Result<Self> {
        let config = PortalConfig::from_env().context("failed to load portal configuration")?;
        Self::bootstrap(&config)
    }

    /// Wire the portal over explicit parts and initialize the ledger.
    pub fn with_parts(storage: SharedStorage, clock: SharedClock) -> Self {
        let settings = Arc::new(SettingsService::new(storage.clone()));
        let mut ledger = GpStore::new(storage, clock, settings.clone());
        ledger.initialize();
        Self { settings, ledger }
    }

    pub fn settings(&self) -> &SettingsService<SharedStorage> {
        &self.settings
    }

    pub fn ledger(&self) -> &PortalLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut PortalLedger {
        &mut self.ledger
    }

    /// Pay for a play session. Returns the remaining balance.
    pub fn start_session(&mut self, cost: i64) -> Result<Gp, LedgerError> {
        if !self.ledger.can_afford(cost) {
            let available = self.ledger.balance()?;
            let requested = Gp::try_from_signed(cost)
                .map_err(|_| LedgerError::InvalidAmount { amount: cost })?;
            tracing::info!(
                cost,
                available = available.value(),
                "not enough GP to start a session"
            );
            return Err(LedgerError::InsufficientFunds {
                requested,
                available,
            });
        }

        let remaining = self.ledger.try_deduct(cost)?;
        tracing::info!(cost, remaining = remaining.value(), "play session started");
        Ok(remaining)
    }

    /// Change the daily allowance; the balance is reset to it immediately.
    pub fn set_daily_gp(&mut self, daily_gp: Gp) -> Result<Gp, PortalError> {
        let settings = self.settings.set_daily_gp(daily_gp)?;
        let balance = self.ledger.refresh_balance()?;
        tracing::info!(
            daily_gp = settings.daily_gp.value(),
            balance = balance.value(),
            "daily GP allowance changed"
        );
        Ok(balance)
    }
}

impl core::fmt::Debug for Portal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Portal")
            .field("settings", &self.settings.current())
            .field("gp", &self.ledger.snapshot())
            .finish()
    }
}
