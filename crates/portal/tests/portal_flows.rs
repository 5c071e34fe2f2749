use std::sync::Arc;

use seri_arcade_core::{Gp, ManualClock, PeriodKey};
use seri_arcade_gp::{GP_STORAGE_KEY, LedgerError};
use seri_arcade_infra::{InMemoryKeyValueStore, KeyValueStore, PeriodPolicy, PortalConfig};
use seri_arcade_portal::{Portal, SharedStorage};
use seri_arcade_settings::{DEFAULT_DAILY_GP, SETTINGS_STORAGE_KEY};

fn in_memory() -> (SharedStorage, Arc<ManualClock>) {
    let storage: SharedStorage = Arc::new(InMemoryKeyValueStore::new());
    let clock = Arc::new(ManualClock::new(PeriodKey::new("2026-10-18")));
    (storage, clock)
}

#[test]
fn new_user_starts_with_the_default_allowance() {
    let (storage, clock) = in_memory();
    let portal = Portal::with_parts(storage, clock);

    assert!(portal.ledger().is_loaded());
    assert_eq!(portal.ledger().balance(), Ok(DEFAULT_DAILY_GP));
    assert_eq!(portal.ledger().daily_amount(), DEFAULT_DAILY_GP);
}

#[test]
fn sessions_are_paid_until_the_balance_runs_out() {
    let (storage, clock) = in_memory();
    let mut portal = Portal::with_parts(storage, clock);

    assert_eq!(portal.start_session(100), Ok(Gp::new(200)));
    assert_eq!(portal.start_session(150), Ok(Gp::new(50)));
    assert_eq!(
        portal.start_session(100),
        Err(LedgerError::InsufficientFunds {
            requested: Gp::new(100),
            available: Gp::new(50),
        })
    );
    assert_eq!(
        portal.start_session(-10),
        Err(LedgerError::InvalidAmount { amount: -10 })
    );
    assert_eq!(portal.ledger().balance(), Ok(Gp::new(50)));
}

#[test]
fn changing_daily_gp_resets_the_balance_immediately() {
    let (storage, clock) = in_memory();
    let mut portal = Portal::with_parts(storage.clone(), clock.clone());
    portal.start_session(250).unwrap();

    assert_eq!(portal.set_daily_gp(Gp::new(1000)).unwrap(), Gp::new(1000));
    assert_eq!(portal.ledger().balance(), Ok(Gp::new(1000)));
    assert!(storage.get(SETTINGS_STORAGE_KEY).unwrap().unwrap().contains("1000"));

    // A fresh process on the same day sees both the setting and the balance.
    let reopened = Portal::with_parts(storage, clock);
    assert_eq!(reopened.ledger().daily_amount(), Gp::new(1000));
    assert_eq!(reopened.ledger().balance(), Ok(Gp::new(1000)));
}

#[test]
fn the_next_day_grants_the_configured_allowance_again() {
    let (storage, clock) = in_memory();
    let mut portal = Portal::with_parts(storage, clock.clone());
    portal.set_daily_gp(Gp::new(500)).unwrap();
    portal.start_session(500).unwrap();
    assert!(!portal.ledger().can_afford(1));

    clock.set(PeriodKey::new("2026-10-19"));
    assert_eq!(portal.ledger_mut().initialize(), Gp::new(500));
    assert_eq!(portal.start_session(200), Ok(Gp::new(300)));
}

#[test]
fn bootstrap_persists_to_the_configured_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config = PortalConfig::new(dir.path().join("data")).with_period(PeriodPolicy::UtcDay);

    let mut portal = Portal::bootstrap(&config).unwrap();
    assert_eq!(portal.start_session(120), Ok(Gp::new(180)));
    drop(portal);

    assert!(dir.path().join("data").join("seri-arcade-gp.json").exists());
    let reopened = Portal::bootstrap(&config).unwrap();
    assert_eq!(reopened.ledger().balance(), Ok(Gp::new(180)));
}

#[test]
fn a_returning_user_keeps_settings_and_gets_a_fresh_day() {
    let storage: SharedStorage = Arc::new(InMemoryKeyValueStore::with_entries([
        (SETTINGS_STORAGE_KEY, r#"{"nickname":"Ada","dailyGp":"lots"}"#),
        (GP_STORAGE_KEY, r#"{"balance":5,"periodKey":"2026-10-17"}"#),
    ]));
    let clock = Arc::new(ManualClock::new(PeriodKey::new("2026-10-18")));

    let portal = Portal::with_parts(storage, clock);
    assert_eq!(portal.settings().current().nickname, "Ada");
    assert_eq!(portal.ledger().balance(), Ok(DEFAULT_DAILY_GP));
}
