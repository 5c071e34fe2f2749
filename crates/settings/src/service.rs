use std::sync::RwLock;

use seri_arcade_core::{AllowanceSource, Gp};
use seri_arcade_infra::KeyValueStore;

use crate::constants::{SETTINGS_STORAGE_KEY, is_known_avatar};
use crate::settings::{
    Settings, SettingsError, normalize_daily_gp, normalize_difficulty, normalize_nickname,
};

/// Holds the current settings and persists every change.
///
/// Each setter re-reads the stored document, changes one field and writes the
/// whole document back, so fields written by another handle on the same store
/// are preserved.
#[derive(Debug)]
pub struct SettingsService<S> {
    store: S,
    current: RwLock<Settings>,
}

impl<S> SettingsService<S>
where
    S: KeyValueStore,
{
    /// Create the service and load whatever is stored.
    pub fn new(store: S) -> Self {
        let current = read_settings(&store);
        Self {
            store,
            current: RwLock::new(current),
        }
    }

    /// Snapshot of the current settings.
    pub fn current(&self) -> Settings {
        match self.current.read() {
            Ok(current) => current.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Re-read settings from storage.
    pub fn reload(&self) -> Settings {
        let settings = read_settings(&self.store);
        self.publish(settings.clone());
        settings
    }

    pub fn set_nickname(&self, nickname: &str) -> Result<Settings, SettingsError> {
        self.update(|s| {
            s.nickname = normalize_nickname(nickname);
            Ok(())
        })
    }

    pub fn set_avatar(&self, avatar: &str) -> Result<Settings, SettingsError> {
        if !is_known_avatar(avatar) {
            return Err(SettingsError::UnknownAvatar(avatar.to_string()));
        }
        self.update(|s| {
            s.avatar = avatar.to_string();
            Ok(())
        })
    }

    pub fn set_difficulty(&self, difficulty: f64) -> Result<Settings, SettingsError> {
        self.update(|s| {
            s.difficulty = normalize_difficulty(difficulty);
            Ok(())
        })
    }

    /// Store a new daily allowance. Amounts outside the offered options fall
    /// back to the default allowance.
    pub fn set_daily_gp(&self, daily_gp: Gp) -> Result<Settings, SettingsError> {
        self.update(|s| {
            s.daily_gp = normalize_daily_gp(daily_gp);
            Ok(())
        })
    }

    fn update<F>(&self, change: F) -> Result<Settings, SettingsError>
    where
        F: FnOnce(&mut Settings) -> Result<(), SettingsError>,
    {
        let mut settings = read_settings(&self.store);
        change(&mut settings)?;
        self.store
            .set(SETTINGS_STORAGE_KEY, &settings.to_stored()?)?;
        tracing::debug!(?settings, "settings updated");
        self.publish(settings.clone());
        Ok(settings)
    }

    fn publish(&self, settings: Settings) {
        match self.current.write() {
            Ok(mut current) => *current = settings,
            Err(poisoned) => *poisoned.into_inner() = settings,
        }
    }
}

impl<S> AllowanceSource for SettingsService<S>
where
    S: KeyValueStore,
{
    fn daily_allowance(&self) -> Gp {
        self.current().daily_gp
    }
}

fn read_settings<S: KeyValueStore>(store: &S) -> Settings {
    match store.get(SETTINGS_STORAGE_KEY) {
        Ok(Some(raw)) => Settings::from_stored(&raw),
        Ok(None) => Settings::default(),
        Err(err) => {
            tracing::warn!(error = %err, "failed to read settings; using defaults");
            Settings::default()
        }
    }
}
