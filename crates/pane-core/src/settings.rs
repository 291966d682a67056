//! Settings store shared by every pane
//!
//! The store is created once by the application and handed to each pane. A
//! change is announced through [`SettingsStore::changes`] so panes can
//! re-apply just the key that changed.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{AppSettings, Profile, SettingsFile};
use crate::constants::{SETTINGS_DIR, SETTINGS_FILE};
use crate::delegate::{Delegate, SubscriptionId};
use crate::error::{PaneError, PaneResult};
use crate::preferences::PreferenceKey;

/// One setting changed. `profile` is `None` for application-wide settings.
#[derive(Clone, Debug, PartialEq)]
pub struct SettingsChange {
    pub profile: Option<Uuid>,
    pub key: PreferenceKey,
}

pub struct SettingsStore {
    app: RefCell<AppSettings>,
    profiles: RefCell<Vec<Profile>>,
    changes: Delegate<SettingsChange>,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(AppSettings::default(), vec![Profile::default()])
    }
}

impl SettingsStore {
    /// Build a store; an empty profile list gets a default profile.
    pub fn new(app: AppSettings, mut profiles: Vec<Profile>) -> Self {
        if profiles.is_empty() {
            profiles.push(Profile::default());
        }
        Self {
            app: RefCell::new(app),
            profiles: RefCell::new(profiles),
            changes: Delegate::new(),
        }
    }

    /// `$XDG_CONFIG_HOME/hugopane/settings.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    pub fn from_toml(text: &str) -> PaneResult<Self> {
        let file: SettingsFile = toml::from_str(text)?;
        Ok(Self::new(file.app, file.profiles))
    }

    /// Load settings from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> PaneResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let store = Self::from_toml(&text)?;
                info!("Loaded {} profile(s) from {}", store.profiles.borrow().len(), path.display());
                Ok(store)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(PaneError::from(e)),
        }
    }

    pub fn to_toml(&self) -> PaneResult<String> {
        let file = SettingsFile {
            app: self.app.borrow().clone(),
            profiles: self.profiles.borrow().clone(),
        };
        Ok(toml::to_string_pretty(&file)?)
    }

    pub fn save(&self, path: &Path) -> PaneResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn app(&self) -> AppSettings {
        self.app.borrow().clone()
    }

    pub fn profile(&self, id: &Uuid) -> Option<Profile> {
        self.profiles.borrow().iter().find(|p| p.id == *id).cloned()
    }

    pub fn profile_by_name(&self, name: &str) -> Option<Profile> {
        self.profiles.borrow().iter().find(|p| p.visible_name == name).cloned()
    }

    pub fn profiles(&self) -> Vec<Profile> {
        self.profiles.borrow().clone()
    }

    /// Profile new panes start with
    pub fn default_profile(&self) -> Profile {
        let profiles = self.profiles.borrow();
        self.app
            .borrow()
            .default_profile
            .and_then(|id| profiles.iter().find(|p| p.id == id))
            .or_else(|| profiles.first())
            .cloned()
            .unwrap_or_default()
    }

    pub fn add_profile(&self, profile: Profile) -> Uuid {
        let id = profile.id;
        self.profiles.borrow_mut().push(profile);
        id
    }

    /// Mutate a profile, then announce `key` as changed.
    pub fn update_profile<F>(&self, id: &Uuid, key: PreferenceKey, f: F) -> PaneResult<()>
    where
        F: FnOnce(&mut Profile),
    {
        {
            let mut profiles = self.profiles.borrow_mut();
            let profile = profiles
                .iter_mut()
                .find(|p| p.id == *id)
                .ok_or(PaneError::UnknownProfile(*id))?;
            f(profile);
        }
        debug!("Profile {} changed: {:?}", id, key);
        self.changes.emit(&SettingsChange { profile: Some(*id), key });
        Ok(())
    }

    pub fn update_app<F>(&self, key: PreferenceKey, f: F)
    where
        F: FnOnce(&mut AppSettings),
    {
        f(&mut self.app.borrow_mut());
        self.changes.emit(&SettingsChange { profile: None, key });
    }

    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&SettingsChange) + 'static,
    {
        self.changes.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.changes.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.changes.len()
    }
}
