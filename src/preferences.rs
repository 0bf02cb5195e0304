//! UI preferences persisted next to the ledger data.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    errors::{LedgerError, Result},
    storage::{self, KeyValueStore, THEME_KEY},
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(LedgerError::validation(format!(
                "unknown theme `{other}` (expected dark or light)"
            ))),
        }
    }
}

/// Reads and writes the theme key of a [`KeyValueStore`].
pub struct Preferences;

impl Preferences {
    /// Stored theme; anything missing or unrecognized reads as [`Theme::Light`].
    pub fn theme(store: &dyn KeyValueStore) -> Result<Theme> {
        match storage::load_json::<Theme>(store, THEME_KEY) {
            Ok(theme) => Ok(theme.unwrap_or_default()),
            Err(LedgerError::Serde(message)) => {
                tracing::warn!(%message, "ignoring unreadable theme preference");
                Ok(Theme::default())
            }
            Err(err) => Err(err),
        }
    }

    pub fn set_theme(store: &mut dyn KeyValueStore, theme: Theme) -> Result<()> {
        storage::save_json(store, THEME_KEY, &theme)?;
        tracing::debug!(%theme, "theme saved");
        Ok(())
    }

    /// Flips the stored theme and returns the new value.
    pub fn toggle_theme(store: &mut dyn KeyValueStore) -> Result<Theme> {
        let next = Self::theme(store)?.toggled();
        Self::set_theme(store, next)?;
        Ok(next)
    }
}
