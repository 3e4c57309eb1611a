//! Light/dark theme preference
//!
//! The only durable client state: a single word stored in a file under the
//! user's config directory.

use crate::client::error::ClientError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Anything other than `light` falls back to the dark default
    pub fn parse_stored(value: &str) -> Self {
        if value.trim() == "light" {
            Theme::Light
        } else {
            Theme::Dark
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/humanizer/theme`
    pub fn default_location() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join("humanizer").join("theme")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored theme, dark when nothing usable is stored
    pub fn load(&self) -> Theme {
        fs::read_to_string(&self.path)
            .map(|s| Theme::parse_stored(&s))
            .unwrap_or_default()
    }

    pub fn save(&self, theme: Theme) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ClientError::Theme(e.to_string()))?;
        }
        fs::write(&self.path, theme.as_str()).map_err(|e| ClientError::Theme(e.to_string()))
    }

    /// Flip the stored theme and persist it
    pub fn toggle(&self) -> Result<Theme, ClientError> {
        let next = self.load().toggled();
        self.save(next)?;
        Ok(next)
    }
}
