//! Persisted user preferences.
//!
//! Stored as JSON in the user config directory. The file is forgiving on
//! the way in (missing keys take defaults, unknown keys are ignored, a
//! broken file is replaced by defaults) and strict on the way out.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::layout::{LayoutOptions, PrintLayout, ScaleMode};
use crate::ticket::{PaperSource, PrintTicket, Quality};

const APP_DIR: &str = "photoprint";
const FILE_NAME: &str = "settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    /// The platform reports no per-user config directory.
    #[error("no user configuration directory available")]
    NoConfigDir,

    #[error("writing settings to {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Encode(#[from] serde_json::Error),
}

/// Everything the tool remembers between runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Last printer used; empty = system default.
    pub printer_name: String,
    pub last_scale_mode: ScaleMode,
    /// Keep the sheet portrait and turn landscape photos instead.
    pub forced_portrait: bool,
    pub paper_source: PaperSource,
    pub borderless: bool,
    pub quality: Quality,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            printer_name: String::new(),
            last_scale_mode: ScaleMode::Fill,
            forced_portrait: false,
            paper_source: PaperSource::Auto,
            borderless: true,
            quality: Quality::High,
        }
    }
}

impl Settings {
    /// Engine input derived from these preferences.
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions::new(self.last_scale_mode).forced_portrait(self.forced_portrait)
    }

    /// Ticket for `layout` carrying the printer-side preferences.
    pub fn print_ticket(&self, layout: &PrintLayout) -> PrintTicket {
        PrintTicket::new(layout)
            .printer(&self.printer_name)
            .borderless(self.borderless)
            .paper_source(self.paper_source)
            .quality(self.quality)
    }
}

/// A settings file on disk.
#[derive(Clone, Debug)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/photoprint/settings.json`.
    pub fn default_location() -> Result<Self, SettingsError> {
        let dir = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        Ok(Self::new(dir.join(APP_DIR).join(FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the settings, falling back to defaults.
    ///
    /// A missing file is normal on first run. An unreadable or malformed
    /// file is logged and ignored so a bad file never blocks printing.
    pub fn load(&self) -> Settings {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no settings file, using defaults");
                return Settings::default();
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "could not read settings");
                return Settings::default();
            }
        };
        match serde_json::from_str(&text) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "could not parse settings");
                Settings::default()
            }
        }
    }

    /// Write the settings, creating the directory if needed.
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(settings)?;
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|source| SettingsError::Write {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, json).map_err(|source| SettingsError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "saved settings");
        Ok(())
    }

    /// Load, change, and save in one step.
    pub fn update(&self, change: impl FnOnce(&mut Settings)) -> Result<Settings, SettingsError> {
        let mut settings = self.load();
        change(&mut settings);
        self.save(&settings)?;
        Ok(settings)
    }
}
