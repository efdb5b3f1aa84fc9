//! Settings resolution
//!
//! Decides which settings file is read and stacks the layers on top of it:
//! file, then environment, then command-line flags. Validation runs once,
//! after the last layer, so a bad `--base-url` is caught like a bad file.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{Result, config::Settings};

/// Environment variable naming the settings file
pub const CONFIG_ENV: &str = "CWEB_CONFIG";

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Report 400 and 403 with the generic banner
    pub generic_errors_only: bool,
    pub verbose: bool,
}

impl Overrides {
    fn apply(&self, settings: &mut Settings) {
        if let Some(base_url) = &self.base_url {
            settings.client.base_url = base_url.clone();
        }
        if let Some(token) = &self.token {
            settings.client.token = Some(token.clone());
        }
        if let Some(host) = &self.host {
            settings.server.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if self.generic_errors_only {
            settings.client.recognized_errors.clear();
        }
        settings.logging.verbose |= self.verbose;
    }
}

/// Settings source for one run of the binary
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
}

impl ConfigLoader {
    /// Read `explicit` if given, otherwise whatever [`ConfigLoader::discover`] finds
    pub fn new(explicit: Option<&str>) -> Self {
        let file = match explicit {
            Some(path) => Some(PathBuf::from(path)),
            None => Self::discover(),
        };
        Self { file }
    }

    /// `$CWEB_CONFIG` when it names a file, else `<config dir>/cweb-config/config.toml`
    /// when that exists
    pub fn discover() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
            if path.is_file() {
                return Some(path);
            }
            warn!(path = %path.display(), "{} names no file, ignoring it", CONFIG_ENV);
        }

        dirs::config_dir()
            .map(|dir| dir.join("cweb-config").join("config.toml"))
            .filter(|path| path.is_file())
    }

    /// Settings file this loader reads, if any
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Stack file, environment and `overrides`, then validate the result
    ///
    /// A named file that does not exist is skipped with a warning.
    pub fn load(&self, overrides: &Overrides) -> Result<Settings> {
        let mut settings = match self.file() {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "Reading settings file");
                Settings::from_file(path)?
            }
            Some(path) => {
                warn!(path = %path.display(), "Settings file missing, starting from defaults");
                Settings::default()
            }
            None => Settings::default(),
        };

        settings = settings.merge_with_env()?;
        overrides.apply(&mut settings);
        settings.validate()?;

        debug!(?settings, "Settings resolved");
        Ok(settings)
    }

    /// Defaults with `overrides` applied, unvalidated
    pub fn fallback(overrides: &Overrides) -> Settings {
        let mut settings = Settings::default();
        overrides.apply(&mut settings);
        settings
    }
}
