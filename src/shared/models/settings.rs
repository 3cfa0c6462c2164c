use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

const SETTINGS_FILENAME: &str = "settings.json";
const PORT_ENV: &str = "PORT";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tcp_socket_binding: String,
    pub tcp_socket_port: u16,
    /// Backing file holding the whole task collection.
    pub data_file: PathBuf,
    /// Built client assets, served for any path the API doesn't claim.
    pub static_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tcp_socket_binding: "0.0.0.0".to_string(),
            tcp_socket_port: 5000,
            data_file: PathBuf::from("tasks.json"),
            static_dir: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Settings {
    /// `settings.json` from the working directory, else the copy the build
    /// script drops next to the binary, else defaults. `PORT` wins over
    /// the file.
    pub fn load() -> Result<Settings, SettingsError> {
        let mut settings = match Self::locate() {
            Some(path) => Self::load_from(&path)?,
            None => {
                tracing::info!("no {SETTINGS_FILENAME} found, using defaults");
                Settings::default()
            }
        };
        settings.apply_port_override(env::var(PORT_ENV).ok().as_deref());
        Ok(settings)
    }

    pub fn load_from(path: &Path) -> Result<Settings, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn apply_port_override(&mut self, port: Option<&str>) {
        let Some(raw) = port else { return };
        match raw.trim().parse::<u16>() {
            Ok(port) => self.tcp_socket_port = port,
            Err(_) => tracing::warn!(value = raw, "ignoring unparsable {PORT_ENV}"),
        }
    }

    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.tcp_socket_binding, self.tcp_socket_port)
    }

    fn locate() -> Option<PathBuf> {
        let local = PathBuf::from(SETTINGS_FILENAME);
        if local.is_file() {
            return Some(local);
        }
        let beside_exe = env::current_exe().ok()?.parent()?.join(SETTINGS_FILENAME);
        beside_exe.is_file().then_some(beside_exe)
    }
}
