/// Server configuration
use crate::error::{Result, ServerError};
use config::{builder::DefaultState, ConfigBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix of environment overrides, e.g. `TINGTING__SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "TINGTING";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_library")]
    pub library: LibrarySettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Static web UI served for non-API paths
    #[serde(default)]
    pub web_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibrarySettings {
    #[serde(default = "default_music_dir")]
    pub music_dir: PathBuf,

    #[serde(default = "default_true")]
    pub scan_on_startup: bool,

    /// Reuse albums with the same title and artist during scans
    #[serde(default = "default_true")]
    pub dedupe_albums: bool,

    /// Image served for tracks without album art; a built-in SVG otherwise
    #[serde(default)]
    pub default_cover: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist. Without one, `./config.toml` is read if
    /// present. `TINGTING__SECTION__KEY` variables override both.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()).required(true));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        Self::build(settings)
    }

    fn build(settings: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ServerError::Config("server.port must not be 0".to_string()));
        }

        if self.library.music_dir.as_os_str().is_empty() {
            return Err(ServerError::Config(
                "library.music_dir is required (set TINGTING__LIBRARY__MUSIC_DIR)".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
        web_dir: None,
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    18003
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./music.db".to_string()
}

fn default_library() -> LibrarySettings {
    LibrarySettings {
        music_dir: default_music_dir(),
        scan_on_startup: true,
        dedupe_albums: true,
        default_cover: None,
    }
}

fn default_music_dir() -> PathBuf {
    PathBuf::from("./musics")
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            library: default_library(),
        }
    }
}
