//! Service endpoints and credentials, resolved once at startup.

use thiserror::Error;
use tracing::Level;

pub const DEFAULT_CATALOG_URL: &str = "https://api.themoviedb.org/3";
const DEFAULT_LANGUAGE: &str = "en-US";
const DEFAULT_WATCH_REGION: &str = "US";
const DEFAULT_QUALITY_PROFILE_ID: u32 = 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub language: String,
    pub watch_region: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CATALOG_URL.to_string(),
            api_key: None,
            language: DEFAULT_LANGUAGE.to_string(),
            watch_region: DEFAULT_WATCH_REGION.to_string(),
        }
    }
}

/// One Radarr/Sonarr style service. `url` and `api_key` stay optional here;
/// the client reports them missing when an operation needs them.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryConfig {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub quality_profile_id: u32,
    pub root_folder: Option<String>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            quality_profile_id: DEFAULT_QUALITY_PROFILE_ID,
            root_folder: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub movie_library: LibraryConfig,
    pub show_library: LibraryConfig,
    pub log_level: Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            movie_library: LibraryConfig::default(),
            show_library: LibraryConfig::default(),
            log_level: Level::INFO,
        }
    }
}

impl AppConfig {
    /// Reads the process environment, falling back to values baked in at
    /// build time. Browser builds only ever see the baked values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok().or_else(|| baked_value(key)))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let url = |key: &str| get(key).map(|value| value.trim_end_matches('/').to_string());

        let catalog = CatalogConfig {
            base_url: url("TMDB_BASE_URL").unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string()),
            api_key: get("TMDB_API_KEY"),
            language: get("TMDB_LANGUAGE").unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            watch_region: get("TMDB_WATCH_REGION")
                .unwrap_or_else(|| DEFAULT_WATCH_REGION.to_string()),
        };

        let movie_library = LibraryConfig {
            url: url("RADARR_URL"),
            api_key: get("RADARR_API_KEY"),
            quality_profile_id: parse_profile_id(
                "RADARR_QUALITY_PROFILE_ID",
                get("RADARR_QUALITY_PROFILE_ID"),
            )?,
            root_folder: get("RADARR_ROOT_FOLDER"),
        };

        let show_library = LibraryConfig {
            url: url("SONARR_URL"),
            api_key: get("SONARR_API_KEY"),
            quality_profile_id: parse_profile_id(
                "SONARR_QUALITY_PROFILE_ID",
                get("SONARR_QUALITY_PROFILE_ID"),
            )?,
            root_folder: get("SONARR_ROOT_FOLDER"),
        };

        let log_level = match get("SCOUTARR_LOG") {
            Some(value) => value.parse::<Level>().map_err(|_| ConfigError::Invalid {
                key: "SCOUTARR_LOG",
                value,
            })?,
            None => Level::INFO,
        };

        Ok(Self {
            catalog,
            movie_library,
            show_library,
            log_level,
        })
    }
}

fn parse_profile_id(key: &'static str, value: Option<String>) -> Result<u32, ConfigError> {
    match value {
        Some(value) => value
            .parse::<u32>()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(DEFAULT_QUALITY_PROFILE_ID),
    }
}

fn baked_value(key: &str) -> Option<String> {
    let value = match key {
        "TMDB_API_KEY" => option_env!("TMDB_API_KEY"),
        "TMDB_BASE_URL" => option_env!("TMDB_BASE_URL"),
        "TMDB_LANGUAGE" => option_env!("TMDB_LANGUAGE"),
        "TMDB_WATCH_REGION" => option_env!("TMDB_WATCH_REGION"),
        "RADARR_URL" => option_env!("RADARR_URL"),
        "RADARR_API_KEY" => option_env!("RADARR_API_KEY"),
        "RADARR_QUALITY_PROFILE_ID" => option_env!("RADARR_QUALITY_PROFILE_ID"),
        "RADARR_ROOT_FOLDER" => option_env!("RADARR_ROOT_FOLDER"),
        "SONARR_URL" => option_env!("SONARR_URL"),
        "SONARR_API_KEY" => option_env!("SONARR_API_KEY"),
        "SONARR_QUALITY_PROFILE_ID" => option_env!("SONARR_QUALITY_PROFILE_ID"),
        "SONARR_ROOT_FOLDER" => option_env!("SONARR_ROOT_FOLDER"),
        "SCOUTARR_LOG" => option_env!("SCOUTARR_LOG"),
        _ => None,
    };
    value.map(str::to_string)
}
