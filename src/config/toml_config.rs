use crate::adapters::spotify::DEFAULT_API_BASE_URL;
use crate::core::assembler::DEFAULT_DESCRIPTION;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{self, Validate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ACCOUNTS_BASE_URL: &str = "https://accounts.spotify.com";
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8888/callback";
pub const DEFAULT_TOKEN_PATH: &str = "~/.config/tubelist/token.json";
pub const DEFAULT_PLAYLIST_NAME: &str = "YouTube Playlist";

static ENV_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub catalog: CatalogConfig,
    pub auth: AuthConfig,
    pub playlist: PlaylistConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub api_base_url: String,
    pub timeout_seconds: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub accounts_base_url: String,
    pub client_id: Option<String>,
    pub redirect_uri: String,
    pub token_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            accounts_base_url: DEFAULT_ACCOUNTS_BASE_URL.to_string(),
            client_id: None,
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            token_path: DEFAULT_TOKEN_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistConfig {
    pub default_name: String,
    pub description: String,
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            default_name: DEFAULT_PLAYLIST_NAME.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SPOTIFY_CLIENT_ID})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// `login` needs a client id on top of the general checks.
    pub fn validate_for_login(&self) -> Result<&str> {
        self.validate()?;
        let client_id =
            validation::validate_required_field("auth.client_id", &self.auth.client_id)?;
        if ENV_PLACEHOLDER.is_match(client_id) {
            return Err(AppError::MissingConfigError {
                field: format!("auth.client_id (unset variable {})", client_id),
            });
        }
        validation::validate_url("auth.redirect_uri", &self.auth.redirect_uri)?;
        Ok(client_id)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("catalog.api_base_url", &self.catalog.api_base_url)?;
        validation::validate_url("auth.accounts_base_url", &self.auth.accounts_base_url)?;
        validation::validate_range("catalog.timeout_seconds", self.catalog.timeout_seconds, 1, 300)?;
        validation::validate_non_empty_string("auth.token_path", &self.auth.token_path)?;
        validation::validate_non_empty_string("playlist.default_name", &self.playlist.default_name)?;
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn api_base_url(&self) -> &str {
        &self.catalog.api_base_url
    }

    fn accounts_base_url(&self) -> &str {
        &self.auth.accounts_base_url
    }

    fn client_id(&self) -> Option<&str> {
        self.auth.client_id.as_deref()
    }

    fn redirect_uri(&self) -> &str {
        &self.auth.redirect_uri
    }

    fn token_path(&self) -> &str {
        &self.auth.token_path
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.catalog.timeout_seconds
    }

    fn default_playlist_name(&self) -> &str {
        &self.playlist.default_name
    }

    fn playlist_description(&self) -> &str {
        &self.playlist.description
    }
}
