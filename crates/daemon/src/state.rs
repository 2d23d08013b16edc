use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::ai::AiConfig;
use crate::auth::TokenService;

pub const APP_NAME: &str = "quillmind";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DB_FILE_NAME: &str = "db.sqlite";
pub const TOKEN_KEY_FILE_NAME: &str = "token.key";
pub const SESSION_FILE_NAME: &str = "session.token";
pub const AI_API_KEY_ENV: &str = "QUILLMIND_AI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Port for the API server
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// Browser origin allowed to call the API
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
    /// Lifetime of issued access tokens
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
    #[serde(default)]
    pub ai: AiConfig,
}

fn default_api_port() -> u16 {
    5001
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_token_ttl_secs() -> u64 {
    60 * 60
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_port: default_api_port(),
            cors_origin: default_cors_origin(),
            token_ttl_secs: default_token_ttl_secs(),
            ai: AiConfig::default(),
        }
    }
}

impl AppConfig {
    /// A non-empty key from the environment wins over the file.
    pub fn with_ai_api_key(mut self, env_key: Option<String>) -> Self {
        if let Some(key) = env_key.filter(|key| !key.trim().is_empty()) {
            self.ai.api_key = Some(key);
        }
        self
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the config directory (~/.quillmind)
    pub config_dir: PathBuf,
    /// Path to the SQLite database
    pub db_path: PathBuf,
    /// Path to the hex-encoded token signing secret
    pub token_key_path: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the config directory path (custom or default ~/.quillmind)
    pub fn config_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new config directory
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let config_dir = Self::config_dir(custom_path)?;

        if config_dir.join(CONFIG_FILE_NAME).exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&config_dir)?;

        let secret = TokenService::generate_secret()
            .map_err(|e| StateError::InvalidKey(e.to_string()))?;
        let token_key_path = config_dir.join(TOKEN_KEY_FILE_NAME);
        fs::write(&token_key_path, hex::encode(secret))?;

        let config = config.unwrap_or_default();
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        // the daemon creates the schema on first start
        let db_path = config_dir.join(DB_FILE_NAME);
        fs::write(&db_path, "")?;

        Ok(Self {
            config_dir,
            db_path,
            token_key_path,
            config_path,
            config,
        })
    }

    /// Load existing state from the config directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let config_dir = Self::config_dir(custom_path)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Err(StateError::NotInitialized);
        }

        let db_path = config_dir.join(DB_FILE_NAME);
        let token_key_path = config_dir.join(TOKEN_KEY_FILE_NAME);

        if !db_path.exists() {
            return Err(StateError::MissingFile(DB_FILE_NAME.to_string()));
        }
        if !token_key_path.exists() {
            return Err(StateError::MissingFile(TOKEN_KEY_FILE_NAME.to_string()));
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        Ok(Self {
            config_dir,
            db_path,
            token_key_path,
            config_path,
            config,
        })
    }

    /// Load the token signing secret
    pub fn load_token_secret(&self) -> Result<Vec<u8>, StateError> {
        let encoded = fs::read_to_string(&self.token_key_path)?;
        let secret =
            hex::decode(encoded.trim()).map_err(|e| StateError::InvalidKey(e.to_string()))?;
        if secret.is_empty() {
            return Err(StateError::InvalidKey("token key is empty".to_string()));
        }
        Ok(secret)
    }

    /// Path of the stored client session token.
    ///
    /// Clients may talk to a remote daemon, so this does not require the
    /// directory to be initialized.
    pub fn session_path(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        Ok(Self::config_dir(custom_path)?.join(SESSION_FILE_NAME))
    }

    pub fn read_session_token(custom_path: Option<PathBuf>) -> Result<Option<String>, StateError> {
        let path = Self::session_path(custom_path)?;
        if !path.exists() {
            return Ok(None);
        }
        let token = fs::read_to_string(path)?;
        let token = token.trim();
        Ok((!token.is_empty()).then(|| token.to_string()))
    }

    pub fn write_session_token(custom_path: Option<PathBuf>, token: &str) -> Result<(), StateError> {
        let path = Self::session_path(custom_path)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, token)?;
        Ok(())
    }

    /// Returns whether a session was stored.
    pub fn clear_session_token(custom_path: Option<PathBuf>) -> Result<bool, StateError> {
        let path = Self::session_path(custom_path)?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("config directory not initialized. Run 'quill init' first")]
    NotInitialized,

    #[error("config directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("invalid token key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = Some(dir.path().join("qm"));

        let state = AppState::init(path.clone(), None).unwrap();
        assert_eq!(state.config.api_port, 5001);
        assert!(state.db_path.exists());

        let loaded = AppState::load(path.clone()).unwrap();
        assert_eq!(loaded.config.cors_origin, "http://localhost:3000");
        assert_eq!(loaded.load_token_secret().unwrap().len(), 32);

        assert!(matches!(
            AppState::init(path, None),
            Err(StateError::AlreadyInitialized)
        ));
    }

    #[test]
    fn test_load_uninitialized() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            AppState::load(Some(dir.path().join("missing"))),
            Err(StateError::NotInitialized)
        ));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = toml::from_str("api_port = 6000\n[ai]\nmodel = \"m\"\n").unwrap();
        assert_eq!(config.api_port, 6000);
        assert_eq!(config.token_ttl_secs, 3600);
        assert_eq!(config.ai.model, "m");
        assert_eq!(config.ai.timeout_secs, 30);
        assert!(config.ai.api_key.is_none());
    }

    #[test]
    fn test_env_key_overrides_file() {
        let mut config = AppConfig::default();
        config.ai.api_key = Some("from-file".into());

        let config = config.with_ai_api_key(Some("".into()));
        assert_eq!(config.ai.api_key.as_deref(), Some("from-file"));

        let config = config.with_ai_api_key(Some("from-env".into()));
        assert_eq!(config.ai.api_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_session_token_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = Some(dir.path().to_path_buf());

        assert_eq!(AppState::read_session_token(path.clone()).unwrap(), None);
        AppState::write_session_token(path.clone(), "a.b.c").unwrap();
        assert_eq!(
            AppState::read_session_token(path.clone()).unwrap().as_deref(),
            Some("a.b.c")
        );
        assert!(AppState::clear_session_token(path.clone()).unwrap());
        assert!(!AppState::clear_session_token(path).unwrap());
    }
}
