use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Environment variable overriding `api.base-url`
pub const API_BASE_URL_ENV: &str = "PULSE_API_BASE_URL";

/// Environment variable overriding `media.base-url`
pub const MEDIA_BASE_URL_ENV: &str = "PULSE_MEDIA_BASE_URL";

/// Loads configuration from an optional TOML file plus the process environment
///
/// A `.env` file in the working directory is honoured. Without a path the
/// built-in defaults are used as the starting point.
///
/// # Arguments
///
/// * `path` - Optional path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => Config::default(),
    };

    // A missing .env is the common case
    if let Ok(env_path) = dotenvy::dotenv() {
        tracing::debug!("Loaded environment from {}", env_path.display());
    }
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    validate(&config)?;

    Ok(config)
}

/// Applies deployment-time URL overrides
///
/// `lookup` resolves an environment variable name to its value. Empty values
/// are ignored.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(API_BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
        tracing::debug!("{} overrides api.base-url", API_BASE_URL_ENV);
        config.api.base_url = url.trim().to_string();
    }
    if let Some(url) = lookup(MEDIA_BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
        tracing::debug!("{} overrides media.base-url", MEDIA_BASE_URL_ENV);
        config.media.base_url = url.trim().to_string();
    }
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so a session can be tied to the exact file it ran with.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and the file hash
///
/// The hash is `None` when running on defaults.
pub fn load_config_with_hash(path: Option<&Path>) -> Result<(Config, Option<String>), ConfigError> {
    let config = load_config(path)?;
    let hash = path.map(compute_config_hash).transpose()?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FallbackPolicy;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn parse(content: &str) -> Config {
        toml::from_str(content).unwrap()
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse(
            r#"
[api]
base-url = "https://api.example.com/api/v1"
request-timeout-secs = 20
connect-timeout-secs = 3

[media]
base-url = "https://cdn.example.com"
strip-prefix = "downloads/"

[browse]
prefetch-distance = 5
crawl-settle-ms = 1500
max-collect-count = 50
fallback = "cached"

[user-agent]
client-name = "PulseTest"
client-version = "9.9"
"#,
        );

        assert_eq!(config.api.base_url, "https://api.example.com/api/v1");
        assert_eq!(config.api.request_timeout_secs, 20);
        assert_eq!(config.media.strip_prefix, "downloads/");
        assert_eq!(config.browse.prefetch_distance, 5);
        assert_eq!(config.browse.max_collect_count, 50);
        assert_eq!(config.browse.fallback, FallbackPolicy::Cached);
        assert_eq!(config.user_agent.client_name, "PulseTest");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = parse(
            r#"
[browse]
fallback = "none"
"#,
        );

        assert_eq!(config.api.base_url, "http://localhost:3001/api/v1");
        assert_eq!(config.browse.crawl_settle_ms, 3000);
        assert_eq!(config.browse.fallback, FallbackPolicy::None);
    }

    #[test]
    fn test_unknown_fallback_policy_is_rejected() {
        let result: Result<Config, _> = toml::from_str("[browse]\nfallback = \"magic\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let file = create_temp_config("[api]\nbase-url = \"https://api.example.com\"\n");
        let config = load_config(Some(file.path())).unwrap();
        assert!(config.api.base_url.starts_with("https://api.example.com"));
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Some(Path::new("/nonexistent/pulse.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        apply_env_overrides(&mut config, |key| match key {
            API_BASE_URL_ENV => Some(" https://prod.example.com/api/v1 ".to_string()),
            MEDIA_BASE_URL_ENV => Some(String::new()),
            _ => None,
        });

        assert_eq!(config.api.base_url, "https://prod.example.com/api/v1");
        // empty override leaves the default alone
        assert_eq!(config.media.base_url, "http://localhost:3001");
    }

    #[test]
    fn test_compute_config_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let again = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_eq!(hash1, again);
        assert_eq!(hash1.len(), 64);
        assert_ne!(hash1, hash2);
    }
}
