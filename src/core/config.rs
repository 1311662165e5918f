use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;

/// Credentials for one target server: the API base URL and the shared
/// secret used to checksum every request. Bound at construction and never
/// mutated.
#[derive(Debug, Clone)]
pub struct BbbConfig {
    pub base_url: String,
    pub shared_secret: Secret<String>,
}

// Custom Serialize implementation - never expose the secret in serialization
impl Serialize for BbbConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("BbbConfig", 2)?;
        state.serialize_field("base_url", &self.base_url)?;
        state.serialize_field("shared_secret", "[REDACTED]")?;
        state.end()
    }
}

// Custom Deserialize implementation
impl<'de> Deserialize<'de> for BbbConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct BbbConfigHelper {
            base_url: String,
            shared_secret: String,
        }

        let helper = BbbConfigHelper::deserialize(deserializer)?;
        Ok(Self {
            base_url: helper.base_url,
            shared_secret: Secret::new(helper.shared_secret),
        })
    }
}

impl BbbConfig {
    /// Create a new configuration from explicit values.
    #[must_use]
    pub fn new(base_url: String, shared_secret: String) -> Self {
        Self {
            base_url,
            shared_secret: Secret::new(shared_secret),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Expected environment variables:
    /// - `{PREFIX}_URL` (e.g., `BBB_URL`)
    /// - `{PREFIX}_SECRET` (e.g., `BBB_SECRET`)
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let url_var = format!("{}_URL", prefix.to_uppercase());
        let secret_var = format!("{}_SECRET", prefix.to_uppercase());

        let base_url =
            env::var(&url_var).map_err(|_| ConfigError::MissingEnvironmentVariable(url_var))?;

        let shared_secret = env::var(&secret_var)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(secret_var))?;

        Ok(Self {
            base_url,
            shared_secret: Secret::new(shared_secret),
        })
    }

    /// Create configuration from a .env file and environment variables.
    ///
    /// **Security Warning**: Never commit .env files to version control!
    /// Add .env to your .gitignore file.
    #[cfg(feature = "env-file")]
    pub fn from_env_file(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(prefix, ".env")
    }

    /// Create configuration from a specific .env file path.
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(prefix: &str, env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(_) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {
                // .env file doesn't exist, continue with system env vars
            }
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env(prefix)
    }

    /// Get the shared secret (use carefully - exposes the secret).
    pub fn shared_secret(&self) -> &str {
        self.shared_secret.expose_secret()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization_redacts_the_secret() {
        let config = BbbConfig::new(
            "https://bbb.example.com/bigbluebutton".to_string(),
            "very_secret".to_string(),
        );

        let serialized = serde_json::to_string(&config).unwrap();

        assert!(!serialized.contains("very_secret"));
        assert!(serialized.contains("[REDACTED]"));
    }

    #[test]
    fn from_env_names_the_missing_variable() {
        match BbbConfig::from_env("BBBX_CONFIG_TEST_UNSET") {
            Err(ConfigError::MissingEnvironmentVariable(name)) => {
                assert_eq!(name, "BBBX_CONFIG_TEST_UNSET_URL");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
