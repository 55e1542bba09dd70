//! Connection configuration
//!
//! Service URLs, API keys and the optional access-gateway service token can be
//! given as command line flags or through the environment. A `.env` file is
//! honoured by the binary before the arguments are parsed.

use clap::Args;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur while validating the configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A service URL is not an absolute http(s) URL
    #[error("Invalid {service} URL {url:?}: expected http:// or https://")]
    InvalidUrl { service: &'static str, url: String },
}

/// Connection settings for one library manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Base URL without trailing slash
    pub base_url: String,
    /// API key sent with every request
    pub api_key: String,
}

/// Service token for an access gateway in front of the library managers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Validated configuration for both catalog clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub radarr: ServiceConfig,
    pub sonarr: ServiceConfig,
    /// Present only if both halves of the service token are configured
    pub access: Option<AccessCredentials>,
    /// Request timeout; the HTTP client default applies if unset
    pub timeout: Option<Duration>,
}

/// Command line flags for the catalog connections
#[derive(Debug, Clone, Args)]
pub struct ConnectionArgs {
    /// Radarr base URL
    #[arg(long, env = "RADARR_URL", default_value = "http://localhost:7878")]
    pub radarr_url: String,

    /// Radarr API key
    #[arg(long, env = "RADARR_API_KEY", default_value = "", hide_env_values = true)]
    pub radarr_api_key: String,

    /// Sonarr base URL
    #[arg(long, env = "SONARR_URL", default_value = "http://localhost:8989")]
    pub sonarr_url: String,

    /// Sonarr API key
    #[arg(long, env = "SONARR_API_KEY", default_value = "", hide_env_values = true)]
    pub sonarr_api_key: String,

    /// Access-gateway service token ID
    #[arg(long, env = "CF_ACCESS_CLIENT_ID", hide_env_values = true)]
    pub access_client_id: Option<String>,

    /// Access-gateway service token secret
    #[arg(long, env = "CF_ACCESS_CLIENT_SECRET", hide_env_values = true)]
    pub access_client_secret: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "ARR_REQUEST_TIMEOUT")]
    pub timeout: Option<u64>,
}

impl ConnectionArgs {
    /// Validates the flags and turns them into a `Config`
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let radarr = ServiceConfig {
            base_url: normalize_url("Radarr", &self.radarr_url)?,
            api_key: self.radarr_api_key,
        };
        let sonarr = ServiceConfig {
            base_url: normalize_url("Sonarr", &self.sonarr_url)?,
            api_key: self.sonarr_api_key,
        };

        let access = pair_credentials(self.access_client_id, self.access_client_secret);

        Ok(Config {
            radarr,
            sonarr,
            access,
            timeout: self.timeout.map(Duration::from_secs),
        })
    }
}

/// Trims trailing slashes and checks the scheme
fn normalize_url(service: &'static str, url: &str) -> Result<String, ConfigError> {
    let trimmed = url.trim().trim_end_matches('/');

    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidUrl {
            service,
            url: url.to_string(),
        });
    }

    Ok(trimmed.to_string())
}

/// Uses the service token only when both halves are present
fn pair_credentials(
    client_id: Option<String>,
    client_secret: Option<String>,
) -> Option<AccessCredentials> {
    let client_id = client_id.filter(|v| !v.trim().is_empty());
    let client_secret = client_secret.filter(|v| !v.trim().is_empty());

    match (client_id, client_secret) {
        (Some(client_id), Some(client_secret)) => Some(AccessCredentials {
            client_id,
            client_secret,
        }),
        (None, None) => None,
        _ => {
            warn!("only one half of the access-gateway service token is set; ignoring it");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ConnectionArgs {
        ConnectionArgs {
            radarr_url: "http://localhost:7878".to_string(),
            radarr_api_key: "radarr-key".to_string(),
            sonarr_url: "http://localhost:8989".to_string(),
            sonarr_api_key: "sonarr-key".to_string(),
            access_client_id: None,
            access_client_secret: None,
            timeout: None,
        }
    }

    #[test]
    fn test_trailing_slashes_are_trimmed() {
        let config = ConnectionArgs {
            radarr_url: "https://media.example.org/radarr/".to_string(),
            sonarr_url: " http://nas:8989// ".to_string(),
            ..args()
        }
        .into_config()
        .unwrap();

        assert_eq!(config.radarr.base_url, "https://media.example.org/radarr");
        assert_eq!(config.sonarr.base_url, "http://nas:8989");
        assert_eq!(config.radarr.api_key, "radarr-key");
    }

    #[test]
    fn test_url_without_scheme_is_rejected() {
        let result = ConnectionArgs {
            sonarr_url: "nas:8989".to_string(),
            ..args()
        }
        .into_config();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidUrl {
                service: "Sonarr",
                ..
            })
        ));
    }

    #[test]
    fn test_access_credentials_need_both_halves() {
        assert_eq!(args().into_config().unwrap().access, None);

        let only_id = ConnectionArgs {
            access_client_id: Some("id".to_string()),
            ..args()
        };
        assert_eq!(only_id.into_config().unwrap().access, None);

        let blank_secret = ConnectionArgs {
            access_client_id: Some("id".to_string()),
            access_client_secret: Some("  ".to_string()),
            ..args()
        };
        assert_eq!(blank_secret.into_config().unwrap().access, None);

        let both = ConnectionArgs {
            access_client_id: Some("id".to_string()),
            access_client_secret: Some("secret".to_string()),
            timeout: Some(30),
            ..args()
        }
        .into_config()
        .unwrap();
        assert_eq!(
            both.access,
            Some(AccessCredentials {
                client_id: "id".to_string(),
                client_secret: "secret".to_string(),
            })
        );
        assert_eq!(both.timeout, Some(Duration::from_secs(30)));
    }
}
