//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `WAITLIST_*` environment variables and an
//! optional config file, in that order of precedence. Collaborator settings
//! are optional so a debug build can start against fixture adapters.

use std::fmt;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_HOST: &str = "0.0.0.0";
const DEFAULT_CLIENT_URL: &str = "http://localhost:3000";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("{key} is not a valid URL: {message}")]
    InvalidUrl { key: &'static str, message: String },
    #[error("{key} must be set when {other} is set")]
    Incomplete {
        key: &'static str,
        other: &'static str,
    },
}

/// Process-wide settings.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WAITLIST")]
pub struct AppSettings {
    /// TCP port to listen on.
    #[ortho_config(default = 5000)]
    pub port: u16,
    /// Interface to bind.
    pub bind_host: Option<String>,
    /// Base URL of the data store and identity provider project.
    pub data_store_url: Option<String>,
    /// Service key sent as `apikey` and bearer credential.
    pub data_store_key: Option<String>,
    /// Front-end origin; sign-in redirects land on `{client_url}/auth/callback`.
    pub client_url: Option<String>,
    pub instagram_client_id: Option<String>,
    pub instagram_client_secret: Option<String>,
    pub instagram_redirect_uri: Option<String>,
    /// Request timeout for every outbound HTTP client.
    #[ortho_config(default = 10)]
    pub http_timeout_secs: u64,
}

/// Validated data-store connection details.
#[derive(Clone, PartialEq, Eq)]
pub struct DataStoreSettings {
    pub url: Url,
    pub key: String,
}

/// Validated Instagram app registration.
#[derive(Clone, PartialEq, Eq)]
pub struct InstagramSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl fmt::Debug for DataStoreSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataStoreSettings")
            .field("url", &self.url.as_str())
            .field("key", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for InstagramSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstagramSettings")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl AppSettings {
    pub fn bind_host(&self) -> &str {
        present(self.bind_host.as_ref()).unwrap_or(DEFAULT_BIND_HOST)
    }

    pub fn client_url(&self) -> &str {
        present(self.client_url.as_ref()).unwrap_or(DEFAULT_CLIENT_URL)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.max(1))
    }

    /// Data-store details, or `None` when neither value is set.
    ///
    /// # Errors
    ///
    /// Fails when only one of URL and key is set or the URL does not parse.
    pub fn data_store(&self) -> Result<Option<DataStoreSettings>, SettingsError> {
        match (
            present(self.data_store_url.as_ref()),
            present(self.data_store_key.as_ref()),
        ) {
            (None, None) => Ok(None),
            (Some(_), None) => Err(SettingsError::Incomplete {
                key: "WAITLIST_DATA_STORE_KEY",
                other: "WAITLIST_DATA_STORE_URL",
            }),
            (None, Some(_)) => Err(SettingsError::Incomplete {
                key: "WAITLIST_DATA_STORE_URL",
                other: "WAITLIST_DATA_STORE_KEY",
            }),
            (Some(url), Some(key)) => {
                let url = Url::parse(url).map_err(|error| SettingsError::InvalidUrl {
                    key: "WAITLIST_DATA_STORE_URL",
                    message: error.to_string(),
                })?;
                Ok(Some(DataStoreSettings {
                    url,
                    key: key.to_owned(),
                }))
            }
        }
    }

    /// Instagram registration, or `None` unless the client id is set.
    ///
    /// # Errors
    ///
    /// Fails when the client id is set without a secret or redirect URI.
    pub fn instagram(&self) -> Result<Option<InstagramSettings>, SettingsError> {
        let Some(client_id) = present(self.instagram_client_id.as_ref()) else {
            return Ok(None);
        };
        let client_secret = present(self.instagram_client_secret.as_ref()).ok_or(
            SettingsError::Incomplete {
                key: "WAITLIST_INSTAGRAM_CLIENT_SECRET",
                other: "WAITLIST_INSTAGRAM_CLIENT_ID",
            },
        )?;
        let redirect_uri = present(self.instagram_redirect_uri.as_ref()).ok_or(
            SettingsError::Incomplete {
                key: "WAITLIST_INSTAGRAM_REDIRECT_URI",
                other: "WAITLIST_INSTAGRAM_CLIENT_ID",
            },
        )?;
        Ok(Some(InstagramSettings {
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
            redirect_uri: redirect_uri.to_owned(),
        }))
    }
}

fn redacted(value: Option<&String>) -> &'static str {
    if value.is_some() { "<redacted>" } else { "<unset>" }
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("port", &self.port)
            .field("bind_host", &self.bind_host)
            .field("data_store_url", &self.data_store_url)
            .field("data_store_key", &redacted(self.data_store_key.as_ref()))
            .field("client_url", &self.client_url)
            .field("instagram_client_id", &self.instagram_client_id)
            .field(
                "instagram_client_secret",
                &redacted(self.instagram_client_secret.as_ref()),
            )
            .field("instagram_redirect_uri", &self.instagram_redirect_uri)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const KEYS: [&str; 9] = [
        "WAITLIST_PORT",
        "WAITLIST_BIND_HOST",
        "WAITLIST_DATA_STORE_URL",
        "WAITLIST_DATA_STORE_KEY",
        "WAITLIST_CLIENT_URL",
        "WAITLIST_INSTAGRAM_CLIENT_ID",
        "WAITLIST_INSTAGRAM_CLIENT_SECRET",
        "WAITLIST_INSTAGRAM_REDIRECT_URI",
        "WAITLIST_HTTP_TIMEOUT_SECS",
    ];

    fn with_env(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        KEYS.iter()
            .map(|key| {
                let value = overrides
                    .iter()
                    .find(|(k, _)| k == key)
                    .map(|(_, v)| (*v).to_owned());
                (*key, value)
            })
            .collect()
    }

    fn load() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("waitlist-backend")])
            .expect("settings should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(with_env(&[]));

        let settings = load();
        assert_eq!(settings.port, 5000);
        assert_eq!(settings.bind_host(), DEFAULT_BIND_HOST);
        assert_eq!(settings.client_url(), DEFAULT_CLIENT_URL);
        assert_eq!(settings.http_timeout(), Duration::from_secs(10));
        assert!(settings.data_store().expect("valid").is_none());
        assert!(settings.instagram().expect("valid").is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(with_env(&[
            ("WAITLIST_PORT", "8080"),
            ("WAITLIST_DATA_STORE_URL", "https://project.example"),
            ("WAITLIST_DATA_STORE_KEY", "service-key"),
            ("WAITLIST_INSTAGRAM_CLIENT_ID", "client"),
            ("WAITLIST_INSTAGRAM_CLIENT_SECRET", "secret"),
            ("WAITLIST_INSTAGRAM_REDIRECT_URI", "https://app.example/cb"),
        ]));

        let settings = load();
        assert_eq!(settings.port, 8080);
        let store = settings.data_store().expect("valid").expect("configured");
        assert_eq!(store.url.as_str(), "https://project.example/");
        assert_eq!(store.key, "service-key");
        let instagram = settings.instagram().expect("valid").expect("configured");
        assert_eq!(instagram.redirect_uri, "https://app.example/cb");
    }

    #[rstest]
    fn half_configured_data_store_is_rejected() {
        let _guard = lock_env(with_env(&[(
            "WAITLIST_DATA_STORE_URL",
            "https://project.example",
        )]));

        let err = load().data_store().expect_err("missing key");
        assert!(matches!(err, SettingsError::Incomplete { .. }));
    }

    #[rstest]
    fn debug_output_hides_secrets() {
        let _guard = lock_env(with_env(&[("WAITLIST_DATA_STORE_KEY", "service-key")]));

        let rendered = format!("{:?}", load());
        assert!(!rendered.contains("service-key"));
        assert!(rendered.contains("<redacted>"));
    }

    #[rstest]
    fn validated_groups_hide_secrets_in_debug_output() {
        let _guard = lock_env(with_env(&[
            ("WAITLIST_DATA_STORE_URL", "https://project.example"),
            ("WAITLIST_DATA_STORE_KEY", "service-key"),
            ("WAITLIST_INSTAGRAM_CLIENT_ID", "ig-client"),
            ("WAITLIST_INSTAGRAM_CLIENT_SECRET", "ig-secret"),
            ("WAITLIST_INSTAGRAM_REDIRECT_URI", "https://app.example/cb"),
        ]));

        let settings = load();
        let store = format!("{:?}", settings.data_store());
        let instagram = format!("{:?}", settings.instagram());
        assert!(store.contains("https://project.example/"));
        assert!(!store.contains("service-key"));
        assert!(instagram.contains("ig-client"));
        assert!(!instagram.contains("ig-secret"));
    }
}
