//! HTTP server configuration object and helpers.

use std::time::Duration;

use waitlist_backend::settings::{
    AppSettings, DataStoreSettings, InstagramSettings, SettingsError,
};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_host: String,
    pub(crate) port: u16,
    pub(crate) client_url: String,
    pub(crate) http_timeout: Duration,
    pub(crate) data_store: Option<DataStoreSettings>,
    pub(crate) instagram: Option<InstagramSettings>,
}

impl ServerConfig {
    /// Construct a configuration with no collaborators attached.
    #[must_use]
    pub fn new(bind_host: impl Into<String>, port: u16) -> Self {
        Self {
            bind_host: bind_host.into(),
            port,
            client_url: "http://localhost:3000".to_owned(),
            http_timeout: Duration::from_secs(10),
            data_store: None,
            instagram: None,
        }
    }

    /// Construct a configuration from loaded settings.
    ///
    /// # Errors
    ///
    /// Propagates half-configured or malformed collaborator settings.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, SettingsError> {
        let mut config = Self::new(settings.bind_host(), settings.port)
            .with_client_url(settings.client_url())
            .with_http_timeout(settings.http_timeout());
        config.data_store = settings.data_store()?;
        config.instagram = settings.instagram()?;
        Ok(config)
    }

    /// Front-end origin used for sign-in redirects.
    #[must_use]
    pub fn with_client_url(mut self, client_url: impl Into<String>) -> Self {
        self.client_url = client_url.into();
        self
    }

    /// Request timeout applied to every outbound client.
    #[must_use]
    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Attach the data store and identity provider project.
    #[must_use]
    pub fn with_data_store(mut self, data_store: DataStoreSettings) -> Self {
        self.data_store = Some(data_store);
        self
    }

    /// Attach an Instagram app registration.
    #[must_use]
    pub fn with_instagram(mut self, instagram: InstagramSettings) -> Self {
        self.instagram = Some(instagram);
        self
    }

    /// `host:port` the server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.bind_host.as_str(), self.port)
    }
}
