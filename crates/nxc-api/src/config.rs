use crate::error::{NextcloudError, NextcloudResult};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ENV_URL: &str = "NEXTCLOUD_URL";
pub const ENV_USERNAME: &str = "NEXTCLOUD_USERNAME";
pub const ENV_PASSWORD: &str = "NEXTCLOUD_PASSWORD";

/// Instance url plus basic-auth login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Base url of the instance, e.g. `https://cloud.example.com` or
    /// `https://example.com/nextcloud`.
    pub url: String,
    pub username: String,
    /// Account or app password.
    pub password: String,
}

impl Credentials {
    pub fn new(url: &str, username: &str, password: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// Read `NEXTCLOUD_URL`, `NEXTCLOUD_USERNAME` and `NEXTCLOUD_PASSWORD`.
    pub fn from_env() -> NextcloudResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> NextcloudResult<Self> {
        let url = lookup(ENV_URL).ok_or(NextcloudError::MissingConfig(ENV_URL))?;
        let username = lookup(ENV_USERNAME).ok_or(NextcloudError::MissingConfig(ENV_USERNAME))?;
        let password = lookup(ENV_PASSWORD).ok_or(NextcloudError::MissingConfig(ENV_PASSWORD))?;
        Ok(Self::new(&url, &username, &password))
    }

    /// Url with any trailing `/` removed, also for deserialized values.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    pub fn masked_password(&self) -> String {
        if self.password.chars().count() <= 4 {
            return "****".to_string();
        }
        let head: String = self.password.chars().take(4).collect();
        format!("{}****", head)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.masked_password())
            .finish()
    }
}
