use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const ENV_BASE_URL: &str = "RULEWRAP_BASE_URL";
pub const ENV_USER: &str = "RULEWRAP_USER";
pub const ENV_PASSWORD: &str = "RULEWRAP_PASSWORD";
pub const ENV_ZONE: &str = "RULEWRAP_ZONE";
pub const ENV_TIMEOUT_SECS: &str = "RULEWRAP_TIMEOUT_SECS";
pub const ENV_CACHE_TTL_SECS: &str = "RULEWRAP_CACHE_TTL_SECS";

/// Connection and cache settings for one [`crate::RuleManager`].
#[derive(Clone)]
pub struct ClientConfig {
    /// Root URL of the rule gateway; rules are posted to `<base_url>/rules/execute`.
    pub base_url: Url,
    pub user: String,
    pub password: String,
    pub zone: String,
    /// Hard cap on one rule round-trip.
    pub timeout: Duration,
    /// How long resolved users and groups stay in the identity cache.
    pub cache_ttl: Duration,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("user", &self.user)
            .field("password", &password)
            .field("zone", &self.zone)
            .field("timeout", &self.timeout)
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://localhost:8080").expect("static url parses"),
            user: "rods".into(),
            password: String::new(),
            zone: "nlmumc".into(),
            timeout: Duration::from_secs(30),
            cache_ttl: Duration::from_secs(600),
        }
    }
}

impl ClientConfig {
    /// Build from `RULEWRAP_*` environment variables. The base URL and user are
    /// required; the rest fall back to [`ClientConfig::default`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let base_url = lookup(ENV_BASE_URL).ok_or(ConfigError::Missing { var: ENV_BASE_URL })?;
        let user = lookup(ENV_USER).ok_or(ConfigError::Missing { var: ENV_USER })?;

        Ok(Self {
            base_url: parse_base_url(&base_url)?,
            user,
            password: lookup(ENV_PASSWORD).unwrap_or_default(),
            zone: lookup(ENV_ZONE).unwrap_or(defaults.zone),
            timeout: seconds(ENV_TIMEOUT_SECS, lookup(ENV_TIMEOUT_SECS))?
                .unwrap_or(defaults.timeout),
            cache_ttl: seconds(ENV_CACHE_TTL_SECS, lookup(ENV_CACHE_TTL_SECS))?
                .unwrap_or(defaults.cache_ttl),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    /// Endpoint a rule body and its parameters are posted to.
    pub fn execute_url(&self) -> Result<Url, ConfigError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join("rules/execute")
            .map_err(|err| ConfigError::InvalidUrl {
                value: self.base_url.to_string(),
                reason: err.to_string(),
            })
    }
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|err| ConfigError::InvalidUrl {
        value: value.to_string(),
        reason: err.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrl {
            value: value.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

fn seconds(var: &'static str, value: Option<String>) -> Result<Option<Duration>, ConfigError> {
    value
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidSeconds { var, value: raw })
        })
        .transpose()
}
