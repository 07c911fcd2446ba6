//! Runtime settings loaded via OrthoConfig.
//!
//! Every value can come from `CAMPUS_GUIDE_*` environment variables or the
//! matching command-line flag. Unset values fall back to local-development
//! defaults.

use std::ffi::OsString;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Deserializer};

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_BIND_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_COMPLETION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://localhost:5174",
    "http://127.0.0.1:5173",
    "http://127.0.0.1:5174",
    "http://localhost:3000",
];

/// Errors raised while loading or interpreting settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(String),
    #[error("CAMPUS_GUIDE_BIND_HOST '{0}' is not an IP address")]
    InvalidBindHost(String),
}

/// Server settings.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CAMPUS_GUIDE")]
pub struct GuideSettings {
    /// TCP port to listen on.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// Interface address to bind.
    pub bind_host: Option<String>,
    /// PostgreSQL URL. Without it the server keeps everything in memory.
    pub database_url: Option<String>,
    /// Gemini API key. Without it every reply uses canned text.
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub gemini_base_url: Option<String>,
    /// Upper bound on a single completion call.
    pub completion_timeout_secs: Option<u64>,
    /// Browser origins allowed by CORS. The environment form is a
    /// comma-separated list.
    #[serde(default, deserialize_with = "origin_list")]
    pub allowed_origins: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OriginList {
    One(String),
    Many(Vec<String>),
}

// A single origin arrives as a plain string; several arrive already split.
fn origin_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<OriginList>::deserialize(deserializer)?.map(|list| match list {
            OriginList::One(raw) => raw.split(',').map(str::to_owned).collect(),
            OriginList::Many(entries) => entries,
        }),
    )
}

impl std::fmt::Debug for GuideSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuideSettings")
            .field("port", &self.port)
            .field("bind_host", &self.bind_host)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "<set>"))
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("completion_timeout_secs", &self.completion_timeout_secs)
            .field("allowed_origins", &self.allowed_origins)
            .finish()
    }
}

impl GuideSettings {
    /// Load from command-line arguments (program name first) layered over
    /// `CAMPUS_GUIDE_*` variables.
    pub fn from_args<I, T>(args: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::load_from_iter(args).map_err(|error| SettingsError::Load(error.to_string()))
    }

    /// Socket address built from `bind_host` and `port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = match self.bind_host.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_BIND_HOST,
            Some(raw) => raw
                .parse()
                .map_err(|_| SettingsError::InvalidBindHost(raw.to_owned()))?,
        };
        Ok(SocketAddr::new(host, self.port))
    }

    /// Database URL, if one is configured and not blank.
    pub fn database_url(&self) -> Option<&str> {
        non_blank(self.database_url.as_deref())
    }

    /// Gemini API key, if one is configured and not blank.
    pub fn gemini_api_key(&self) -> Option<&str> {
        non_blank(self.gemini_api_key.as_deref())
    }

    pub fn gemini_model(&self) -> &str {
        non_blank(self.gemini_model.as_deref()).unwrap_or(DEFAULT_GEMINI_MODEL)
    }

    pub fn gemini_base_url(&self) -> &str {
        non_blank(self.gemini_base_url.as_deref()).unwrap_or(DEFAULT_GEMINI_BASE_URL)
    }

    pub fn completion_timeout(&self) -> Duration {
        Duration::from_secs(
            self.completion_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_COMPLETION_TIMEOUT_SECS),
        )
    }

    /// Trimmed, non-blank origin entries. Validation happens in the CORS
    /// adapter.
    pub fn allowed_origins(&self) -> Vec<String> {
        let configured: Vec<String> = self
            .allowed_origins
            .iter()
            .flatten()
            .filter_map(|entry| non_blank(Some(entry.as_str())))
            .map(str::to_owned)
            .collect();
        if configured.is_empty() {
            DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|origin| (*origin).to_owned())
                .collect()
        } else {
            configured
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
