//! Session cookie settings read from the environment.
//!
//! Release builds insist on explicit, valid values. Debug builds fall back to
//! safe defaults and log a warning so local runs work without any setup.
//!
//! | variable | values | debug default |
//! |---|---|---|
//! | `SESSION_KEY_FILE` | path to >= 64 bytes | `/var/run/secrets/session_key` |
//! | `SESSION_COOKIE_SECURE` | `1`/`0`/`true`/`false`/`yes`/`no` | secure |
//! | `SESSION_SAMESITE` | `Strict`/`Lax`/`None` | `Lax` |
//! | `SESSION_ALLOW_EPHEMERAL` | boolean | disabled |

use std::path::PathBuf;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::Zeroize;

pub(crate) const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
pub(crate) const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
pub(crate) const SAMESITE_ENV: &str = "SESSION_SAMESITE";
pub(crate) const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";

const DEFAULT_KEY_PATH: &str = "/var/run/secrets/session_key";
pub(crate) const KEY_MIN_LEN: usize = 64;
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Lifetime of a signed-in session.
pub const SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Whether validation runs with debug leniency.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// Mode matching `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Validated cookie settings.
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
    pub ttl: Duration,
}

impl SessionSettings {
    /// Short hex fingerprint of the signing key, safe to log.
    pub fn key_fingerprint(&self) -> String {
        let digest = Sha256::digest(self.key.signing());
        hex::encode(&digest[..8])
    }
}

/// Problems found while validating session settings.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

struct Reader<'a, E> {
    env: &'a E,
    mode: BuildMode,
}

impl<E: Env> Reader<'_, E> {
    fn lenient(&self) -> bool {
        self.mode == BuildMode::Debug
    }

    /// Read a variable, or fall back in debug builds when it is absent.
    fn value(&self, name: &'static str) -> Result<Option<String>, SessionConfigError> {
        match self.env.string(name) {
            Some(value) => Ok(Some(value)),
            None if self.lenient() => {
                warn!(variable = name, "not set; using debug default");
                Ok(None)
            }
            None => Err(SessionConfigError::MissingEnv { name }),
        }
    }

    /// Turn a bad value into an error, or a warning plus fallback in debug.
    fn invalid<T>(
        &self,
        name: &'static str,
        value: String,
        expected: &'static str,
        fallback: T,
    ) -> Result<T, SessionConfigError> {
        if self.lenient() {
            warn!(variable = name, value = %value, "invalid value; using debug default");
            Ok(fallback)
        } else {
            Err(SessionConfigError::InvalidEnv {
                name,
                value,
                expected,
            })
        }
    }

    fn flag(&self, name: &'static str, fallback: bool) -> Result<bool, SessionConfigError> {
        let Some(value) = self.value(name)? else {
            return Ok(fallback);
        };
        match parse_bool(&value) {
            Some(flag) => Ok(flag),
            None => self.invalid(name, value, BOOL_EXPECTED, fallback),
        }
    }

    fn same_site(&self, cookie_secure: bool) -> Result<SameSite, SessionConfigError> {
        let fallback = SameSite::Lax;
        let Some(value) = self.value(SAMESITE_ENV)? else {
            return Ok(fallback);
        };
        match value.to_ascii_lowercase().as_str() {
            "lax" => Ok(SameSite::Lax),
            "strict" => Ok(SameSite::Strict),
            "none" if cookie_secure => Ok(SameSite::None),
            "none" if self.lenient() => {
                warn!("SESSION_SAMESITE=None without a secure cookie; browsers may drop it");
                Ok(SameSite::None)
            }
            "none" => Err(SessionConfigError::InsecureSameSiteNone),
            _ => self.invalid(SAMESITE_ENV, value, SAMESITE_EXPECTED, fallback),
        }
    }

    fn key(&self, allow_ephemeral: bool) -> Result<Key, SessionConfigError> {
        let path = PathBuf::from(
            self.env
                .string(KEY_FILE_ENV)
                .unwrap_or_else(|| DEFAULT_KEY_PATH.to_owned()),
        );
        let mut bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(source) if self.lenient() || allow_ephemeral => {
                warn!(path = %path.display(), error = %source, "using temporary session key");
                return Ok(Key::generate());
            }
            Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
        };
        let length = bytes.len();
        let too_short = length < KEY_MIN_LEN;
        let result = if too_short && !self.lenient() {
            Err(SessionConfigError::KeyTooShort {
                path,
                length,
                min_len: KEY_MIN_LEN,
            })
        } else {
            Ok(Key::derive_from(&bytes))
        };
        bytes.zeroize();
        result
    }
}

/// Build [`SessionSettings`] from `env` under the rules of `mode`.
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let reader = Reader { env, mode };
    let cookie_secure = reader.flag(COOKIE_SECURE_ENV, true)?;
    let same_site = reader.same_site(cookie_secure)?;
    let allow_ephemeral = reader.flag(ALLOW_EPHEMERAL_ENV, false)?;
    if allow_ephemeral && mode == BuildMode::Release {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = reader.key(allow_ephemeral)?;
    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
        ttl: SESSION_TTL,
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
