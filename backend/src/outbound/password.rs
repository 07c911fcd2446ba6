//! PBKDF2-HMAC-SHA256 password hashing.
//!
//! Encoded hashes are self-describing:
//! `pbkdf2-sha256$<rounds>$<salt-hex>$<key-hex>`. Verification reads the
//! round count from the stored value, so raising [`DEFAULT_ROUNDS`] does not
//! invalidate existing hashes.

use hmac::{Hmac, Mac};
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::domain::ports::{PasswordHasher, PasswordHasherError};

type HmacSha256 = Hmac<Sha256>;

/// Rounds applied to new hashes.
pub const DEFAULT_ROUNDS: u32 = 100_000;
const SALT_BYTES: usize = 16;
const KEY_BYTES: usize = 32;
const SCHEME: &str = "pbkdf2-sha256";

/// [`PasswordHasher`] deriving keys with PBKDF2-HMAC-SHA256 over a random salt.
#[derive(Debug, Clone, Copy)]
pub struct Pbkdf2PasswordHasher {
    rounds: u32,
}

impl Default for Pbkdf2PasswordHasher {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
        }
    }
}

impl Pbkdf2PasswordHasher {
    /// Hasher with a custom work factor. Zero is raised to one round.
    pub fn with_rounds(rounds: u32) -> Self {
        Self {
            rounds: rounds.max(1),
        }
    }
}

// The derived key is one SHA-256 output long, so only PBKDF2 block 1 exists.
fn derive(
    password: &str,
    salt: &[u8],
    rounds: u32,
) -> Result<Zeroizing<[u8; KEY_BYTES]>, PasswordHasherError> {
    let prf = HmacSha256::new_from_slice(password.as_bytes())
        .map_err(|err| PasswordHasherError::derivation(err.to_string()))?;

    let mut first = prf.clone();
    first.update(salt);
    first.update(&1_u32.to_be_bytes());
    let mut block: [u8; KEY_BYTES] = first.finalize().into_bytes().into();
    let mut key = Zeroizing::new(block);

    for _ in 1..rounds {
        let mut next = prf.clone();
        next.update(&block);
        block = next.finalize().into_bytes().into();
        key.iter_mut().zip(block.iter()).for_each(|(acc, byte)| *acc ^= byte);
    }
    block.zeroize();
    Ok(key)
}

struct ParsedHash {
    rounds: u32,
    salt: Vec<u8>,
    key: Vec<u8>,
}

fn parse(encoded: &str) -> Result<ParsedHash, PasswordHasherError> {
    let mut parts = encoded.split('$');
    let (Some(scheme), Some(rounds), Some(salt), Some(key), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return Err(PasswordHasherError::malformed_hash("expected four fields"));
    };
    if scheme != SCHEME {
        return Err(PasswordHasherError::malformed_hash(format!(
            "unsupported scheme {scheme:?}"
        )));
    }
    let rounds = rounds
        .parse::<u32>()
        .ok()
        .filter(|rounds| *rounds > 0)
        .ok_or_else(|| PasswordHasherError::malformed_hash("invalid round count"))?;
    let salt = hex::decode(salt)
        .map_err(|err| PasswordHasherError::malformed_hash(format!("salt: {err}")))?;
    let key = hex::decode(key)
        .map_err(|err| PasswordHasherError::malformed_hash(format!("key: {err}")))?;
    Ok(ParsedHash { rounds, salt, key })
}

impl PasswordHasher for Pbkdf2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHasherError> {
        let mut salt = [0_u8; SALT_BYTES];
        OsRng.fill_bytes(&mut salt);
        let key = derive(password, &salt, self.rounds)?;
        Ok(format!(
            "{SCHEME}${}${}${}",
            self.rounds,
            hex::encode(salt),
            hex::encode(key.as_slice())
        ))
    }

    fn verify(&self, password: &str, encoded: &str) -> Result<bool, PasswordHasherError> {
        let parsed = parse(encoded)?;
        let candidate = derive(password, &parsed.salt, parsed.rounds)?;
        Ok(candidate.as_slice().ct_eq(parsed.key.as_slice()).into())
    }
}
