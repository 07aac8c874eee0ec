use argon2::password_hash::{
    self, PasswordHash, PasswordHasher as Argon2Hasher, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::Sha512;
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::config::auth::{AuthConfig, PasswordHashAlgorithm};

/// Hex length of a SHA-512 PBKDF2 digest
const PBKDF2_DIGEST_HEX_LEN: usize = 128;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Unrecognised password hash format")]
    UnknownFormat,

    #[error("Invalid hashing parameters: {0}")]
    Params(String),

    #[error("{0}")]
    Hash(password_hash::Error),
}

impl From<password_hash::Error> for PasswordError {
    fn from(error: password_hash::Error) -> Self {
        Self::Hash(error)
    }
}

/// A stored password hash, classified by format
#[derive(Debug)]
enum StoredHash<'a> {
    /// `$argon2id$v=19$m=...,t=...,p=...$<salt>$<hash>`
    Phc(PasswordHash<'a>),
    /// `<hex salt><hex PBKDF2-HMAC-SHA512 digest>`
    Pbkdf2 { salt: &'a str, digest: Vec<u8> },
}

impl<'a> StoredHash<'a> {
    fn parse(stored: &'a str) -> Result<Self, PasswordError> {
        if stored.starts_with('$') {
            return Ok(Self::Phc(PasswordHash::new(stored)?));
        }

        if stored.len() <= PBKDF2_DIGEST_HEX_LEN
            || !stored.bytes().all(|byte| byte.is_ascii_hexdigit())
        {
            return Err(PasswordError::UnknownFormat);
        }

        let (salt, digest) = stored.split_at(stored.len() - PBKDF2_DIGEST_HEX_LEN);
        let digest = hex::decode(digest).map_err(|_| PasswordError::UnknownFormat)?;

        Ok(Self::Pbkdf2 { salt, digest })
    }
}

/// Password hasher for both supported storage formats
///
/// New hashes use the configured algorithm. Verification reads the format off
/// the stored value, so credentials written under either algorithm keep
/// working after the configured one changes.
///
/// # Example
/// ```no_run
/// use password_login::config::AuthConfig;
/// use password_login::security::PasswordHasher;
///
/// let hasher = PasswordHasher::from_config(&AuthConfig::default()).unwrap();
/// let hash = hasher.hash("my_secure_password").unwrap();
///
/// assert!(hasher.verify("my_secure_password", &hash).unwrap());
/// ```
pub struct PasswordHasher {
    algorithm: PasswordHashAlgorithm,
    argon2: Argon2<'static>,
    pbkdf2_iterations: u32,
    pbkdf2_salt_length: usize,
}

impl PasswordHasher {
    /// Create PasswordHasher from AuthConfig
    ///
    /// # Errors
    /// Returns error if Argon2 parameters are invalid (e.g., memory cost too
    /// low for the parallelism)
    #[tracing::instrument(skip(config))]
    pub fn from_config(config: &AuthConfig) -> Result<Self, PasswordError> {
        let params = Params::new(
            config.argon2.memory_cost,
            config.argon2.time_cost,
            config.argon2.parallelism,
            Some(config.argon2.hash_length as usize),
        )
        .map_err(|e| PasswordError::Params(e.to_string()))?;

        Ok(Self {
            algorithm: config.password_hash_algorithm,
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            pbkdf2_iterations: config.pbkdf2.iterations,
            pbkdf2_salt_length: config.pbkdf2.salt_length,
        })
    }

    pub fn algorithm(&self) -> PasswordHashAlgorithm {
        self.algorithm
    }

    /// Hash a password with a fresh random salt
    #[tracing::instrument(skip(self, password), fields(algorithm = ?self.algorithm))]
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        match self.algorithm {
            PasswordHashAlgorithm::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                let hash = self.argon2.hash_password(password.as_bytes(), &salt)?;

                Ok(hash.to_string())
            }
            PasswordHashAlgorithm::Pbkdf2 => {
                let mut salt = vec![0u8; self.pbkdf2_salt_length];
                OsRng.fill_bytes(&mut salt);
                let salt = hex::encode(salt);
                let digest = self.pbkdf2(password, &salt, PBKDF2_DIGEST_HEX_LEN / 2);

                Ok(format!("{}{}", salt, hex::encode(digest)))
            }
        }
    }

    /// Verify a password against a stored hash
    ///
    /// # Returns
    /// * `Ok(true)` - Password matches hash
    /// * `Ok(false)` - Password does not match hash
    /// * `Err(PasswordError)` - Stored value is not a recognised hash
    ///
    /// Digest comparison is constant time.
    #[tracing::instrument(skip(self, password, stored))]
    pub fn verify(&self, password: &str, stored: &str) -> Result<bool, PasswordError> {
        match StoredHash::parse(stored)? {
            StoredHash::Phc(hash) => {
                match self.argon2.verify_password(password.as_bytes(), &hash) {
                    Ok(()) => Ok(true),
                    Err(password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(e.into()),
                }
            }
            StoredHash::Pbkdf2 { salt, digest } => {
                let computed = self.pbkdf2(password, salt, digest.len());

                Ok(computed.as_slice().ct_eq(digest.as_slice()).into())
            }
        }
    }

    /// Spend the cost of one hash on a password that has nothing to be
    /// compared against
    pub fn equalize(&self, password: &str) {
        if let Err(e) = self.hash(password) {
            ::tracing::warn!(error = %e, "Failed to compute decoy hash");
        }
    }

    fn pbkdf2(&self, password: &str, salt: &str, length: usize) -> Vec<u8> {
        let mut digest = vec![0u8; length];
        pbkdf2_hmac::<Sha512>(
            password.as_bytes(),
            salt.as_bytes(),
            self.pbkdf2_iterations,
            &mut digest,
        );

        digest
    }
}
