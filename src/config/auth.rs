use serde::{Deserialize, Serialize};

use super::common::{ConfigError, Validate, invalid};

/// Password hashing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Algorithm used for newly produced hashes, verification detects the
    /// stored format on its own
    #[serde(default = "default_password_hash_algorithm")]
    pub password_hash_algorithm: PasswordHashAlgorithm,
    /// Argon2 configuration
    #[serde(default = "Argon2Config::default")]
    pub argon2: Argon2Config,
    /// Salted PBKDF2-SHA512 configuration
    #[serde(default = "Pbkdf2Config::default")]
    pub pbkdf2: Pbkdf2Config,
}

/// Argon2 password hashing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Argon2Config {
    /// Memory cost in KB (64MB = 65536 KB)
    #[serde(default = "default_argon2_memory_cost")]
    pub memory_cost: u32,
    /// Time cost (iterations)
    #[serde(default = "default_argon2_time_cost")]
    pub time_cost: u32,
    /// Parallelism (number of lanes)
    #[serde(default = "default_argon2_parallelism")]
    pub parallelism: u32,
    /// Hash length in bytes
    #[serde(default = "default_argon2_hash_length")]
    pub hash_length: u32,
}

/// Salted hex PBKDF2-HMAC-SHA512 configuration
///
/// Stored values are `<salt><digest>`, both lowercase hex. The salt string
/// itself (not its decoded bytes) is the PBKDF2 salt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pbkdf2Config {
    /// PBKDF2 rounds, applies to verification of existing hashes as well
    #[serde(default = "default_pbkdf2_iterations")]
    pub iterations: u32,
    /// Random bytes behind the hex salt (32 bytes = 64 hex characters)
    #[serde(default = "default_pbkdf2_salt_length")]
    pub salt_length: usize,
}

/// Password hash algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordHashAlgorithm {
    /// Argon2id PHC strings
    Argon2,
    /// Salted hex PBKDF2-HMAC-SHA512
    Pbkdf2,
}

fn default_password_hash_algorithm() -> PasswordHashAlgorithm {
    PasswordHashAlgorithm::Pbkdf2
}

fn default_argon2_memory_cost() -> u32 {
    65536 // 64 MB
}

fn default_argon2_time_cost() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

fn default_argon2_hash_length() -> u32 {
    32
}

fn default_pbkdf2_iterations() -> u32 {
    1000
}

fn default_pbkdf2_salt_length() -> usize {
    32
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password_hash_algorithm: default_password_hash_algorithm(),
            argon2: Argon2Config::default(),
            pbkdf2: Pbkdf2Config::default(),
        }
    }
}

impl Default for Argon2Config {
    fn default() -> Self {
        Self {
            memory_cost: default_argon2_memory_cost(),
            time_cost: default_argon2_time_cost(),
            parallelism: default_argon2_parallelism(),
            hash_length: default_argon2_hash_length(),
        }
    }
}

impl Default for Pbkdf2Config {
    fn default() -> Self {
        Self {
            iterations: default_pbkdf2_iterations(),
            salt_length: default_pbkdf2_salt_length(),
        }
    }
}

impl Validate for AuthConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.argon2.validate()?;
        self.pbkdf2.validate()?;
        Ok(())
    }
}

impl Validate for Argon2Config {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.memory_cost == 0 {
            return invalid("auth.argon2.memory_cost must be > 0");
        }
        if self.time_cost == 0 {
            return invalid("auth.argon2.time_cost must be > 0");
        }
        if self.parallelism == 0 {
            return invalid("auth.argon2.parallelism must be > 0");
        }
        if self.hash_length == 0 {
            return invalid("auth.argon2.hash_length must be > 0");
        }
        Ok(())
    }
}

impl Validate for Pbkdf2Config {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return invalid("auth.pbkdf2.iterations must be > 0");
        }
        if self.salt_length == 0 {
            return invalid("auth.pbkdf2.salt_length must be > 0");
        }
        Ok(())
    }
}
