use std::sync::Arc;
use std::time::Duration;

use password_login_migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set};

use crate::cache::LocalCache;
use crate::config::{Argon2Config, AuthConfig, PasswordHashAlgorithm, Pbkdf2Config};
use crate::database;
use crate::entities::{logins, users};
use crate::security::{PasswordError, PasswordHasher};
use crate::session::{CacheSessionStore, SessionStore};

/// Salted PBKDF2-SHA512 of "goodpassword", stored for "username"
pub const FIXTURE_PASSWORD_HASH: &str = concat!(
    "b1b87c2429a3f77838faeae970c17a1b62e9b6a35fa9fd",
    "a4bc011bc39965849608d4377629c525bebc75c32ac372d135c",
    "d312c29f492d61bea7468893835c7c17c2f216a4490e10f67f6",
    "984cf4927f35ed43920873012cd854d7038dc92f7f56",
);

/// In-memory SQLite database with all migrations applied
///
/// # Panics
/// Panics if the connection or a migration fails.
pub async fn database() -> DatabaseConnection {
    let db = database::memory()
        .await
        .expect("Failed to connect to in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Hasher with reduced Argon2 cost, producing PBKDF2 hashes like production
pub fn password_hasher() -> Result<PasswordHasher, PasswordError> {
    PasswordHasher::from_config(&AuthConfig {
        password_hash_algorithm: PasswordHashAlgorithm::Pbkdf2,
        argon2: Argon2Config {
            memory_cost: 19456,
            time_cost: 1,
            parallelism: 1,
            hash_length: 32,
        },
        pbkdf2: Pbkdf2Config::default(),
    })
}

/// Fresh in-process session store with a one hour TTL
pub fn session_store() -> Arc<dyn SessionStore> {
    Arc::new(CacheSessionStore::new(
        Arc::new(LocalCache::new()),
        Duration::from_secs(60 * 60),
    ))
}

/// Insert user 1 "username" with the password "goodpassword"
pub async fn fixture(db: &DatabaseConnection) -> Result<users::Model, DbErr> {
    let user = users::ActiveModel {
        id: Set(1),
        name: Set("name".to_string()),
        username: Set("username".to_string()),
        email: Set("email".to_string()),
    }
    .insert(db)
    .await?;

    logins::ActiveModel {
        username: Set("username".to_string()),
        password: Set(FIXTURE_PASSWORD_HASH.to_string()),
    }
    .insert(db)
    .await?;

    Ok(user)
}

/// Insert a user and its login record, `password` is stored as given
pub async fn create_login(
    db: &DatabaseConnection,
    id: i32,
    username: &str,
    password: &str,
) -> Result<(users::Model, logins::Model), DbErr> {
    let user = users::ActiveModel {
        id: Set(id),
        name: Set(username.to_string()),
        username: Set(username.to_string()),
        email: Set(format!("{}@example.com", username)),
    }
    .insert(db)
    .await?;

    let login = logins::ActiveModel {
        username: Set(username.to_string()),
        password: Set(password.to_string()),
    }
    .insert(db)
    .await?;

    Ok((user, login))
}
