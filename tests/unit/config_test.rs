//! Configuration loading
//!
//! Every test here touches process environment variables, so they run
//! serially.

use std::env;

use password_login::config::*;
use serial_test::serial;

mod utils {
    /// Remove every PASSWORD_LOGIN variable and APP_ENV
    pub fn clean_env_vars() {
        let keys: Vec<String> = std::env::vars()
            .filter(|(k, _)| k.starts_with("PASSWORD_LOGIN"))
            .map(|(k, _)| k)
            .collect();

        for key in keys {
            unsafe { std::env::remove_var(&key) };
        }
        unsafe { std::env::remove_var("APP_ENV") };
    }
}

#[test]
#[serial]
fn test_load_default_config_success() {
    utils::clean_env_vars();

    let config = load();
    assert!(config.is_ok(), "Failed to load default configuration: {:?}", config.err());
    let config = config.unwrap();

    assert_eq!(config.app.name, "password-login");
    assert_eq!(config.app.environment, "development");
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.observability.log_format, LogFormat::Pretty);
    assert_eq!(config.auth.password_hash_algorithm, PasswordHashAlgorithm::Pbkdf2);
    assert_eq!(config.auth.pbkdf2.iterations, 1000);
    assert_eq!(config.session.cookie_name, "session");
    assert_eq!(config.session.ttl, 86400);
    assert_eq!(config.session.same_site, CookieSameSite::Lax);
    assert_eq!(config.session.backend, SessionBackend::Local);
    assert!(config.api.swagger_enabled);
}

#[test]
#[serial]
fn test_production_overlay() {
    utils::clean_env_vars();
    unsafe { env::set_var("APP_ENV", "production") };

    let config = load().unwrap();

    assert_eq!(config.app.environment, "production");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.observability.log_format, LogFormat::Json);
    assert!(config.session.secure);
    assert!(!config.api.swagger_enabled);
    // untouched keys fall through to default.toml
    assert_eq!(config.server.port, 8080);

    utils::clean_env_vars();
}

#[test]
#[serial]
fn test_environment_variables_override_files() {
    utils::clean_env_vars();
    unsafe {
        env::set_var("PASSWORD_LOGIN__SERVER__PORT", "9090");
        env::set_var("PASSWORD_LOGIN__SESSION__COOKIE_NAME", "sid");
        env::set_var("PASSWORD_LOGIN__AUTH__PASSWORD_HASH_ALGORITHM", "argon2");
    };

    let config = load().unwrap();

    assert_eq!(config.server.port, 9090);
    assert_eq!(config.session.cookie_name, "sid");
    assert_eq!(config.auth.password_hash_algorithm, PasswordHashAlgorithm::Argon2);

    utils::clean_env_vars();
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() {
    utils::clean_env_vars();
    unsafe { env::set_var("PASSWORD_LOGIN__SESSION__TTL", "0") };

    let result = load();
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));

    utils::clean_env_vars();
}

#[test]
#[serial]
fn test_same_site_none_without_secure_is_rejected() {
    utils::clean_env_vars();
    unsafe { env::set_var("PASSWORD_LOGIN__SESSION__SAME_SITE", "none") };

    assert!(load().is_err());

    unsafe { env::set_var("PASSWORD_LOGIN__SESSION__SECURE", "true") };

    let config = load().unwrap();
    assert_eq!(config.session.same_site, CookieSameSite::None);

    utils::clean_env_vars();
}

#[test]
#[serial]
fn test_unknown_enum_value_fails_to_load() {
    utils::clean_env_vars();
    unsafe { env::set_var("PASSWORD_LOGIN__OBSERVABILITY__LOG_FORMAT", "xml") };

    assert!(matches!(load(), Err(ConfigError::Load(_))));

    utils::clean_env_vars();
}
