//! Environment variable tests for the configuration loader builder.
//!
//! Responsibilities:
//! - Test that each supported variable reaches the built config.
//! - Test precedence of builder overrides over environment variables.
//! - Test handling of empty, whitespace-only and malformed values.

use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;
use crate::types::{AuthStrategy, LoginEncoding};
use secrecy::ExposeSecret;
use serial_test::serial;
use std::time::Duration;

use super::{env_lock, with_probe_env};

#[test]
#[serial]
fn test_credentials_from_env() {
    let _lock = env_lock().lock().unwrap();

    with_probe_env(
        &[
            ("BASE_URL", "http://iris:8000"),
            ("IRIS_USERNAME", "admin"),
            ("IRIS_PASSWORD", "from-env"),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();

            assert_eq!(config.connection.base_url, "http://iris:8000");
            match config.auth {
                AuthStrategy::Credentials { username, password } => {
                    assert_eq!(username, "admin");
                    assert_eq!(password.expose_secret(), "from-env");
                }
                other => panic!("expected credentials, got {:?}", other),
            }
        },
    );
}

#[test]
#[serial]
fn test_builder_overrides_env() {
    let _lock = env_lock().lock().unwrap();

    with_probe_env(
        &[
            ("BASE_URL", "http://from-env:8000"),
            ("PROBE_TIMEOUT", "20"),
        ],
        || {
            let config = ConfigLoader::new()
                .from_env()
                .unwrap()
                .with_base_url("http://from-cli:9000".to_string())
                .build()
                .unwrap();

            assert_eq!(config.connection.base_url, "http://from-cli:9000");
            // Untouched by the builder, so env still applies
            assert_eq!(config.connection.timeout, Duration::from_secs(20));
        },
    );
}

#[test]
#[serial]
fn test_empty_env_vars_ignored() {
    let _lock = env_lock().lock().unwrap();

    with_probe_env(
        &[
            ("IRIS_TOKEN", ""),
            ("IRIS_USERNAME", "   "),
            ("IRIS_PASSWORD", ""),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
            assert!(matches!(config.auth, AuthStrategy::Anonymous));
        },
    );
}

#[test]
#[serial]
fn test_token_from_env() {
    let _lock = env_lock().lock().unwrap();

    with_probe_env(&[("IRIS_TOKEN", "tok-123")], || {
        let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
        match config.auth {
            AuthStrategy::BearerToken { token } => assert_eq!(token.expose_secret(), "tok-123"),
            other => panic!("expected bearer token, got {:?}", other),
        }
    });
}

#[test]
#[serial]
fn test_run_and_retry_settings_from_env() {
    let _lock = env_lock().lock().unwrap();

    with_probe_env(
        &[
            ("PROBE_MAX_RETRIES", "0"),
            ("PROBE_RETRY_BACKOFF_MS", "250"),
            ("PROBE_DEADLINE", "60"),
            ("PROBE_SKIP_VERIFY", "true"),
            ("PROBE_LOGIN_ENCODING", "json"),
            ("PROBE_LOGIN_PATH", "/auth/login"),
            ("PROBE_HEALTH_PATH", "/ready"),
            ("PROBE_READY_INTERVAL", "2"),
            ("PROBE_READY_TIMEOUT", "30"),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();

            assert_eq!(config.connection.max_retries, 0);
            assert_eq!(config.connection.retry_backoff, Duration::from_millis(250));
            assert!(config.connection.skip_verify);
            assert_eq!(config.connection.login_encoding, LoginEncoding::Json);
            assert_eq!(config.connection.login_path, "/auth/login");
            assert_eq!(config.connection.health_path, "/ready");
            assert_eq!(config.run.deadline, Duration::from_secs(60));
            assert_eq!(config.run.ready_poll_interval, Duration::from_secs(2));
            assert_eq!(config.run.ready_timeout, Duration::from_secs(30));
        },
    );
}

#[test]
#[serial]
fn test_malformed_timeout_names_variable() {
    let _lock = env_lock().lock().unwrap();

    with_probe_env(&[("PROBE_TIMEOUT", "ten")], || {
        let result = ConfigLoader::new().from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "PROBE_TIMEOUT"),
            other => panic!("expected InvalidValue, got {:?}", other.map(|_| ())),
        }
    });
}

#[test]
#[serial]
fn test_unknown_login_encoding_rejected() {
    let _lock = env_lock().lock().unwrap();

    with_probe_env(&[("PROBE_LOGIN_ENCODING", "xml")], || {
        let result = ConfigLoader::new().from_env();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref var, .. }) if var == "PROBE_LOGIN_ENCODING"
        ));
    });
}

#[test]
#[serial]
fn test_max_retries_env_above_limit_rejected() {
    let _lock = env_lock().lock().unwrap();

    with_probe_env(&[("PROBE_MAX_RETRIES", "11")], || {
        let result = ConfigLoader::new().from_env();
        assert!(matches!(result, Err(ConfigError::InvalidMaxRetries { .. })));
    });
}
