use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(parse_environment("development"), Environment::Development);
}

#[test]
fn parse_environment_production() {
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_uses_defaults_for_empty_environment() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.upstream_url, DEFAULT_UPSTREAM_URL);
    assert_eq!(cfg.relay_url, "http://localhost:3000/api/products");
    assert_eq!(cfg.http_timeout_secs, None);
    assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("GROCERY_BIND_ADDR", "not-a-socket-addr");
    let err = build_app_config(lookup_from_map(&map)).unwrap_err();
    assert!(
        matches!(&err, ConfigError::InvalidEnvVar { var, .. } if var == "GROCERY_BIND_ADDR"),
        "expected InvalidEnvVar(GROCERY_BIND_ADDR), got: {err:?}"
    );
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("GROCERY_ENV", "production");
    map.insert("GROCERY_BIND_ADDR", "127.0.0.1:8080");
    map.insert("GROCERY_UPSTREAM_URL", "https://catalog.example.com/products");
    map.insert("GROCERY_RELAY_URL", "http://127.0.0.1:8080/api/products");
    map.insert("GROCERY_HTTP_TIMEOUT_SECS", "15");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.bind_addr.port(), 8080);
    assert_eq!(cfg.upstream_url, "https://catalog.example.com/products");
    assert_eq!(cfg.relay_url, "http://127.0.0.1:8080/api/products");
    assert_eq!(cfg.http_timeout_secs, Some(15));
}

#[test]
fn build_app_config_treats_blank_timeout_as_unset() {
    let mut map = HashMap::new();
    map.insert("GROCERY_HTTP_TIMEOUT_SECS", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.http_timeout_secs, None);
}

#[test]
fn build_app_config_rejects_non_numeric_timeout() {
    let mut map = HashMap::new();
    map.insert("GROCERY_HTTP_TIMEOUT_SECS", "soon");
    let err = build_app_config(lookup_from_map(&map)).unwrap_err();
    assert!(
        matches!(
            &err,
            ConfigError::InvalidEnvVar { var, .. } if var == "GROCERY_HTTP_TIMEOUT_SECS"
        ),
        "expected InvalidEnvVar(GROCERY_HTTP_TIMEOUT_SECS), got: {err:?}"
    );
}

#[test]
fn build_app_config_rejects_empty_upstream_url() {
    let mut map = HashMap::new();
    map.insert("GROCERY_UPSTREAM_URL", "");
    let err = build_app_config(lookup_from_map(&map)).unwrap_err();
    assert!(
        matches!(&err, ConfigError::InvalidEnvVar { var, .. } if var == "GROCERY_UPSTREAM_URL"),
        "expected InvalidEnvVar(GROCERY_UPSTREAM_URL), got: {err:?}"
    );
}
