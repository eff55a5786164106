use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Largest accepted `WATCHSTATS_UTC_OFFSET_MINUTES` magnitude (just under a day).
const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; the lookup is injected so tests can run
/// against a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("WATCHSTATS_ENV", "development"))?;
    let log_level = or_default("WATCHSTATS_LOG_LEVEL", env.default_log_level());
    let store_dir = PathBuf::from(or_default("WATCHSTATS_STORE_DIR", "./.watchstats"));

    let store_capacity_bytes = parse_u64("WATCHSTATS_STORE_CAPACITY_BYTES", "5242880")?;
    if store_capacity_bytes == 0 {
        return Err(invalid(
            "WATCHSTATS_STORE_CAPACITY_BYTES",
            "must be greater than zero".to_string(),
        ));
    }
    let max_upload_bytes = parse_u64("WATCHSTATS_MAX_UPLOAD_BYTES", "104857600")?;

    let utc_offset_minutes = or_default("WATCHSTATS_UTC_OFFSET_MINUTES", "0")
        .parse::<i32>()
        .map_err(|e| invalid("WATCHSTATS_UTC_OFFSET_MINUTES", e.to_string()))?;
    if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&utc_offset_minutes) {
        return Err(invalid(
            "WATCHSTATS_UTC_OFFSET_MINUTES",
            format!("must be within ±{MAX_OFFSET_MINUTES}"),
        ));
    }

    let legacy_first_event = parse_bool(&or_default("WATCHSTATS_LEGACY_FIRST_EVENT", "true"))
        .ok_or_else(|| {
            invalid(
                "WATCHSTATS_LEGACY_FIRST_EVENT",
                "expected true or false".to_string(),
            )
        })?;

    Ok(AppConfig {
        env,
        log_level,
        store_dir,
        store_capacity_bytes,
        max_upload_bytes,
        utc_offset_minutes,
        legacy_first_event,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "WATCHSTATS_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
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
    fn parse_environment_known_values() {
        assert_eq!(
            parse_environment("development").unwrap(),
            Environment::Development
        );
        assert_eq!(parse_environment("test").unwrap(), Environment::Test);
        assert_eq!(
            parse_environment("production").unwrap(),
            Environment::Production
        );
    }

    #[test]
    fn parse_environment_unknown_fails() {
        let err = parse_environment("staging").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "WATCHSTATS_ENV"));
    }

    #[test]
    fn build_app_config_defaults_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.store_dir.to_str(), Some("./.watchstats"));
        assert_eq!(cfg.store_capacity_bytes, 5_242_880);
        assert_eq!(cfg.max_upload_bytes, 104_857_600);
        assert_eq!(cfg.utc_offset_minutes, 0);
        assert!(cfg.legacy_first_event);
    }

    #[test]
    fn log_level_defaults_follow_environment() {
        for (env, level) in [("development", "debug"), ("test", "warn"), ("production", "info")] {
            let mut map = HashMap::new();
            map.insert("WATCHSTATS_ENV", env);
            let cfg = build_app_config(lookup_from_map(&map)).unwrap();
            assert_eq!(cfg.log_level, level, "default for {env}");
        }
    }

    #[test]
    fn build_app_config_reads_overrides() {
        let mut map = HashMap::new();
        map.insert("WATCHSTATS_ENV", "production");
        map.insert("WATCHSTATS_LOG_LEVEL", "debug");
        map.insert("WATCHSTATS_STORE_DIR", "/tmp/stats");
        map.insert("WATCHSTATS_STORE_CAPACITY_BYTES", "1024");
        map.insert("WATCHSTATS_MAX_UPLOAD_BYTES", "2048");
        map.insert("WATCHSTATS_UTC_OFFSET_MINUTES", "-300");
        map.insert("WATCHSTATS_LEGACY_FIRST_EVENT", "false");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Production);
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.store_dir.to_str(), Some("/tmp/stats"));
        assert_eq!(cfg.store_capacity_bytes, 1024);
        assert_eq!(cfg.max_upload_bytes, 2048);
        assert_eq!(cfg.utc_offset_minutes, -300);
        assert!(!cfg.legacy_first_event);
    }

    #[test]
    fn build_app_config_rejects_non_numeric_capacity() {
        let mut map = HashMap::new();
        map.insert("WATCHSTATS_STORE_CAPACITY_BYTES", "lots");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WATCHSTATS_STORE_CAPACITY_BYTES"),
            "expected InvalidEnvVar(WATCHSTATS_STORE_CAPACITY_BYTES), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_zero_capacity() {
        let mut map = HashMap::new();
        map.insert("WATCHSTATS_STORE_CAPACITY_BYTES", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WATCHSTATS_STORE_CAPACITY_BYTES"
        ));
    }

    #[test]
    fn build_app_config_rejects_offset_out_of_range() {
        let mut map = HashMap::new();
        map.insert("WATCHSTATS_UTC_OFFSET_MINUTES", "1440");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WATCHSTATS_UTC_OFFSET_MINUTES"),
            "expected InvalidEnvVar(WATCHSTATS_UTC_OFFSET_MINUTES), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_most_negative_offset() {
        let mut map = HashMap::new();
        map.insert("WATCHSTATS_UTC_OFFSET_MINUTES", "-2147483648");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WATCHSTATS_UTC_OFFSET_MINUTES"),
            "expected InvalidEnvVar(WATCHSTATS_UTC_OFFSET_MINUTES), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_accepts_offset_bounds() {
        for raw in ["-1439", "1439"] {
            let mut map = HashMap::new();
            map.insert("WATCHSTATS_UTC_OFFSET_MINUTES", raw);
            let cfg = build_app_config(lookup_from_map(&map)).unwrap();
            assert_eq!(cfg.utc_offset_minutes.to_string(), raw);
        }
    }

    #[test]
    fn build_app_config_rejects_garbage_bool() {
        let mut map = HashMap::new();
        map.insert("WATCHSTATS_LEGACY_FIRST_EVENT", "maybe");
        let result = build_app_config(lookup_from_map(&map));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WATCHSTATS_LEGACY_FIRST_EVENT"
        ));
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" yes "), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool(""), None);
    }
}
