/// Edge case and validation tests for config types and layering.
#[cfg(test)]
mod tests {
    use crate::config::env_config::EnvConfig;
    use crate::config::toml_config::load_toml_config;
    use crate::config::Config;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input, "-");
        assert_eq!(config.output, "-");
        assert_eq!(config.connection_timeout_secs, 15);
        assert!(!config.use_dirname_instead_of_localhost);
        assert!(config.workers >= 1);
    }

    #[test]
    fn test_toml_config_from_string() {
        let toml_str = r#"
input = "paths.txt"
connection_timeout_secs = 30
use_dirname_instead_of_localhost = true
workers = 4
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.input, "paths.txt");
        assert_eq!(config.connection_timeout_secs, 30);
        assert!(config.use_dirname_instead_of_localhost);
        assert_eq!(config.workers, 4);
        // Unset fields keep their defaults
        assert_eq!(config.output, "-");
    }

    #[test]
    fn test_toml_missing_file_returns_default() {
        use std::path::Path;
        let config = load_toml_config(Path::new("/nonexistent/path/wp-config-checker.toml")).unwrap();
        assert_eq!(config.input, "-");
        assert_eq!(config.connection_timeout_secs, 15);
    }

    #[test]
    fn test_env_apply_to_overrides() {
        let base = Config::default();
        let env = EnvConfig {
            connection_timeout_secs: Some(5),
            use_dirname_instead_of_localhost: Some(true),
            workers: Some(2),
            ..Default::default()
        };
        let merged = env.apply_to(base);
        assert_eq!(merged.connection_timeout_secs, 5);
        assert!(merged.use_dirname_instead_of_localhost);
        assert_eq!(merged.workers, 2);
    }

    #[test]
    fn test_env_apply_to_does_not_override_unset_fields() {
        let mut base = Config::default();
        base.input = "base.txt".to_string();
        base.connection_timeout_secs = 42;
        let env = EnvConfig::default();
        let merged = env.apply_to(base);
        assert_eq!(merged.input, "base.txt");
        assert_eq!(merged.connection_timeout_secs, 42);
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let mut config = Config::default();
        config.workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_huge_worker_count() {
        let mut config = Config::default();
        config.workers = 100_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.connection_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(Config::default().validate().is_ok());
    }
}
