use crate::config::Config;

// ---------------------------------------------------------------------------
// Helpers — use eprintln! because this runs before the logging system starts.
// ---------------------------------------------------------------------------

fn parse_env_num<T: std::str::FromStr>(key: &str) -> Option<T> {
    match std::env::var(key) {
        Ok(v) if !v.is_empty() => match v.parse::<T>() {
            Ok(n) => Some(n),
            Err(_) => {
                eprintln!(
                    "Warning: {} is set to {:?} but could not be parsed as a number; using default",
                    key, v
                );
                None
            }
        },
        _ => None,
    }
}

fn parse_bool_env(key: &str) -> Option<bool> {
    match std::env::var(key) {
        Ok(v) if !v.is_empty() => match v.to_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => {
                eprintln!(
                    "Warning: {} is set to {:?} but is not a recognized boolean \
                     (true/false/1/0/yes/no); using default",
                    key, v
                );
                None
            }
        },
        _ => None,
    }
}

/// Parse all environment variables and return a partial config to merge over
/// the TOML base. Only sets fields where the env var is actually present.
pub fn load_env_config() -> EnvConfig {
    EnvConfig {
        input: std::env::var("WPCHECK_INPUT").ok().filter(|s| !s.is_empty()),
        output: std::env::var("WPCHECK_OUTPUT").ok().filter(|s| !s.is_empty()),
        connection_timeout_secs: parse_env_num::<u64>("WPCHECK_CONNECTION_TIMEOUT"),
        use_dirname_instead_of_localhost: parse_bool_env("WPCHECK_USE_DIRNAME"),
        workers: parse_env_num::<usize>("WPCHECK_WORKERS"),
    }
}

/// All env var overrides (None = not set, don't override).
#[derive(Debug, Default)]
pub struct EnvConfig {
    pub input: Option<String>,
    pub output: Option<String>,
    pub connection_timeout_secs: Option<u64>,
    pub use_dirname_instead_of_localhost: Option<bool>,
    pub workers: Option<usize>,
}

impl EnvConfig {
    /// Apply env var overrides onto a base Config, returning the merged result.
    pub fn apply_to(self, mut base: Config) -> Config {
        if let Some(v) = self.input {
            base.input = v;
        }
        if let Some(v) = self.output {
            base.output = v;
        }
        if let Some(v) = self.connection_timeout_secs {
            base.connection_timeout_secs = v;
        }
        if let Some(v) = self.use_dirname_instead_of_localhost {
            base.use_dirname_instead_of_localhost = v;
        }
        if let Some(v) = self.workers {
            base.workers = v;
        }
        base
    }
}
