use serde::{Deserialize, Serialize};

pub mod cli;
pub mod env_config;
pub mod merge;
pub mod toml_config;
#[cfg(test)]
mod tests;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Path of the newline-delimited list of config files; "-" reads stdin.
    pub input: String,
    /// Where successful client commands are written; "-" writes stdout.
    /// Diagnostics always go to stderr regardless of this setting.
    pub output: String,
    /// Bounded wait for each connection attempt, in seconds.
    pub connection_timeout_secs: u64,
    /// Replace local-alias hosts with the config file's parent directory name.
    pub use_dirname_instead_of_localhost: bool,
    /// Maximum number of files checked concurrently.
    pub workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: "-".to_string(),
            output: "-".to_string(),
            connection_timeout_secs: 15,
            use_dirname_instead_of_localhost: false,
            workers: default_workers(),
        }
    }
}

/// Host logical CPU count, falling back to 1 when it cannot be determined.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.workers == 0 {
            anyhow::bail!("Config error: workers cannot be 0");
        }
        if self.workers > 1024 {
            anyhow::bail!(
                "Config error: workers unreasonably large: {} (max 1024)",
                self.workers
            );
        }
        if self.connection_timeout_secs == 0 {
            anyhow::bail!("Config error: connection timeout must be at least 1 second");
        }
        Ok(())
    }
}
