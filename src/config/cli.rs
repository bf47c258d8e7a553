use clap::{ArgAction, Parser};

use crate::config::Config;

/// Audit WordPress config files by attempting the MySQL connections they
/// describe.
///
/// Reads one config-file path per line (e.g. piped from `fd 'wp-config\.php'`),
/// extracts the DB_* defines from each file, and tries to connect with the
/// extracted credentials. Working credentials are printed as ready-to-run
/// mysql commands; per-file summaries go to stderr.
#[derive(Debug, Parser)]
#[command(name = "wp-config-checker", version)]
pub struct Cli {
    /// File with one config path per line, or "-" for stdin
    #[arg(short, long)]
    pub input: Option<String>,

    /// Where to write successful client commands, or "-" for stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Connection timeout in seconds
    #[arg(short = 't', long = "connection-timeout", visible_alias = "timeout")]
    pub connection_timeout: Option<u64>,

    /// Replace local-alias hosts (localhost, 127.0.0.1, db, database, mysql)
    /// with the config file's parent directory name
    #[arg(short = 'D', long, action = ArgAction::SetTrue)]
    pub use_dirname_instead_of_localhost: bool,

    /// Negation of -D, for overriding a config file or env var
    #[arg(
        long,
        action = ArgAction::SetTrue,
        conflicts_with = "use_dirname_instead_of_localhost"
    )]
    pub no_use_dirname_instead_of_localhost: bool,

    /// Maximum number of parallel checks (default: logical CPU count)
    #[arg(short = 'p', long = "processes")]
    pub processes: Option<usize>,
}

impl Cli {
    /// Tri-state for the dirname flag: Some(true) when -D was given,
    /// Some(false) for the --no- form, None when neither was.
    fn dirname_override(&self) -> Option<bool> {
        if self.use_dirname_instead_of_localhost {
            Some(true)
        } else if self.no_use_dirname_instead_of_localhost {
            Some(false)
        } else {
            None
        }
    }

    /// Apply CLI flags onto a base Config. Flags are the highest-precedence
    /// layer, so anything given here wins over TOML and env vars.
    pub fn apply_to(&self, mut base: Config) -> Config {
        if let Some(v) = &self.input {
            base.input = v.clone();
        }
        if let Some(v) = &self.output {
            base.output = v.clone();
        }
        if let Some(v) = self.connection_timeout {
            base.connection_timeout_secs = v;
        }
        if let Some(v) = self.dirname_override() {
            base.use_dirname_instead_of_localhost = v;
        }
        if let Some(v) = self.processes {
            base.workers = v;
        }
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_flags() {
        let cli = Cli::parse_from(["wp-config-checker", "-i", "paths.txt", "-t", "5", "-p", "8", "-D"]);
        assert_eq!(cli.input.as_deref(), Some("paths.txt"));
        assert_eq!(cli.connection_timeout, Some(5));
        assert_eq!(cli.processes, Some(8));
        assert_eq!(cli.dirname_override(), Some(true));
    }

    #[test]
    fn test_parse_timeout_alias() {
        let cli = Cli::parse_from(["wp-config-checker", "--timeout", "30"]);
        assert_eq!(cli.connection_timeout, Some(30));
        let cli = Cli::parse_from(["wp-config-checker", "--connection-timeout", "30"]);
        assert_eq!(cli.connection_timeout, Some(30));
    }

    #[test]
    fn test_parse_negated_dirname_flag() {
        let cli = Cli::parse_from(["wp-config-checker", "--no-use-dirname-instead-of-localhost"]);
        assert_eq!(cli.dirname_override(), Some(false));
    }

    #[test]
    fn test_dirname_flags_conflict() {
        let result = Cli::try_parse_from([
            "wp-config-checker",
            "-D",
            "--no-use-dirname-instead-of-localhost",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_flags_leaves_defaults() {
        let cli = Cli::parse_from(["wp-config-checker"]);
        let base = Config::default();
        let workers = base.workers;
        let merged = cli.apply_to(base);
        assert_eq!(merged.input, "-");
        assert_eq!(merged.output, "-");
        assert_eq!(merged.connection_timeout_secs, 15);
        assert!(!merged.use_dirname_instead_of_localhost);
        assert_eq!(merged.workers, workers);
    }

    #[test]
    fn test_apply_to_overrides_base() {
        let cli = Cli::parse_from(["wp-config-checker", "-o", "results.txt", "-t", "3"]);
        let mut base = Config::default();
        base.connection_timeout_secs = 60;
        let merged = cli.apply_to(base);
        assert_eq!(merged.output, "results.txt");
        assert_eq!(merged.connection_timeout_secs, 3);
    }
}
