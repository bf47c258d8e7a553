//! Formatting of result and diagnostic lines.
//!
//! The primary stream carries one ready-to-run `mysql` invocation per
//! successful check. The diagnostic stream carries a colorized summary per
//! file plus an error line per failure. Colors come from `colored`, which
//! disables itself when the stream is not a terminal.

use colored::Colorize;

use crate::check::{CheckError, ConnectionParams};
use crate::resolve::DEFAULT_PORT;

/// Shell-quote one argument. `try_quote` only fails on interior nul bytes,
/// which cannot survive on a command line anyway, so they are stripped.
fn quote(raw: &str) -> String {
    match shlex::try_quote(raw) {
        Ok(quoted) => quoted.into_owned(),
        Err(_) => {
            let cleaned: String = raw.chars().filter(|&c| c != '\0').collect();
            shlex::try_quote(&cleaned)
                .map(|quoted| quoted.into_owned())
                .unwrap_or_default()
        }
    }
}

/// Ready-to-run mysql client invocation for a successful check. The port
/// flag is omitted when the server listens on the default port.
pub fn client_command(params: &ConnectionParams) -> String {
    let port = if params.port == DEFAULT_PORT {
        String::new()
    } else {
        format!(" --port={}", params.port)
    };
    format!(
        "mysql --host={} -u{} -p{}{} {}",
        quote(&params.host),
        quote(&params.username),
        quote(&params.password),
        port,
        quote(&params.database),
    )
}

/// One-line audit summary. The password is printed in the clear on purpose:
/// reporting which credentials work is the whole point of the tool.
pub fn summary_line(params: &ConnectionParams, passed: bool) -> String {
    let tag = if passed { "PASS".green() } else { "FAIL".red() };
    let detail = format!(
        "check host={:?}, username={:?}, password={:?}, database={:?}, port={}:",
        params.host, params.username, params.password, params.database, params.port
    );
    format!("{} {}", detail.cyan(), tag)
}

pub fn error_line(error: &CheckError) -> String {
    error.to_string().red().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ConnectionParams {
        ConnectionParams {
            host: "localhost".to_string(),
            port: 3306,
            username: "root".to_string(),
            password: "".to_string(),
            database: "wp".to_string(),
        }
    }

    #[test]
    fn test_command_omits_default_port() {
        let cmd = client_command(&params());
        assert_eq!(cmd, r#"mysql --host=localhost -uroot -p"" wp"#);
        assert!(!cmd.contains("--port"));
    }

    #[test]
    fn test_command_includes_non_default_port() {
        let mut p = params();
        p.port = 3307;
        assert!(client_command(&p).contains("--port=3307"));
    }

    #[test]
    fn test_command_quotes_unsafe_values() {
        let mut p = params();
        p.password = "pa ss".to_string();
        p.database = "my db".to_string();
        let cmd = client_command(&p);
        assert!(cmd.contains(r#"-p"pa ss""#), "password not quoted: {cmd}");
        assert!(cmd.contains(r#""my db""#), "database not quoted: {cmd}");
    }

    #[test]
    fn test_quote_strips_nul_bytes() {
        assert_eq!(quote("a\0b"), "ab");
    }

    #[test]
    fn test_summary_line_pass_and_fail() {
        colored::control::set_override(false);
        let line = summary_line(&params(), true);
        assert_eq!(
            line,
            r#"check host="localhost", username="root", password="", database="wp", port=3306: PASS"#
        );
        let line = summary_line(&params(), false);
        assert!(line.ends_with("FAIL"));
    }

    #[test]
    fn test_summary_line_shows_password_in_clear() {
        colored::control::set_override(false);
        let mut p = params();
        p.password = "hunter2".to_string();
        assert!(summary_line(&p, false).contains(r#"password="hunter2""#));
    }
}
