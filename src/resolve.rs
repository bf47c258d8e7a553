//! Host/port resolution for extracted `DB_HOST` values.

use std::path::Path;

pub const DEFAULT_PORT: u16 = 3306;

/// Hostnames that conventionally mean "this machine" in a WordPress config,
/// including the service names common in docker-compose setups.
const LOCAL_ALIASES: &[&str] = &["localhost", "127.0.0.1", "db", "database", "mysql"];

/// Split a `host:port` value on the *last* colon.
///
/// WordPress allows `DB_HOST` values like `localhost:3307`. If the trailing
/// segment parses as a nonzero port it is used; otherwise the whole string
/// is the host and the port defaults to 3306. Splitting on the last colon
/// misreads bracketless IPv6 literals — known limitation, kept as-is.
pub fn split_host_port(raw: &str) -> (String, u16) {
    if let Some((host, tail)) = raw.rsplit_once(':') {
        // Port 0 is not a listening port; treat it like any other
        // unparsable tail.
        match tail.parse::<u16>() {
            Ok(port) if port > 0 => return (host.to_string(), port),
            _ => {}
        }
    }
    (raw.to_string(), DEFAULT_PORT)
}

/// Replace a local-alias host with the parent directory name of the config
/// file, when enabled.
///
/// Useful when auditing a dump of many sites: each site's config says
/// `localhost`, but the dump directory is named after the host it came from.
pub fn apply_dirname_alias(host: String, use_dirname: bool, file_path: &Path) -> String {
    if !use_dirname || !LOCAL_ALIASES.contains(&host.to_lowercase().as_str()) {
        return host;
    }
    // Canonicalize so relative paths still yield a meaningful parent name.
    let resolved = std::fs::canonicalize(file_path).unwrap_or_else(|_| file_path.to_path_buf());
    match resolved
        .parent()
        .and_then(|dir| dir.file_name())
        .and_then(|name| name.to_str())
    {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => host,
    }
}
