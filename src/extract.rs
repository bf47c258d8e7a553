//! Best-effort extraction of `define('DB_*', ...)` statements from config
//! file text. This is pattern matching, not a PHP parser: values computed at
//! runtime or spanning quotes are invisible to it, which is fine for the
//! overwhelmingly common literal-string case.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

// Matches define('DB_KEY', 'value') with either quote style on either side.
// The value capture excludes quote characters, so it stops at the first one.
static DEFINE_DB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"define\(\s*['"](?P<key>DB_.+?)['"]\s*,\s*['"](?P<value>[^'"]+)"#).unwrap()
});

/// Collect every `DB_*` define in `text` into a key → value map.
///
/// Keys keep their `DB_` prefix exactly as captured. When the same key is
/// defined more than once the last occurrence wins. Zero matches is not an
/// error; the map is simply empty.
pub fn extract_defines(text: &str) -> HashMap<String, String> {
    DEFINE_DB_RE
        .captures_iter(text)
        .map(|caps| (caps["key"].to_string(), caps["value"].to_string()))
        .collect()
}
