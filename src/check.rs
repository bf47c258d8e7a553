//! Per-file connection check: read the config, derive parameters, attempt a
//! real MySQL connection.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use sqlx::mysql::MySqlConnectOptions;
use sqlx::{Connection, MySqlConnection};
use thiserror::Error;
use tracing::debug;

use crate::extract::extract_defines;
use crate::resolve::{apply_dirname_alias, split_host_port};

/// Everything needed to attempt one MySQL connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

impl ConnectionParams {
    /// Derive params from an extracted define map. Missing keys fall back to
    /// the WordPress installer defaults: localhost:3306, root, empty
    /// password, empty database.
    pub fn from_defines(
        defines: &HashMap<String, String>,
        use_dirname: bool,
        file_path: &Path,
    ) -> Self {
        let raw_host = defines
            .get("DB_HOST")
            .map(String::as_str)
            .unwrap_or("localhost");
        let (host, port) = split_host_port(raw_host);
        let host = apply_dirname_alias(host, use_dirname, file_path);
        Self {
            host,
            port,
            username: defines
                .get("DB_USER")
                .cloned()
                .unwrap_or_else(|| "root".to_string()),
            password: defines.get("DB_PASSWORD").cloned().unwrap_or_default(),
            database: defines.get("DB_NAME").cloned().unwrap_or_default(),
        }
    }
}

/// Per-file failure taxonomy. None of these abort the run; each is reported
/// on the diagnostic stream and counted as a FAIL for that file only.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Connect(#[from] sqlx::Error),
    #[error("connection attempt timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

/// Result of auditing one file.
#[derive(Debug)]
pub struct CheckOutcome {
    pub params: ConnectionParams,
    pub error: Option<CheckError>,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        self.error.is_none()
    }
}

/// Read `path`, extract credentials, and try to connect.
///
/// Always returns an outcome: failures (unreadable file, refused or timed
/// out connection, bad credentials) are captured in `error` rather than
/// propagated, so one bad file never takes down a bulk run. An unreadable
/// file still gets a summary line, built from all-default parameters.
pub async fn check_file(path: &Path, timeout: Duration, use_dirname: bool) -> CheckOutcome {
    let (defines, read_error) = match tokio::fs::read_to_string(path).await {
        Ok(text) => (extract_defines(&text), None),
        Err(source) => (
            HashMap::new(),
            Some(CheckError::Read {
                path: path.to_path_buf(),
                source,
            }),
        ),
    };
    let params = ConnectionParams::from_defines(&defines, use_dirname, path);
    debug!(
        "checking {}: {}@{}:{}/{}",
        path.display(),
        params.username,
        params.host,
        params.port,
        params.database
    );

    let error = match read_error {
        Some(err) => Some(err),
        None => try_connect(&params, timeout).await.err(),
    };
    CheckOutcome { params, error }
}

/// Success means the handshake completed and the server answers a ping.
async fn try_connect(params: &ConnectionParams, timeout: Duration) -> Result<(), CheckError> {
    let mut options = MySqlConnectOptions::new()
        .host(&params.host)
        .port(params.port)
        .username(&params.username)
        .password(&params.password);
    // An empty DB_NAME means "no database selected", not a database named "".
    if !params.database.is_empty() {
        options = options.database(&params.database);
    }

    // sqlx applies no connect timeout of its own for one-shot connections,
    // so the bounded wait lives here. Connect and ping share one deadline:
    // a check never waits longer than `timeout` in total.
    let deadline = tokio::time::Instant::now() + timeout;
    let mut conn = tokio::time::timeout_at(deadline, MySqlConnection::connect_with(&options))
        .await
        .map_err(|_| CheckError::Timeout(timeout))??;
    let ping = tokio::time::timeout_at(deadline, conn.ping())
        .await
        .map_err(|_| CheckError::Timeout(timeout));
    let _ = conn.close().await;
    ping??;
    Ok(())
}
