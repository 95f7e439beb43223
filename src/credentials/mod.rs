//! Credential extraction from Cursor's local state database
//!
//! Cursor keeps its workbench state in a single-file SQLite database
//! (`state.vscdb`). The user ID lives inside a JSON blob under the statsig
//! bootstrap key; the access token is stored as a plain string.

mod state_db;

use std::path::{Path, PathBuf};

use thiserror::Error;

use state_db::StateDb;

const KEY_STATSIG_BOOTSTRAP: &str = "workbench.experiments.statsigBootstrap";
const KEY_ACCESS_TOKEN: &str = "cursorAuth/accessToken";
const KEY_CACHED_EMAIL: &str = "cursorAuth/cachedEmail";
const KEY_MEMBERSHIP: &str = "cursorAuth/stripeMembershipType";

/// Environment variable overriding the Cursor data directory
pub const DATA_DIR_ENV: &str = "CURSOR_DATA_DIR";

/// Errors that can occur while extracting credentials
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("state database not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read state database: {0}")]
    Read(#[from] rusqlite::Error),

    #[error("could not extract {0} from state database")]
    MissingCredential(&'static str),
}

/// Credentials read from the local database, valid for one run
#[derive(Debug, Clone)]
pub struct CursorCredentials {
    pub user_id: String,
    pub access_token: String,
    pub email: Option<String>,
    pub membership: Option<String>,
}

/// Default location of Cursor's state database for the current platform.
///
/// `CURSOR_DATA_DIR` overrides the data directory when set.
pub fn state_db_path() -> PathBuf {
    let data_dir = match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => dirs::config_dir().unwrap_or_default().join("Cursor"),
    };

    data_dir
        .join("User")
        .join("globalStorage")
        .join("state.vscdb")
}

/// Extract credentials from the state database at `path`.
///
/// Single lookup attempt per field, no retries. A malformed bootstrap blob is
/// treated the same as a missing user ID rather than surfaced as a parse
/// error.
pub fn extract(path: &Path) -> Result<CursorCredentials, CredentialError> {
    if !path.exists() {
        return Err(CredentialError::NotFound(path.to_path_buf()));
    }

    let db = StateDb::open(path)?;

    let user_id = db
        .get(KEY_STATSIG_BOOTSTRAP)?
        .and_then(|raw| user_id_from_bootstrap(&raw))
        .ok_or(CredentialError::MissingCredential("user ID"))?;

    let access_token = db
        .get(KEY_ACCESS_TOKEN)?
        .ok_or(CredentialError::MissingCredential("access token"))?;

    let email = db.get(KEY_CACHED_EMAIL)?;
    let membership = db.get(KEY_MEMBERSHIP)?;

    tracing::debug!("Extracted credentials for user {}", user_id);

    Ok(CursorCredentials {
        user_id,
        access_token,
        email,
        membership,
    })
}

/// Pull `user.userID` out of the statsig bootstrap blob
fn user_id_from_bootstrap(raw: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    value
        .get("user")?
        .get("userID")?
        .as_str()
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture_db(entries: &[(&str, &str)]) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.vscdb");
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute(
            "CREATE TABLE ItemTable (key TEXT UNIQUE ON CONFLICT REPLACE, value BLOB)",
            [],
        )
        .unwrap();
        for (key, value) in entries {
            conn.execute(
                "INSERT INTO ItemTable (key, value) VALUES (?1, ?2)",
                [key, value],
            )
            .unwrap();
        }
        (dir, path)
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.vscdb");
        let err = extract(&path).unwrap_err();
        assert!(matches!(err, CredentialError::NotFound(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_extract_valid() {
        let bootstrap = r#"{"user":{"userID":"auth0|user_01ABC"},"time":123}"#;
        let (_dir, path) = fixture_db(&[
            (KEY_STATSIG_BOOTSTRAP, bootstrap),
            (KEY_ACCESS_TOKEN, "eyJhbGciOiJSUzI1NiJ9.payload.sig"),
            (KEY_CACHED_EMAIL, "user@example.com"),
            (KEY_MEMBERSHIP, "pro"),
        ]);

        let creds = extract(&path).unwrap();
        assert_eq!(creds.user_id, "auth0|user_01ABC");
        assert_eq!(creds.access_token, "eyJhbGciOiJSUzI1NiJ9.payload.sig");
        assert_eq!(creds.email.as_deref(), Some("user@example.com"));
        assert_eq!(creds.membership.as_deref(), Some("pro"));
    }

    #[test]
    fn test_optional_fields_absent() {
        let bootstrap = r#"{"user":{"userID":"u1"}}"#;
        let (_dir, path) = fixture_db(&[
            (KEY_STATSIG_BOOTSTRAP, bootstrap),
            (KEY_ACCESS_TOKEN, "tok"),
        ]);

        let creds = extract(&path).unwrap();
        assert_eq!(creds.user_id, "u1");
        assert_eq!(creds.access_token, "tok");
        assert!(creds.email.is_none());
        assert!(creds.membership.is_none());
    }

    #[test]
    fn test_bootstrap_missing_user_id() {
        let (_dir, path) = fixture_db(&[
            (KEY_STATSIG_BOOTSTRAP, r#"{"user":{}}"#),
            (KEY_ACCESS_TOKEN, "tok"),
        ]);

        let err = extract(&path).unwrap_err();
        assert!(matches!(err, CredentialError::MissingCredential("user ID")));
    }

    #[test]
    fn test_bootstrap_malformed_json() {
        let (_dir, path) = fixture_db(&[
            (KEY_STATSIG_BOOTSTRAP, "not json at all {"),
            (KEY_ACCESS_TOKEN, "tok"),
        ]);

        // Malformed JSON degrades to "missing", never a parse error
        let err = extract(&path).unwrap_err();
        assert!(matches!(err, CredentialError::MissingCredential("user ID")));
    }

    #[test]
    fn test_missing_access_token() {
        let (_dir, path) = fixture_db(&[(
            KEY_STATSIG_BOOTSTRAP,
            r#"{"user":{"userID":"u1"}}"#,
        )]);

        let err = extract(&path).unwrap_err();
        assert!(matches!(
            err,
            CredentialError::MissingCredential("access token")
        ));
    }

    #[test]
    fn test_state_db_path_env_override() {
        std::env::set_var(DATA_DIR_ENV, "/tmp/cursor-data");
        let path = state_db_path();
        std::env::remove_var(DATA_DIR_ENV);

        assert!(path.starts_with("/tmp/cursor-data"));
        assert!(path.ends_with("User/globalStorage/state.vscdb"));
    }
}
