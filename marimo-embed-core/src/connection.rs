use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Connection details for the notebook server the marimo proxy is mounted
/// on. Read once per view initialization and treated as an immutable
/// snapshot for the view's lifetime.
///
/// The `#[serde(default)]` on the struct ensures that fields missing from
/// an existing file fall back to their `Default` values, so the file can
/// grow without breaking older configs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConnection {
    /// Base URL of the server, ending with `/`.
    pub base_url: String,
}

impl Default for ServerConnection {
    fn default() -> Self {
        ServerConnection {
            base_url: String::from("http://localhost:8888/"),
        }
    }
}

/// Location of the extension's own connection file, for hosts that do not
/// hand over their connection configuration directly.
pub fn default_connection_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("marimo-embed").join("connection.json"))
}

/// Read a connection file. Errors are surfaced to the caller so a broken
/// configuration shows up in the view's diagnostic surface instead of
/// being silently replaced.
pub fn load_from(path: &Path) -> Result<ServerConnection, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read connection file {:?}: {}", path, e))?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse connection file {:?}: {}", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_localhost() {
        assert_eq!(ServerConnection::default().base_url, "http://localhost:8888/");
    }

    #[test]
    fn load_from_reads_the_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("connection.json");
        std::fs::write(&path, r#"{"base_url": "http://10.0.0.5:9999/"}"#).unwrap();
        let connection = load_from(&path).unwrap();
        assert_eq!(connection.base_url, "http://10.0.0.5:9999/");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("connection.json");
        std::fs::write(&path, "{}").unwrap();
        let connection = load_from(&path).unwrap();
        assert_eq!(connection.base_url, "http://localhost:8888/");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.contains("Failed to read connection file"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("connection.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = load_from(&path).unwrap_err();
        assert!(err.contains("Failed to parse connection file"));
    }
}
