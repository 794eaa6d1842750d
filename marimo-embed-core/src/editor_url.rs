use url::Url;

/// Proxy sub-path under the host's base URL where the marimo server is
/// mounted. Fixed contract with the external proxy; the probe checks the
/// same location.
pub const EDITOR_PROXY_PATH: &str = "marimo/";

/// Build the URL the embedded frame loads for `file_path`.
///
/// Produces `<base_url>marimo/?file=<encoded path>`. The file path is
/// percent-encoded as a single query value, so paths containing spaces,
/// `#`, `?`, or non-ASCII characters survive as one unambiguous parameter.
/// Pure construction: whether the result is reachable is the probe's and
/// the frame's concern.
///
/// Base URLs with a path component are expected to end with `/` (the
/// host's connection settings provide them that way).
pub fn build_editor_url(base_url: &str, file_path: &str) -> Result<Url, String> {
    let base = Url::parse(base_url)
        .map_err(|e| format!("Invalid server base URL '{}': {}", base_url, e))?;
    let mut editor_url = base.join(EDITOR_PROXY_PATH).map_err(|e| {
        format!(
            "Failed to resolve editor path against '{}': {}",
            base_url, e
        )
    })?;
    editor_url
        .query_pairs_mut()
        .append_pair("file", file_path);
    Ok(editor_url)
}
