use std::time::Duration;

use ureq::Agent;
use url::Url;

use crate::editor_url::EDITOR_PROXY_PATH;

const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Check whether the marimo editor service answers at `base_url`.
///
/// Sends a single HEAD request (no body transfer, no caching) to the
/// `marimo/` sub-path. A 200 or 404 response counts as reachable: a 404
/// still proves the host's routing layer answered, and the editor endpoint
/// itself may live one path segment deeper. Any transport-level failure
/// (connection refused, timeout, DNS) is inconclusive rather than
/// negative, so the probe reports available and leaves the real verdict to
/// the frame's own load outcome. One attempt, no retry, no caching of the
/// result across views.
pub async fn probe_editor_service(base_url: &str) -> bool {
    let base = base_url.to_string();
    match tokio::task::spawn_blocking(move || probe_blocking(&base)).await {
        Ok(reachable) => reachable,
        Err(e) => {
            log::warn!("Availability probe task failed: {}", e);
            true
        }
    }
}

fn probe_blocking(base_url: &str) -> bool {
    let probe_url = match Url::parse(base_url).and_then(|b| b.join(EDITOR_PROXY_PATH)) {
        Ok(u) => u,
        Err(e) => {
            // Inconclusive: a malformed base URL is reported properly by
            // the URL builder during view initialization.
            log::warn!("Cannot build probe URL from '{}': {}", base_url, e);
            return true;
        }
    };

    let agent: Agent = Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(Some(PROBE_TIMEOUT))
        .build()
        .into();

    match agent
        .head(probe_url.as_str())
        .header("Cache-Control", "no-cache")
        .call()
    {
        Ok(response) => {
            let status = response.status().as_u16();
            if status == 200 || status == 404 {
                true
            } else {
                log::warn!(
                    "Editor service at {} answered with status {}",
                    probe_url,
                    status
                );
                false
            }
        }
        Err(e) => {
            log::warn!("Editor service probe inconclusive for {}: {}", probe_url, e);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Answer exactly one HTTP request with the given status line, then
    /// close. Returns the base URL to probe.
    fn one_shot_server(status_line: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 2048];
                // Read the request head; a single read is enough for a
                // body-less HEAD request on loopback.
                let _ = stream.read(&mut buf);
                let response = format!("{}\r\nContent-Length: 0\r\n\r\n", status_line);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://127.0.0.1:{}/", port)
    }

    #[tokio::test]
    async fn ok_response_is_reachable() {
        let base = one_shot_server("HTTP/1.1 200 OK");
        assert!(probe_editor_service(&base).await);
    }

    #[tokio::test]
    async fn not_found_still_proves_the_router_answered() {
        let base = one_shot_server("HTTP/1.1 404 Not Found");
        assert!(probe_editor_service(&base).await);
    }

    #[tokio::test]
    async fn server_error_is_negative() {
        let base = one_shot_server("HTTP/1.1 500 Internal Server Error");
        assert!(!probe_editor_service(&base).await);
    }

    #[tokio::test]
    async fn connection_refused_is_inconclusive_positive() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let base = format!("http://127.0.0.1:{}/", port);
        assert!(probe_editor_service(&base).await);
    }

    #[tokio::test]
    async fn malformed_base_url_is_inconclusive_positive() {
        assert!(probe_editor_service("not a url").await);
    }
}
