//! Web login flow driven through an intercepted browser session.

use std::path::Path;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chromiumoxide::cdp::browser_protocol::network::{
    EventResponseReceived, GetResponseBodyParams,
};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::{BrowserError, BrowserSession};
use crate::config::Proxy;

/// Endpoint whose response carries the login signature.
pub const LOGIN_ENDPOINT: &str = "https://api.sograph.xyz/api/login/web2";

/// Fixed wait after navigation for the page's own network activity to settle.
pub const PAGE_SETTLE_DELAY: Duration = Duration::from_secs(3);

/// Runs the web login flow and returns the extracted signature.
///
/// Launches a scoped browser session (optionally routed through `proxy`),
/// navigates to `auth_url`, waits for the page to settle, then scans the
/// intercepted responses for the login endpoint. Returns an empty string
/// when no matching response was captured or the signature field is absent.
///
/// The browser process is terminated before returning, on every path.
///
/// # Errors
///
/// Returns an error if the session cannot be launched, navigation fails,
/// or a captured response body cannot be decoded.
pub async fn login_in_browser(
    executable: impl AsRef<Path>,
    auth_url: &str,
    proxy: Option<&Proxy>,
) -> Result<String, BrowserError> {
    let session = BrowserSession::launch(executable, proxy).await?;
    let outcome = drive_login(&session, auth_url).await;
    session.close().await;
    outcome
}

/// Navigates and scans captured traffic inside an already-running session.
async fn drive_login(session: &BrowserSession, auth_url: &str) -> Result<String, BrowserError> {
    let page = session.new_emulated_page().await?;

    // Subscribe before navigating so no response is missed.
    let mut responses = page.event_listener::<EventResponseReceived>().await?;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let collector = tokio::spawn(async move {
        while let Some(event) = responses.next().await {
            if tx.send(event).is_err() {
                break;
            }
        }
    });

    debug!("Navigating to auth URL");
    page.goto(auth_url).await?;

    // Crude settle point: the page fires its login calls asynchronously
    // right after load. A page slower than this window yields no signature.
    tokio::time::sleep(PAGE_SETTLE_DELAY).await;

    collector.abort();

    let mut bodies = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if event.response.url == LOGIN_ENDPOINT {
            debug!("Captured login endpoint response");
            bodies.push(response_body(&page, &event).await?);
        }
    }

    let signature = signature_from_bodies(&bodies)?;
    if signature.is_empty() {
        info!("No signature captured during login flow");
    }

    Ok(signature)
}

/// Fetches a captured response body, decoding it when base64-encoded.
async fn response_body(
    page: &Page,
    event: &EventResponseReceived,
) -> Result<String, BrowserError> {
    let returns = page
        .execute(GetResponseBodyParams::new(event.request_id.clone()))
        .await?
        .result;

    if returns.base64_encoded {
        let bytes = BASE64
            .decode(returns.body.as_bytes())
            .map_err(|e| BrowserError::BodyDecode(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| BrowserError::BodyDecode(e.to_string()))
    } else {
        Ok(returns.body)
    }
}

/// Extracts the signature from the captured bodies; the last capture wins.
fn signature_from_bodies<I, S>(bodies: I) -> Result<String, BrowserError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut signature = String::new();
    for body in bodies {
        signature = extract_signature(body.as_ref())?;
    }
    Ok(signature)
}

/// Pulls `data.signature` out of a JSON body, defaulting to empty when the
/// field path is absent.
fn extract_signature(body: &str) -> Result<String, BrowserError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    Ok(value
        .pointer("/data/signature")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_signature_present() {
        let body = r#"{"data": {"signature": "abc123"}}"#;
        assert_eq!(extract_signature(body).unwrap(), "abc123");
    }

    #[test]
    fn test_extract_signature_missing_field_defaults() {
        assert_eq!(extract_signature(r#"{"data": {}}"#).unwrap(), "");
        assert_eq!(extract_signature("{}").unwrap(), "");
    }

    #[test]
    fn test_extract_signature_non_string_defaults() {
        let body = r#"{"data": {"signature": {}}}"#;
        assert_eq!(extract_signature(body).unwrap(), "");
    }

    #[test]
    fn test_extract_signature_invalid_json_fails() {
        assert!(extract_signature("not json").is_err());
    }

    #[test]
    fn test_no_captures_yields_default() {
        let bodies: [&str; 0] = [];
        assert_eq!(signature_from_bodies(bodies).unwrap(), "");
    }

    #[test]
    fn test_last_capture_wins() {
        let bodies = [
            r#"{"data": {"signature": "first"}}"#,
            r#"{"data": {"signature": "second"}}"#,
        ];
        assert_eq!(signature_from_bodies(bodies).unwrap(), "second");
    }
}
