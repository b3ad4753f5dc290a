use futures::StreamExt;
use reqwest::header::USER_AGENT;
use thiserror::Error;

/// Identification sent when none is configured. Some feed hosts reject
/// requests with an empty or library-default agent.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

const MAX_FEED_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Errors that can occur while downloading a feed.
///
/// Every variant is user-visible: the front-end prints it in place of the
/// result list.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The configured feed URL could not be parsed
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Response body exceeded the 10MB size limit
    #[error("Response too large")]
    ResponseTooLarge,
}

/// Downloads a feed document.
///
/// Makes exactly one GET request; there are no retries. The `User-Agent`
/// header is always set, falling back to [`DEFAULT_USER_AGENT`] when
/// `user_agent` is blank.
///
/// # Errors
///
/// - [`FetchError::InvalidUrl`] - `url` is not an absolute URL
/// - [`FetchError::Network`] - connection or TLS errors
/// - [`FetchError::HttpStatus`] - non-2xx response
/// - [`FetchError::ResponseTooLarge`] - body exceeded 10MB
///
/// The body is decoded as UTF-8, replacing invalid sequences rather than
/// failing.
pub async fn fetch_feed(
    client: &reqwest::Client,
    url: &str,
    user_agent: &str,
) -> Result<String, FetchError> {
    let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

    let agent = match user_agent.trim() {
        "" => DEFAULT_USER_AGENT,
        agent => agent,
    };

    tracing::debug!(url = %parsed, "Fetching feed");
    let response = client
        .get(parsed)
        .header(USER_AGENT, agent)
        .send()
        .await
        .map_err(FetchError::Network)?;

    if !response.status().is_success() {
        tracing::warn!(url = %url, status = %response.status(), "Feed request rejected");
        return Err(FetchError::HttpStatus(response.status().as_u16()));
    }

    let bytes = read_limited_bytes(response, MAX_FEED_SIZE).await?;
    tracing::debug!(url = %url, bytes = bytes.len(), "Feed downloaded");

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
