use serde_json::Value;

use super::{TranslationError, TranslationProvider};

/// Public endpoint of the keyless Google Translate web API.
pub const DEFAULT_BASE_URL: &str = "https://translate.googleapis.com";

const TRANSLATE_PATH: &str = "/translate_a/single";

/// [`TranslationProvider`] backed by Google Translate's `client=gtx` endpoint.
///
/// No API key is involved; the endpoint is rate limited per client address,
/// which is acceptable for one headline list per refresh.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslator {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Uses another endpoint host, e.g. a mock server in tests.
    ///
    /// Only HTTPS is accepted, except for `localhost`/`127.0.0.1`.
    pub fn with_base_url(
        client: reqwest::Client,
        base_url: &str,
    ) -> Result<Self, TranslationError> {
        let base = base_url.trim_end_matches('/');
        url::Url::parse(base).map_err(|e| TranslationError::InvalidBaseUrl(e.to_string()))?;

        if !base.starts_with("https://") {
            let is_localhost =
                base.starts_with("http://127.0.0.1") || base.starts_with("http://localhost");
            if !is_localhost {
                tracing::error!(base_url = %base, "Rejecting non-HTTPS translation base URL");
                return Err(TranslationError::InsecureBaseUrl);
            }
            tracing::warn!(base_url = %base, "Using non-HTTPS translation base URL (localhost only)");
        }

        Ok(Self {
            client,
            base_url: base.to_string(),
        })
    }
}

impl TranslationProvider for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        let url = url::Url::parse_with_params(
            &format!("{}{}", self.base_url, TRANSLATE_PATH),
            &[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| TranslationError::InvalidBaseUrl(e.to_string()))?;

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(TranslationError::HttpStatus(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        let value: Value = serde_json::from_slice(&body)
            .map_err(|e| TranslationError::Malformed(e.to_string()))?;
        extract_translation(&value)
    }
}

/// Joins the translated sentence segments of a `translate_a/single` response.
///
/// The payload is positional JSON: `[[["<translated>", "<original>", ...], ...], ...]`.
fn extract_translation(value: &Value) -> Result<String, TranslationError> {
    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslationError::Malformed("missing sentence list".to_string()))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if text.trim().is_empty() {
        return Err(TranslationError::Empty);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn translator(server: &MockServer) -> GoogleTranslator {
        GoogleTranslator::with_base_url(reqwest::Client::new(), &server.uri()).unwrap()
    }

    #[test]
    fn test_extract_joins_segments() {
        let value = json!([
            [
                ["파리 패션위크. ", "Paris Fashion Week. ", null, null, 10],
                ["새 컬렉션", "New collection", null, null, 10]
            ],
            null,
            "en"
        ]);
        assert_eq!(
            extract_translation(&value).unwrap(),
            "파리 패션위크. 새 컬렉션"
        );
    }

    #[test]
    fn test_extract_rejects_unexpected_shape() {
        assert!(matches!(
            extract_translation(&json!({"error": "nope"})),
            Err(TranslationError::Malformed(_))
        ));
        assert!(matches!(
            extract_translation(&json!([[], null, "en"])),
            Err(TranslationError::Empty)
        ));
    }

    #[tokio::test]
    async fn test_translate_sends_expected_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("client", "gtx"))
            .and(query_param("sl", "auto"))
            .and(query_param("tl", "ko"))
            .and(query_param("q", "Street Style & More"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                [["스트리트 스타일 & 더보기", "Street Style & More", null, null, 10]],
                null,
                "en"
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let result = translator(&server)
            .translate("Street Style & More", "auto", "ko")
            .await
            .unwrap();
        assert_eq!(result, "스트리트 스타일 & 더보기");
    }

    #[tokio::test]
    async fn test_translate_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let result = translator(&server).translate("x", "auto", "ko").await;
        assert!(matches!(result, Err(TranslationError::HttpStatus(429))));
    }

    #[tokio::test]
    async fn test_translate_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>captcha</html>"))
            .mount(&server)
            .await;

        let result = translator(&server).translate("x", "auto", "ko").await;
        assert!(matches!(result, Err(TranslationError::Malformed(_))));
    }

    #[test]
    fn test_http_base_url_rejected() {
        let result = GoogleTranslator::with_base_url(reqwest::Client::new(), "http://evil.com");
        assert!(matches!(result, Err(TranslationError::InsecureBaseUrl)));
    }

    #[test]
    fn test_https_base_url_trailing_slash_trimmed() {
        let translator =
            GoogleTranslator::with_base_url(reqwest::Client::new(), "https://mirror.example.com/")
                .unwrap();
        assert_eq!(translator.base_url, "https://mirror.example.com");
    }

    #[test]
    fn test_garbage_base_url_rejected() {
        let result = GoogleTranslator::with_base_url(reqwest::Client::new(), "not a url");
        assert!(matches!(result, Err(TranslationError::InvalidBaseUrl(_))));
    }
}
