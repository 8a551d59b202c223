//! r6s.cn profile endpoint: one form POST, JSON back.

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use super::{trim_base_url, Capabilities, RawPayload, SourceAdapter, R6SCN};
use crate::cli::types::Platform;
use crate::core::http::r6scn_header_map;
use crate::error::{R6sError, Result};

pub const R6SCN_BASE_URL: &str = "https://api.r6s.cn";
const PROFILE_PATH: &str = "/apistats/stats/getprofilesbyuplayname";

pub struct R6scnSource {
    client: Client,
    base_url: String,
}

impl R6scnSource {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: R6SCN_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = trim_base_url(url);
        self
    }
}

/// The endpoint answers 200 with an empty object (or an error blob) for
/// unknown names.
fn is_not_found(body: &Value) -> bool {
    match body.as_object() {
        Some(map) => map.is_empty() || (!map.contains_key("username") && !map.contains_key("StatCR")),
        None => true,
    }
}

#[async_trait]
impl SourceAdapter for R6scnSource {
    fn name(&self) -> &'static str {
        R6SCN
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            operator_breakdown: true,
            recent_matches: true,
        }
    }

    async fn fetch(&self, identifier: &str, platform: Option<Platform>) -> Result<RawPayload> {
        let url = format!("{}{PROFILE_PATH}", self.base_url);
        debug!("{R6SCN}: POST {url} for {identifier}");

        let response = self
            .client
            .post(&url)
            .headers(r6scn_header_map())
            .form(&[("params", identifier)])
            .send()
            .await
            .map_err(|e| R6sError::from_transport(R6SCN, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            // This endpoint signals nothing useful through its status codes.
            return Err(R6sError::Upstream {
                source_name: R6SCN.to_string(),
                status: status.as_u16(),
                retryable: true,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| R6sError::from_transport(R6SCN, e))?;

        if is_not_found(&body) {
            return Err(R6sError::NotFound {
                username: identifier.to_string(),
            });
        }

        Ok(RawPayload::new(
            R6SCN,
            identifier,
            platform.unwrap_or_default(),
            body,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{body_string, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    async fn source_for(server: &MockServer) -> R6scnSource {
        R6scnSource::new(Client::new()).with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_fetch_posts_form_and_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PROFILE_PATH))
            .and(header("user-agent", "PostmanRuntime/7.30.0"))
            .and(header("referer", "https://test.r6s.cn"))
            .and(body_string("params=Ash"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "username": "Ash",
                "StatCR": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let raw = source_for(&server).await.fetch("Ash", None).await.unwrap();
        assert_eq!(raw.source, "r6scn");
        assert_eq!(raw.platform, Platform::Pc);
        assert_eq!(raw.body["username"], "Ash");
    }

    #[tokio::test]
    async fn test_empty_object_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let err = source_for(&server).await.fetch("ghost", None).await.unwrap_err();
        assert!(matches!(err, R6sError::NotFound { username } if username == "ghost"));
    }

    #[tokio::test]
    async fn test_non_200_is_retryable_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = source_for(&server).await.fetch("Ash", None).await.unwrap_err();
        assert!(matches!(err, R6sError::Upstream { status: 502, retryable: true, .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_invalid_json_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = source_for(&server).await.fetch("Ash", None).await.unwrap_err();
        assert!(matches!(err, R6sError::MalformedResponse { .. }));
    }

    #[test]
    fn test_capabilities() {
        let caps = R6scnSource::new(Client::new()).capabilities();
        assert!(caps.operator_breakdown);
        assert!(caps.recent_matches);
    }
}
