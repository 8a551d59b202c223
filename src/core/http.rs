//! HTTP client construction and the header sets each upstream expects.

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONNECTION, CONTENT_TYPE, REFERER,
    USER_AGENT,
};
use reqwest::{Client, Proxy};

use crate::config::Settings;
use crate::Result;

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/110.0.0.0 Safari/537.36";
const R6SCN_USER_AGENT: &str = "PostmanRuntime/7.30.0";
const R6SCN_REFERER: &str = "https://test.r6s.cn";
/// Application id of the Siege client, sent with every account API call.
pub const UBI_APP_ID: &str = "3587dcbb-7f81-457c-9781-0e3f29f6f56a";

/// One client per process. Every request inherits the configured timeout
/// and proxy.
pub fn build_client(settings: &Settings) -> Result<Client> {
    let mut builder = Client::builder().timeout(settings.timeout);
    if let Some(proxy) = &settings.proxy {
        builder = builder.proxy(Proxy::all(proxy)?);
    }
    Ok(builder.build()?)
}

/// Headers the r6scn form endpoint accepts.
pub fn r6scn_header_map() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(USER_AGENT, HeaderValue::from_static(R6SCN_USER_AGENT));
    h.insert(REFERER, HeaderValue::from_static(R6SCN_REFERER));
    h.insert(ACCEPT, HeaderValue::from_static("*/*"));
    h.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    h.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded"),
    );
    h
}

/// Desktop browser identity for the HTML scrape.
pub fn browser_header_map() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    h.insert(ACCEPT, HeaderValue::from_static("text/html,application/xhtml+xml"));
    h
}

/// Session headers for the account API.
pub fn ubi_header_map(session_ticket: &str, session_id: &str) -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    h.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    h.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    h.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Ubi_v1 t={session_ticket}"))?,
    );
    h.insert(
        HeaderName::from_static("ubi-appid"),
        HeaderValue::from_static(UBI_APP_ID),
    );
    h.insert(
        HeaderName::from_static("ubi-sessionid"),
        HeaderValue::from_str(session_id)?,
    );
    Ok(h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_r6scn_headers() {
        let headers = r6scn_header_map();
        assert_eq!(headers[USER_AGENT], "PostmanRuntime/7.30.0");
        assert_eq!(headers[REFERER], "https://test.r6s.cn");
        assert_eq!(headers[CONTENT_TYPE], "application/x-www-form-urlencoded");
    }

    #[test]
    fn test_browser_headers() {
        let headers = browser_header_map();
        assert!(headers[USER_AGENT].to_str().unwrap().contains("Chrome/110"));
    }

    #[test]
    fn test_ubi_headers() {
        let headers = ubi_header_map("ticket", "session-1").unwrap();
        assert_eq!(headers[AUTHORIZATION], "Ubi_v1 t=ticket");
        assert_eq!(headers["ubi-sessionid"], "session-1");
        assert_eq!(headers["ubi-appid"], UBI_APP_ID);
    }

    #[test]
    fn test_ubi_headers_reject_control_characters() {
        assert!(ubi_header_map("bad\nticket", "s").is_err());
    }

    #[test]
    fn test_build_client_with_and_without_proxy() {
        let mut settings = Settings {
            timeout: Duration::from_secs(2),
            ..Settings::default()
        };
        assert!(build_client(&settings).is_ok());

        settings.proxy = Some("http://127.0.0.1:8080".to_string());
        assert!(build_client(&settings).is_ok());
    }
}
