use crate::core::normalize::normalize;
use crate::core::throttle::Throttle;
use crate::domain::model::LookupRecord;
use crate::utils::error::{EtlError, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use std::time::Duration;
use tokio::sync::Mutex;

/// Client for the number-lookup service. One GET per number, token
/// authenticated, paced by a minimum interval between calls. Remote
/// failures are not retried here; errors carry the canonical number so the
/// operator can resume by re-running.
pub struct LookupClient {
    client: Client,
    base_url: String,
    token: String,
    throttle: Mutex<Throttle>,
}

impl LookupClient {
    pub fn new(base_url: String, token: String, interval: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url,
            token,
            throttle: Mutex::new(Throttle::new(interval)),
        }
    }

    /// Fetches the lookup record for one phone number. The number is
    /// normalized first; the lookup address is the base URL with the
    /// canonical number appended.
    pub async fn lookup(&self, raw_number: &str) -> Result<LookupRecord> {
        let number = normalize(raw_number);
        if number.is_empty() {
            return Err(EtlError::ProcessingError {
                message: format!("phone number '{}' contains no digits", raw_number),
            });
        }

        let url = format!("{}{}", self.base_url, number);

        self.throttle.lock().await.pace().await;

        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, format!("Token {}", self.token))
            .send()
            .await
            .map_err(|source| EtlError::LookupRequestError {
                number: number.clone(),
                source,
            })?;

        let status = response.status();
        tracing::debug!("Lookup response for [{}]: {}", number, status);
        if !status.is_success() {
            return Err(EtlError::LookupFailedError {
                number,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| EtlError::LookupRequestError {
                number: number.clone(),
                source,
            })?;

        serde_json::from_str(&body).map_err(|source| EtlError::MalformedResponseError {
            number: number.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer, interval_ms: u64) -> LookupClient {
        LookupClient::new(
            server.url("/v1/LRNLookup/"),
            "test-token".to_string(),
            Duration::from_millis(interval_ms),
        )
    }

    #[tokio::test]
    async fn test_lookup_sends_token_header_and_canonical_number() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/LRNLookup/5551234567")
                .header("authorization", "Token test-token");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"tn": "5551234567", "line_type": "0"}));
        });

        let client = client_for(&server, 1);
        let record = client.lookup("(555) 123-4567").await.unwrap();

        mock.assert();
        assert_eq!(record.tn(), Some("5551234567"));
    }

    #[tokio::test]
    async fn test_non_success_status_carries_the_number() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/LRNLookup/5551234567");
            then.status(500);
        });

        let client = client_for(&server, 1);
        let err = client.lookup("555-123-4567").await.unwrap_err();
        assert!(matches!(err, EtlError::LookupFailedError { status: 500, .. }));
        assert!(err.to_string().contains("5551234567"));
    }

    #[tokio::test]
    async fn test_malformed_body_carries_the_number() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/LRNLookup/5551234567");
            then.status(200).body("not json");
        });

        let client = client_for(&server, 1);
        let err = client.lookup("5551234567").await.unwrap_err();
        assert!(matches!(err, EtlError::MalformedResponseError { .. }));
        assert!(err.to_string().contains("5551234567"));
    }

    #[tokio::test]
    async fn test_unreachable_service_surfaces_as_request_error() {
        // Port 9 (discard) has no listener; the connect fails immediately.
        let client = LookupClient::new(
            "http://127.0.0.1:9/v1/LRNLookup/".to_string(),
            "test-token".to_string(),
            Duration::from_millis(1),
        );

        let err = client.lookup("555-123-4567").await.unwrap_err();
        assert!(matches!(err, EtlError::LookupRequestError { .. }));
        assert!(err.to_string().contains("5551234567"));
    }

    #[tokio::test]
    async fn test_number_without_digits_is_rejected_before_any_call() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/v1/LRNLookup/");
            then.status(200).json_body(serde_json::json!({}));
        });

        let client = client_for(&server, 1);
        let err = client.lookup("n/a").await.unwrap_err();
        assert!(matches!(err, EtlError::ProcessingError { .. }));
        assert_eq!(mock.hits(), 0);
    }
}
