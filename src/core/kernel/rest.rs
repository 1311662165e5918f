use crate::core::errors::BbbError;
use crate::core::kernel::codec::{decode_body, ResponseFormat};
use crate::core::kernel::signer::{ChecksumSigner, Params};
use async_trait::async_trait;
use reqwest::{multipart, Client, Method};
use serde_json::Value;
use tracing::{instrument, trace};

/// File payload transmitted as the multipart part named `file` on upload
/// endpoints.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// Transport trait for executing one signed API call.
///
/// `ReqwestRest` is the production implementation; the trait exists so the
/// operation surface can be exercised against a mock transport in tests.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Sign, send, and normalize one request, returning the server's
    /// `response` mapping on success.
    async fn call(
        &self,
        method: Method,
        endpoint: &str,
        params: &Params,
        attachment: Option<Attachment>,
        format: ResponseFormat,
    ) -> Result<Value, BbbError>;
}

/// Configuration for the REST transport.
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL of the server, without the `/api` suffix.
    pub base_url: String,
    /// Service name for logging and tracing.
    pub service_name: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// User agent string to include in requests.
    pub user_agent: String,
}

impl RestClientConfig {
    pub fn new(base_url: String, service_name: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            service_name,
            timeout_seconds: 30,
            user_agent: "bbbx/0.1".to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for the production transport.
pub struct RestClientBuilder {
    config: RestClientConfig,
    signer: ChecksumSigner,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig, signer: ChecksumSigner) -> Self {
        Self { config, signer }
    }

    pub fn build(self) -> Result<ReqwestRest, BbbError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()?;

        Ok(ReqwestRest {
            client,
            config: self.config,
            signer: self.signer,
        })
    }
}

/// Implementation of [`RestClient`] using reqwest.
///
/// Holds no mutable state; the inner `reqwest::Client` pools connections,
/// so one instance serves concurrent in-flight calls.
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
    signer: ChecksumSigner,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<T: RestClient + ?Sized> RestClient for std::sync::Arc<T> {
    async fn call(
        &self,
        method: Method,
        endpoint: &str,
        params: &Params,
        attachment: Option<Attachment>,
        format: ResponseFormat,
    ) -> Result<Value, BbbError> {
        (**self).call(method, endpoint, params, attachment, format).await
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    #[instrument(skip(self, params, attachment), fields(service = %self.config.service_name, method = %method, endpoint = %endpoint))]
    async fn call(
        &self,
        method: Method,
        endpoint: &str,
        params: &Params,
        attachment: Option<Attachment>,
        format: ResponseFormat,
    ) -> Result<Value, BbbError> {
        let query = self.signer.build_query_string(endpoint, params);
        let url = format!("{}/api/{}{}", self.config.base_url, endpoint, query);

        let mut request = self.client.request(method, &url);
        if let Some(attachment) = attachment {
            let part = multipart::Part::bytes(attachment.content).file_name(attachment.file_name);
            request = request.multipart(multipart::Form::new().part("file", part));
        }

        let response = request.send().await?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(BbbError::Status(status));
        }

        let body = response.text().await?;
        trace!("response body: {}", body);

        normalize(decode_body(format, &body)?)
    }
}

/// Reduce a parsed document to its `response` payload or a typed failure.
///
/// Anything without `returncode == "SUCCESS"` is a failure; the server's
/// `messageKey`/`message` pass through verbatim.
pub(crate) fn normalize(document: Value) -> Result<Value, BbbError> {
    let response = match document {
        Value::Object(mut map) => map
            .remove("response")
            .ok_or_else(|| BbbError::Parse("missing top-level response element".to_string()))?,
        _ => return Err(BbbError::Parse("document is not a mapping".to_string())),
    };

    let returncode = response.get("returncode").and_then(Value::as_str);
    if returncode != Some("SUCCESS") {
        let code = response
            .get("messageKey")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let message = response
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Err(BbbError::Api { code, message });
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_response_is_returned_as_payload() {
        let document = json!({
            "response": {"returncode": "SUCCESS", "version": "2.0"}
        });

        let payload = normalize(document).unwrap();

        assert_eq!(payload["version"], "2.0");
    }

    #[test]
    fn failed_returncode_maps_to_api_error() {
        let document = json!({
            "response": {
                "returncode": "FAILED",
                "messageKey": "notFound",
                "message": "Meeting not found"
            }
        });

        match normalize(document).unwrap_err() {
            BbbError::Api { code, message } => {
                assert_eq!(code, "notFound");
                assert_eq!(message, "Meeting not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_returncode_is_always_a_failure() {
        let document = json!({"response": {"version": "2.0"}});

        assert!(matches!(
            normalize(document).unwrap_err(),
            BbbError::Api { .. }
        ));
    }

    #[test]
    fn missing_response_mapping_is_a_parse_error() {
        let err = normalize(json!({"something": "else"})).unwrap_err();

        assert_eq!(err.code(), "parsingError");
    }

    #[test]
    fn xml_failure_body_normalizes_end_to_end() {
        let body = "<response><returncode>FAILED</returncode>\
                    <messageKey>checksumError</messageKey>\
                    <message>Checksums do not match</message></response>";

        let document = decode_body(ResponseFormat::Xml, body).unwrap();
        let err = normalize(document).unwrap_err();

        assert_eq!(err.code(), "checksumError");
        assert_eq!(err.message(), "Checksums do not match");
    }
}
