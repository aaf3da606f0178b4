//! Blocking client for the Loro Template Service REST API.

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;

use loro_core::{
    application::{ApplicationError, ports::TemplateApi},
    domain::{
        ListQuery, Received, RemoteValidation, TemplateSummary, TransformRequest, UsageStats,
    },
    error::{Context, LoroError, LoroResult},
};

use super::response::{error_message, into_text, parse_body, pick_field};
use super::{DEFAULT_TIMEOUT, build_client};

/// `TemplateApi` over HTTPS.
#[derive(Debug, Clone)]
pub struct LoroHttpClient {
    client: Client,
    base_url: String,
}

impl LoroHttpClient {
    /// Create a client for `base_url`, authenticating with `api_key`.
    ///
    /// # Errors
    ///
    /// A key that is not a valid header value is a configuration error.
    pub fn new(base_url: impl Into<String>, api_key: &str) -> LoroResult<Self> {
        let mut key = HeaderValue::from_str(api_key).map_err(|_| LoroError::Configuration {
            message: "API key contains characters that cannot be sent in a header".into(),
        })?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("X-API-Key", key);

        let client = build_client(DEFAULT_TIMEOUT, headers).context("building HTTP client")?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        tracing::debug!(%base_url, "Created Loro API client");

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode the body, whatever the status.
    fn send(&self, request: RequestBuilder) -> LoroResult<(StatusCode, Value)> {
        let response = request.send().map_err(|e| {
            tracing::debug!(error = %e, "Request to Loro API failed");
            ApplicationError::Network {
                url: self.base_url.clone(),
            }
        })?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| ApplicationError::InvalidResponse {
                reason: e.to_string(),
            })?;
        tracing::debug!(status = status.as_u16(), bytes = text.len(), "Loro API response");

        Ok((status, parse_body(text)))
    }

    /// Send a request, turning non-success statuses into errors.
    ///
    /// `not_found` replaces the generic 404 mapping for endpoints that name
    /// a resource.
    fn call(&self, request: RequestBuilder, not_found: Option<String>) -> LoroResult<Value> {
        let (status, body) = self.send(request)?;
        if status.is_success() {
            return Ok(body);
        }

        if status == StatusCode::NOT_FOUND {
            if let Some(message) = not_found {
                return Err(ApplicationError::NotFound { message }.into());
            }
        }

        Err(status_error(status, &body).into())
    }
}

fn status_error(status: StatusCode, body: &Value) -> ApplicationError {
    match status {
        StatusCode::UNAUTHORIZED => ApplicationError::Unauthorized,
        StatusCode::FORBIDDEN => ApplicationError::Forbidden,
        StatusCode::TOO_MANY_REQUESTS => ApplicationError::RateLimited,
        StatusCode::INTERNAL_SERVER_ERROR => ApplicationError::ServerError,
        other => ApplicationError::Api {
            status: other.as_u16(),
            message: error_message(body, other.canonical_reason().unwrap_or("Unknown")),
        },
    }
}

fn decode<T: DeserializeOwned>(body: Value, what: &str) -> LoroResult<T> {
    serde_json::from_value(body).map_err(|e| {
        ApplicationError::InvalidResponse {
            reason: format!("{}: {}", what, e),
        }
        .into()
    })
}

/// Decode `body`, keeping it for callers that print the payload as sent.
fn received<T: DeserializeOwned>(body: Value, what: &str) -> LoroResult<Received<T>> {
    let value = decode(body.clone(), what)?;
    Ok(Received::new(value, body))
}

impl TemplateApi for LoroHttpClient {
    fn transform(&self, request: &TransformRequest) -> LoroResult<Value> {
        let builder = self
            .client
            .post(self.url("/api/templates/transform"))
            .json(request);
        let body = self.call(builder, None)?;
        Ok(pick_field(body, &["result"]))
    }

    fn get_template(&self, id: &str) -> LoroResult<String> {
        let builder = self.client.get(self.url(&format!("/api/templates/{id}")));
        let body = self.call(builder, Some(format!("Template not found: {id}")))?;
        Ok(into_text(pick_field(body, &["content", "template"])))
    }

    fn list_templates(&self, query: &ListQuery) -> LoroResult<Received<Vec<TemplateSummary>>> {
        let mut params = vec![
            ("limit", query.limit.to_string()),
            ("offset", query.offset.to_string()),
        ];
        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            params.push(("search", search.to_string()));
        }

        let builder = self.client.get(self.url("/api/templates")).query(&params);
        let body = self.call(builder, None)?;
        received(pick_field(body, &["templates"]), "template list")
    }

    fn validate_template(&self, template: &str) -> LoroResult<RemoteValidation> {
        let builder = self
            .client
            .post(self.url("/api/templates/validate"))
            .json(&serde_json::json!({ "template": template }));
        let body = self.call(builder, None)?;
        decode(body, "validation result")
    }

    fn render_by_guid(&self, guid: &str, data: &Value) -> LoroResult<Value> {
        let builder = self
            .client
            .post(self.url(&format!("/api/templates/{guid}/render")))
            .json(data);
        let body = self.call(builder, Some(format!("Template with GUID not found: {guid}")))?;
        Ok(pick_field(body, &["output", "result"]))
    }

    fn usage_stats(&self) -> LoroResult<Received<UsageStats>> {
        let builder = self.client.get(self.url("/api/account/usage-stats"));
        let body = self.call(builder, Some("Usage stats endpoint not available".into()))?;
        received(body, "usage stats")
    }
}
