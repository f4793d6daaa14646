//! Thin JSON gateway to the subway backend.
//!
//! Serializes request bodies, attaches the bearer token when one is given and
//! turns every non-2xx answer into [`GatewayError::Status`] so callers can look
//! up a user-facing message by status code.

use crate::config::ServerConfig;
use crate::error::gateway::GatewayError;

use common::{ErrorLocation, HttpStatusCode, RedactedToken};

use std::panic::Location;
use std::time::Duration;

use backoff::ExponentialBackoffBuilder;
use backoff::backoff::Backoff;
use log::{debug, trace, warn};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::sleep as TokioSleep;
use url::Url;

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";
const SERVER_MESSAGE_FIELD: &str = "message";

#[derive(Clone)]
pub struct HttpGateway {
    base_url: Url,
    client: Client,
    max_retries: u32,
    retry_initial_interval: Duration,
}

impl HttpGateway {
    pub fn new(config: &ServerConfig) -> Result<Self, GatewayError> {
        // A trailing slash keeps any path prefix of the endpoint when joining.
        let mut endpoint = config.api_endpoint.clone();
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }
        let base_url = Url::parse(&endpoint)?;
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            base_url,
            client,
            max_retries: config.max_retries,
            retry_initial_interval: config.retry_initial_interval(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[track_caller]
    fn url(&self, path: &str) -> Result<Url, GatewayError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn prepare_request(
        &self,
        request: RequestBuilder,
        token: Option<&RedactedToken>,
    ) -> RequestBuilder {
        let request = request.header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        match token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {}", token.as_str())),
            None => request,
        }
    }

    /// GET and decode a JSON body.
    ///
    /// Transient statuses (429/502/503/504) are retried up to `max_retries`
    /// times with exponential backoff; reads are idempotent.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&RedactedToken>,
    ) -> Result<T, GatewayError> {
        let url = self.url(path)?;
        let mut backoff = ExponentialBackoffBuilder::new()
            .with_initial_interval(self.retry_initial_interval)
            .with_max_elapsed_time(None)
            .build();
        let mut attempt = 0;

        loop {
            trace!("GET {url} (attempt {})", attempt + 1);
            let response = self
                .prepare_request(self.client.get(url.clone()), token)
                .send()
                .await?;

            let status = HttpStatusCode(response.status().as_u16());
            if status.is_retryable() && attempt < self.max_retries {
                attempt += 1;
                if let Some(delay) = backoff.next_backoff() {
                    warn!("GET {url} answered {status}, retrying after {delay:?}");
                    TokioSleep(delay).await;
                    continue;
                }
            }

            return decode_json(response).await;
        }
    }

    /// POST a JSON body and decode the JSON answer.
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        token: Option<&RedactedToken>,
    ) -> Result<T, GatewayError> {
        let url = self.url(path)?;
        debug!("POST {url}");
        let response = self
            .prepare_request(self.client.post(url), token)
            .json(body)
            .send()
            .await?;

        decode_json(response).await
    }

    /// POST a JSON body where the answer carries no content worth decoding.
    pub async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&RedactedToken>,
    ) -> Result<(), GatewayError> {
        let url = self.url(path)?;
        debug!("POST {url}");
        let response = self
            .prepare_request(self.client.post(url), token)
            .json(body)
            .send()
            .await?;

        ensure_success(response).await.map(|_| ())
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&RedactedToken>,
    ) -> Result<(), GatewayError> {
        let url = self.url(path)?;
        debug!("PUT {url}");
        let response = self
            .prepare_request(self.client.put(url), token)
            .json(body)
            .send()
            .await?;

        ensure_success(response).await.map(|_| ())
    }

    pub async fn delete(
        &self,
        path: &str,
        token: Option<&RedactedToken>,
    ) -> Result<(), GatewayError> {
        let url = self.url(path)?;
        debug!("DELETE {url}");
        let response = self
            .prepare_request(self.client.delete(url), token)
            .send()
            .await?;

        ensure_success(response).await.map(|_| ())
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
    let response = ensure_success(response).await?;
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[track_caller]
fn status_error(status: HttpStatusCode, message: String) -> GatewayError {
    GatewayError::Status {
        status,
        message,
        location: ErrorLocation::from(Location::caller()),
    }
}

async fn ensure_success(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let code = HttpStatusCode(status.as_u16());
    let body = response.text().await.unwrap_or_default();
    let message = server_message(&body)
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());

    warn!("Request rejected with HTTP {code}: {message}");
    Err(status_error(code, message))
}

/// Pulls `{"message": "..."}` out of an error body.
fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get(SERVER_MESSAGE_FIELD)
        .and_then(Value::as_str)
        .map(str::to_string)
}
