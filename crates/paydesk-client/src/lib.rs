//! HTTP implementation of the payments backend
//!
//! Talks to the external REST API:
//! - `GET {base_url}/payments` returns the payment list
//! - `PUT {base_url}/payments/{id}` with `{"status": ...}` updates one record
//!
//! The bearer token is passed per call; without one no `Authorization`
//! header is sent and the backend is expected to reject the request.

pub mod error;

use async_trait::async_trait;
use paydesk_config::BackendConfig;
use paydesk_core::{CoreError, Payment, PaymentStatus, PaymentsBackend};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;

pub use error::{ClientError, ClientResult};

const USER_AGENT: &str = concat!("paydesk/", env!("CARGO_PKG_VERSION"));

#[derive(Serialize)]
struct StatusUpdate {
    status: PaymentStatus,
}

/// REST client for the payments backend
#[derive(Debug, Clone)]
pub struct HttpPaymentsBackend {
    client: Client,
    base_url: Url,
}

impl HttpPaymentsBackend {
    pub fn new(config: &BackendConfig) -> ClientResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ClientError::InvalidUrl {
            url: config.base_url.clone(),
            message: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl {
                url: config.base_url.clone(),
                message: "not a base URL".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base_url}/payments[/{id}]`, with the id escaped as one path segment
    fn payments_url(&self, id: Option<&str>) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| ClientError::InvalidUrl {
                url: self.base_url.to_string(),
                message: "not a base URL".to_string(),
            })?;
            segments.pop_if_empty().push("payments");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn check(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Status { status: status.as_u16(), body })
    }

    /// Fetch every payment record
    pub async fn fetch_payments(&self, token: Option<&str>) -> ClientResult<Vec<Payment>> {
        let url = self.payments_url(None)?;
        log::debug!("GET {}", url);

        let response = Self::authorize(self.client.get(url), token).send().await?;
        let body = Self::check(response).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Set the status of one payment; any 2xx counts as success
    pub async fn put_status(
        &self,
        token: Option<&str>,
        id: &str,
        status: PaymentStatus,
    ) -> ClientResult<()> {
        let url = self.payments_url(Some(id))?;
        log::debug!("PUT {} status={}", url, status);

        let request = self.client.put(url).json(&StatusUpdate { status });
        let response = Self::authorize(request, token).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl PaymentsBackend for HttpPaymentsBackend {
    async fn list_payments(&self, token: Option<&str>) -> Result<Vec<Payment>, CoreError> {
        self.fetch_payments(token)
            .await
            .map_err(ClientError::into_fetch_error)
    }

    async fn update_status(
        &self,
        token: Option<&str>,
        id: &str,
        status: PaymentStatus,
    ) -> Result<(), CoreError> {
        self.put_status(token, id, status)
            .await
            .map_err(|e| e.into_update_error(id))
    }
}
