//! Request issuance: the transport seam and its `reqwest` implementation.

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, Method};
use serde_json::Value;
use shared::protocol::{ApiRequest, HttpMethod};
use tracing::{debug, warn};
use url::Url;

use crate::{config::normalize_base_url, error::ClientError};

/// Issues one resolved request and parses the body as JSON.
///
/// Any HTTP status is accepted; only a transport failure or a body that is
/// not JSON counts as an error.
#[async_trait]
pub trait WmsTransport: Send + Sync {
    async fn execute(&self, request: &ApiRequest) -> Result<Value, ClientError>;
}

pub struct HttpTransport {
    http: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let normalized = normalize_base_url(base_url);
        let base_url = Url::parse(&normalized).map_err(|source| ClientError::InvalidBaseUrl {
            url: normalized.clone(),
            source,
        })?;
        Ok(Self {
            http: Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn resolve(&self, request: &ApiRequest) -> Result<Url, ClientError> {
        self.base_url
            .join(&request.target)
            .map_err(|source| ClientError::Join {
                target: request.target.clone(),
                source,
            })
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
    }
}

#[async_trait]
impl WmsTransport for HttpTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<Value, ClientError> {
        let url = self.resolve(request)?;
        debug!(
            endpoint = request.endpoint.name(),
            method = request.method.as_str(),
            %url,
            "sending api request"
        );

        let mut builder = self
            .http
            .request(to_reqwest_method(request.method), url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let res = builder.send().await?;
        let status = res.status();
        let bytes = res.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| {
            warn!(
                endpoint = request.endpoint.name(),
                status = status.as_u16(),
                "api response body is not json"
            );
            ClientError::Decode {
                status: status.as_u16(),
                source,
            }
        })
    }
}
