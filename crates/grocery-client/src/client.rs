//! HTTP client for a single JSON catalog endpoint.
//!
//! The relay uses it to reach the upstream catalog gateway; the views use it
//! to reach the relay. Either way it performs exactly one GET per call with
//! no retry.

use std::time::Duration;

use grocery_core::{normalize_payload, AppConfig, NormalizedProduct};
use reqwest::Client;
use serde_json::Value;

use crate::error::ClientError;

#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    url: String,
}

impl CatalogClient {
    /// Creates a client for `url`.
    ///
    /// `timeout_secs` of `None` leaves requests without a deadline.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `url` is not an absolute
    /// http(s) URL, or [`ClientError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        url: &str,
        timeout_secs: Option<u64>,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| ClientError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl {
                url: url.to_owned(),
                reason: format!("unsupported scheme \"{}\"", parsed.scheme()),
            });
        }

        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            url: parsed.to_string(),
        })
    }

    /// Client for the upstream catalog gateway.
    ///
    /// # Errors
    ///
    /// See [`CatalogClient::new`].
    pub fn upstream(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.upstream_url,
            config.http_timeout_secs,
            &config.user_agent,
        )
    }

    /// Client for the local relay route.
    ///
    /// # Errors
    ///
    /// See [`CatalogClient::new`].
    pub fn relay(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(&config.relay_url, config.http_timeout_secs, &config.user_agent)
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches the raw response body, verified to be well-formed JSON.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] — connection, TLS or timeout failure.
    /// - [`ClientError::UnexpectedStatus`] — any non-2xx status.
    /// - [`ClientError::InvalidJson`] — body is not JSON.
    pub async fn fetch_body(&self) -> Result<Vec<u8>, ClientError> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.bytes().await?.to_vec();
        serde_json::from_slice::<serde::de::IgnoredAny>(&body).map_err(|e| {
            ClientError::InvalidJson {
                url: self.url.clone(),
                source: e,
            }
        })?;

        tracing::debug!(url = %self.url, bytes = body.len(), "fetched catalog body");
        Ok(body)
    }

    /// Fetches and parses the response body.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::fetch_body`].
    pub async fn fetch_payload(&self) -> Result<Value, ClientError> {
        let body = self.fetch_body().await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::InvalidJson {
            url: self.url.clone(),
            source: e,
        })
    }

    /// Fetches the payload and normalizes its `products` collection.
    ///
    /// A payload without a usable `products` array yields an empty
    /// collection rather than an error.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::fetch_body`].
    pub async fn fetch_products(&self) -> Result<Vec<NormalizedProduct>, ClientError> {
        let payload = self.fetch_payload().await?;
        let products = normalize_payload(payload);
        tracing::debug!(url = %self.url, count = products.len(), "normalized catalog");
        Ok(products)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
