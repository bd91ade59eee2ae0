use anyhow::{Result, bail};
use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::error::TransportError;

/// HTTP + JSON access to the chat backend.
///
/// The base endpoint is fixed at construction. Every call is a fresh request:
/// no retries, no caching, no deduplication of concurrent calls.
#[derive(Clone)]
pub struct Transport {
    client: Client,
    base_url: Url,
}

impl Transport {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            bail!("Not a usable base URL: {}", base_url);
        }

        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET` expecting `200 OK`.
    pub async fn get<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T, TransportError> {
        self.request::<T, ()>(Method::GET, path, None, StatusCode::OK)
            .await
    }

    pub async fn post<B, T>(
        &self,
        path: &[&str],
        body: &B,
        expected: StatusCode,
    ) -> Result<T, TransportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body), expected).await
    }

    /// Issue one request and decode the response as `T`.
    ///
    /// Path segments are percent-encoded individually. Any status other than
    /// `expected` is reported as `TransportError::Http` with the raw body.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &[&str],
        body: Option<&B>,
        expected: StatusCode,
    ) -> Result<T, TransportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url_for(path);
        debug!("{} {}", method, url.path());

        let mut req = self.client.request(method, url);
        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;

        debug!("Response status {}", status);
        trace!("Response body: {}", text);

        if status != expected {
            return Err(TransportError::Http { status, body: text });
        }

        Ok(serde_json::from_str(&text)?)
    }

    fn url_for(&self, path: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path);
        }
        url
    }
}
