// Hand-crafted async HTTP client for a REST item collection.
//
// Base path: {base_url}/{resource}
// Auth: optional X-API-KEY header

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::types::{ItemCreateRequest, ItemResponse, ItemUpdateRequest};
use crate::Error;
use crate::transport::TransportConfig;

/// Resource name used when none is configured.
pub const DEFAULT_RESOURCE: &str = "items";

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for one item collection on a REST server.
///
/// Cheap to clone: the inner `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct ItemsClient {
    http: reqwest::Client,
    base_url: Url,
    resource: String,
}

impl ItemsClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL, resource name, optional API key, and
    /// transport config.
    ///
    /// When an API key is given it is sent as `X-API-KEY` on every request.
    pub fn from_api_key(
        base_url: &str,
        resource: &str,
        api_key: Option<&SecretString>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            let mut key_value =
                HeaderValue::from_str(key.expose_secret()).map_err(|e| Error::Authentication {
                    message: format!("invalid API key header value: {e}"),
                })?;
            key_value.set_sensitive(true);
            headers.insert("X-API-KEY", key_value);
        }

        let http = transport.build_client_with_headers(headers)?;
        Self::from_reqwest(base_url, resource, http)
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, resource: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        let resource = resource.trim_matches('/');
        let resource = if resource.is_empty() {
            DEFAULT_RESOURCE
        } else {
            resource
        };

        Ok(Self {
            http,
            base_url,
            resource: resource.to_owned(),
        })
    }

    /// Force a trailing slash so relative joins append instead of replace.
    ///
    /// `http://host/api` and `http://host/api/` both become `http://host/api/`.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    // ── URL builders ─────────────────────────────────────────────────

    fn collection_url(&self) -> Result<Url, Error> {
        Ok(self.base_url.join(&self.resource)?)
    }

    fn member_url(&self, id: u64) -> Result<Url, Error> {
        Ok(self.base_url.join(&format!("{}/{id}", self.resource))?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    /// Success with the body ignored (DELETE responses carry nothing useful).
    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::InvalidApiKey;
        }

        let raw = resp.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|err| err.message.or(err.error))
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                }
            });

        Error::Http {
            status: status.as_u16(),
            message,
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// `GET /{resource}`: the whole collection, in server order.
    pub async fn list_items(&self) -> Result<Vec<ItemResponse>, Error> {
        self.get(self.collection_url()?).await
    }

    /// `POST /{resource}`: returns the stored item with its assigned id.
    pub async fn create_item(&self, body: &ItemCreateRequest) -> Result<ItemResponse, Error> {
        self.post(self.collection_url()?, body).await
    }

    /// `PUT /{resource}/{id}`: returns the item as the server stored it.
    pub async fn update_item(
        &self,
        id: u64,
        body: &ItemUpdateRequest,
    ) -> Result<ItemResponse, Error> {
        self.put(self.member_url(id)?, body).await
    }

    pub async fn delete_item(&self, id: u64) -> Result<(), Error> {
        self.delete(self.member_url(id)?).await
    }
}
