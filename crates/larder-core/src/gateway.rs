// ── Remote resource gateway ──
//
// The coordinator talks to the server only through `ItemGateway`.
// `HttpGateway` is the production implementation on top of
// `larder_api::ItemsClient`; tests plug in scripted gateways.

use std::future::Future;

use larder_api::item_types::{ItemCreateRequest, ItemUpdateRequest};
use larder_api::{ItemsClient, TransportConfig};
use tracing::debug;

use crate::config::GatewayConfig;
use crate::error::CoreError;
use crate::model::{Item, ItemId, NewItem};

/// The four remote capabilities the coordinator relies on.
///
/// Each call is a suspension point and may fail. Implementations must
/// not touch local state.
pub trait ItemGateway: Send + Sync + 'static {
    /// Fetch the whole collection in server order.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Item>, CoreError>> + Send;

    /// Store a new item; the returned item carries the assigned id.
    fn create(&self, item: &NewItem) -> impl Future<Output = Result<Item, CoreError>> + Send;

    /// Replace the item with `id`; returns the item as the server stored it.
    fn update(
        &self,
        id: ItemId,
        item: &Item,
    ) -> impl Future<Output = Result<Item, CoreError>> + Send;

    fn delete(&self, id: ItemId) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// [`ItemGateway`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: ItemsClient,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
        };
        let client = ItemsClient::from_api_key(
            config.base_url.as_str(),
            &config.resource,
            config.api_key.as_ref(),
            &transport,
        )?;
        debug!(base_url = %client.base_url(), resource = client.resource(), "HTTP gateway ready");
        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn from_client(client: ItemsClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ItemsClient {
        &self.client
    }
}

impl ItemGateway for HttpGateway {
    async fn fetch_all(&self) -> Result<Vec<Item>, CoreError> {
        let items = self.client.list_items().await?;
        Ok(items.into_iter().map(Item::from).collect())
    }

    async fn create(&self, item: &NewItem) -> Result<Item, CoreError> {
        let body = ItemCreateRequest::from(item);
        Ok(self.client.create_item(&body).await?.into())
    }

    async fn update(&self, id: ItemId, item: &Item) -> Result<Item, CoreError> {
        let body = ItemUpdateRequest::from(item);
        Ok(self.client.update_item(id.get(), &body).await?.into())
    }

    async fn delete(&self, id: ItemId) -> Result<(), CoreError> {
        self.client
            .delete_item(id.get())
            .await
            .map_err(CoreError::from)
    }
}
