// larder-api: Async Rust client for a REST item resource

pub mod error;
pub mod items;
pub mod transport;

pub use error::Error;
pub use items::ItemsClient;
pub use items::types as item_types;
pub use transport::TransportConfig;
