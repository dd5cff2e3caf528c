// Client for a REST item collection.
//
// Four endpoints under a configurable resource name (default `items`):
// GET/POST on the collection, PUT/DELETE on `{resource}/{id}`.

pub mod client;
pub mod types;

pub use client::ItemsClient;
