// Wire types for the item resource.
//
// Field names match the JSON bodies one-to-one. `price` is decimal text
// and is never parsed numerically.

use serde::{Deserialize, Serialize};

/// An item as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResponse {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: String,
    pub available: bool,
    pub image: String,
}

/// `POST /{resource}` body. The server assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCreateRequest {
    pub name: String,
    pub description: String,
    pub price: String,
    pub available: bool,
    pub image: String,
}

/// `PUT /{resource}/{id}` body: the full merged record, id included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUpdateRequest {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: String,
    pub available: bool,
    pub image: String,
}
