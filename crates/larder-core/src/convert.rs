// ── API-to-domain type conversions ──
//
// Bridges raw `larder_api` wire types and `larder_core::model` types.

use larder_api::item_types::{ItemCreateRequest, ItemResponse, ItemUpdateRequest};

use crate::model::{Item, ItemId, NewItem};

impl From<ItemResponse> for Item {
    fn from(r: ItemResponse) -> Self {
        Self {
            id: ItemId::new(r.id),
            name: r.name,
            description: r.description,
            price: r.price,
            available: r.available,
            image: r.image,
        }
    }
}

impl From<&NewItem> for ItemCreateRequest {
    fn from(item: &NewItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.clone(),
            available: item.available,
            image: item.image.clone(),
        }
    }
}

impl From<&Item> for ItemUpdateRequest {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.get(),
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.clone(),
            available: item.available,
            image: item.image.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn response_maps_every_field() {
        let item = Item::from(ItemResponse {
            id: 9,
            name: "Tea".into(),
            description: "Green".into(),
            price: "2.10".into(),
            available: false,
            image: "t.png".into(),
        });
        assert_eq!(item.id, ItemId::new(9));
        assert_eq!(item.price, "2.10");
        assert!(!item.available);
    }

    #[test]
    fn update_request_carries_id() {
        let item = Item {
            id: ItemId::new(3),
            name: "Tea".into(),
            description: String::new(),
            price: "2.10".into(),
            available: true,
            image: "t.png".into(),
        };
        let req = ItemUpdateRequest::from(&item);
        assert_eq!(req.id, 3);
        assert_eq!(req.name, "Tea");
    }
}
