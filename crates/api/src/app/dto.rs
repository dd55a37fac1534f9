use serde::{Deserialize, Serialize};

use shopdash_core::DomainResult;
use shopdash_orders::{LineItem, OrderDraft, ShippingAddress};
use shopdash_products::{CatalogStats, Product, ProductDraft, catalog_stats};
use shopdash_users::{User, UserStats, UserView, user_stats};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /orders`: one line item, optionally with a shipping address.
///
/// The item fields are nullable, as they are in stored orders.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub ship_to_address: Option<ShippingAddress>,
}

impl CreateOrderRequest {
    pub fn into_draft(self) -> DomainResult<OrderDraft> {
        let mut draft = OrderDraft::single_item(LineItem {
            product_name: self.product_name,
            price: self.price,
            quantity: self.quantity,
        });
        if let Some(address) = self.ship_to_address {
            draft = draft.with_shipping(address);
        }
        draft.validate()?;
        Ok(draft)
    }
}

/// Body of `POST /products`.
pub type CreateProductRequest = ProductDraft;

/// Body of `POST /users`.
pub type CreateUserRequest = shopdash_users::NewUser;

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProductListing {
    pub items: Vec<Product>,
    pub stats: CatalogStats,
}

impl ProductListing {
    pub fn build(products: Vec<Product>) -> Self {
        let stats = catalog_stats(&products);
        Self {
            items: products,
            stats,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct UserListing {
    pub items: Vec<UserView>,
    pub stats: UserStats,
}

impl UserListing {
    pub fn build(users: Vec<User>) -> Self {
        let stats = user_stats(&users);
        Self {
            items: users.into_iter().map(UserView::from).collect(),
            stats,
        }
    }
}
