//! Service wiring: one repository and one view per resource.
//!
//! Every action goes through the resource's [`ResourceView`], so the
//! retained snapshot, the error message and the loading flag stay in step
//! with what the routes return.

use std::sync::Arc;

use shopdash_core::DocumentId;
use shopdash_orders::{OrderDocument, OrderDraft, OrderReport};
use shopdash_products::{Product, ProductDraft};
use shopdash_store::{ContentStore, Repository};
use shopdash_users::{User, UserDraft};

use crate::app::dto::{ProductListing, UserListing};
use crate::app::errors::{ActionError, Mutation, ORDERS, PRODUCTS, USERS};
use crate::app::views::ResourceView;

pub struct AppServices {
    orders: Repository<OrderDocument>,
    products: Repository<Product>,
    users: Repository<User>,
    pub order_view: ResourceView<OrderReport>,
    pub product_view: ResourceView<ProductListing>,
    pub user_view: ResourceView<UserListing>,
}

impl AppServices {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            orders: Repository::new(store.clone()),
            products: Repository::new(store.clone()),
            users: Repository::new(store),
            order_view: ResourceView::new(ORDERS),
            product_view: ResourceView::new(PRODUCTS),
            user_view: ResourceView::new(USERS),
        }
    }

    // -------------------------
    // Orders
    // -------------------------

    pub async fn list_orders(&self) -> Result<OrderReport, ActionError> {
        self.order_view.run(self.fetch_orders()).await
    }

    pub async fn create_order(&self, draft: OrderDraft) -> Result<OrderReport, ActionError> {
        self.order_view
            .run(async {
                self.orders.create(&draft).await.map_err(|e| {
                    ActionError::MutationFailure(Mutation::Create).log_store_error(ORDERS, e)
                })?;
                self.fetch_orders().await
            })
            .await
    }

    pub async fn delete_order(&self, id: &DocumentId) -> Result<OrderReport, ActionError> {
        self.order_view
            .run(async {
                self.orders.delete(id).await.map_err(|e| {
                    ActionError::MutationFailure(Mutation::Delete).log_store_error(ORDERS, e)
                })?;
                self.fetch_orders().await
            })
            .await
    }

    async fn fetch_orders(&self) -> Result<OrderReport, ActionError> {
        let orders = self
            .orders
            .list()
            .await
            .map_err(|e| ActionError::FetchFailure.log_store_error(ORDERS, e))?;
        Ok(OrderReport::build(&orders))
    }

    // -------------------------
    // Products
    // -------------------------

    pub async fn list_products(&self) -> Result<ProductListing, ActionError> {
        self.product_view.run(self.fetch_products()).await
    }

    pub async fn create_product(&self, draft: ProductDraft) -> Result<ProductListing, ActionError> {
        self.product_view
            .run(async {
                self.products.create(&draft).await.map_err(|e| {
                    ActionError::MutationFailure(Mutation::Create).log_store_error(PRODUCTS, e)
                })?;
                self.fetch_products().await
            })
            .await
    }

    pub async fn delete_product(&self, id: &DocumentId) -> Result<ProductListing, ActionError> {
        self.product_view
            .run(async {
                self.products.delete(id).await.map_err(|e| {
                    ActionError::MutationFailure(Mutation::Delete).log_store_error(PRODUCTS, e)
                })?;
                self.fetch_products().await
            })
            .await
    }

    async fn fetch_products(&self) -> Result<ProductListing, ActionError> {
        let products = self
            .products
            .list()
            .await
            .map_err(|e| ActionError::FetchFailure.log_store_error(PRODUCTS, e))?;
        Ok(ProductListing::build(products))
    }

    // -------------------------
    // Users
    // -------------------------

    pub async fn list_users(&self) -> Result<UserListing, ActionError> {
        self.user_view.run(self.fetch_users()).await
    }

    pub async fn create_user(&self, draft: UserDraft) -> Result<UserListing, ActionError> {
        self.user_view
            .run(async {
                self.users.create(&draft).await.map_err(|e| {
                    ActionError::MutationFailure(Mutation::Create).log_store_error(USERS, e)
                })?;
                self.fetch_users().await
            })
            .await
    }

    pub async fn delete_user(&self, id: &DocumentId) -> Result<UserListing, ActionError> {
        self.user_view
            .run(async {
                self.users.delete(id).await.map_err(|e| {
                    ActionError::MutationFailure(Mutation::Delete).log_store_error(USERS, e)
                })?;
                self.fetch_users().await
            })
            .await
    }

    async fn fetch_users(&self) -> Result<UserListing, ActionError> {
        let users = self
            .users
            .list()
            .await
            .map_err(|e| ActionError::FetchFailure.log_store_error(USERS, e))?;
        Ok(UserListing::build(users))
    }
}
