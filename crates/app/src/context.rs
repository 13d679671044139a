//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService, TokenSigner},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        inventory::{InventoryService, PgInventoryService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        promotions::{PgPromotionsService, PromotionsService},
        stats::{PgStatsService, StatsService},
        taxonomy::{PgTaxonomyService, TaxonomyService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Service handles shared across the HTTP layer. Every handle is a trait
/// object so handler tests can substitute mocks.
#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub users: Arc<dyn UsersService>,
    pub products: Arc<dyn ProductsService>,
    pub taxonomy: Arc<dyn TaxonomyService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub promotions: Arc<dyn PromotionsService>,
    pub inventory: Arc<dyn InventoryService>,
    pub stats: Arc<dyn StatsService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        signer: TokenSigner,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        Ok(Self {
            auth: Arc::new(PgAuthService::new(db.clone(), signer)),
            users: Arc::new(PgUsersService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            taxonomy: Arc::new(PgTaxonomyService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            promotions: Arc::new(PgPromotionsService::new(db.clone())),
            inventory: Arc::new(PgInventoryService::new(db.clone())),
            stats: Arc::new(PgStatsService::new(db)),
        })
    }
}
