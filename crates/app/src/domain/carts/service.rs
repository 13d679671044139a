//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{Cart, CartLineUuid, CartUuid, normalize_size},
            repositories::{CartLineInsert, PgCartLinesRepository, PgCartsRepository},
        },
        products::{
            models::{Product, ProductKey, ProductUuid},
            repository::PgProductsRepository,
        },
        users::models::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts: PgCartsRepository,
    lines: PgCartLinesRepository,
    products: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts: PgCartsRepository::new(),
            lines: PgCartLinesRepository::new(),
            products: PgProductsRepository::new(),
        }
    }

    async fn find_or_create_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Cart, CartsServiceError> {
        if let Some(cart) = self.carts.find_cart_by_user(tx, user).await? {
            return Ok(cart);
        }

        Ok(self.carts.create_cart(tx, CartUuid::new(), user).await?)
    }

    async fn load_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut cart: Cart,
    ) -> Result<Cart, CartsServiceError> {
        let lines = self.lines.get_cart_lines(tx, cart.uuid).await?;

        cart.lines = lines;

        Ok(cart)
    }

    async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Product, CartsServiceError> {
        self.products
            .get_product(tx, &ProductKey::Uuid(product))
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => CartsServiceError::ProductNotFound,
                other => other.into(),
            })
    }
}

fn to_quantity(quantity: u32) -> Result<i32, CartsServiceError> {
    if quantity < 1 {
        return Err(CartsServiceError::InvalidQuantity);
    }

    i32::try_from(quantity).map_err(|_| CartsServiceError::InvalidQuantity)
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_or_create_cart(&self, user: UserUuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.find_or_create_cart(&mut tx, user).await?;
        let cart = self.load_lines(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.add_item",
        skip(self),
        fields(user = %user, product = %product),
        err
    )]
    async fn add_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
        selected_size: Option<String>,
    ) -> Result<Cart, CartsServiceError> {
        let quantity = to_quantity(quantity)?;
        let selected_size = normalize_size(selected_size.as_deref());

        let mut tx = self.db.begin().await?;

        let catalog_product = self.get_product(&mut tx, product).await?;
        let cart = self.find_or_create_cart(&mut tx, user).await?;

        let existing = self
            .lines
            .find_matching_line(&mut tx, cart.uuid, product, selected_size.as_deref())
            .await?;

        // Round-trips losslessly: catalog prices are decoded from BIGINT.
        let unit_price = i64::try_from(catalog_product.price).unwrap_or(i64::MAX);

        match existing {
            // Same (product, size): accumulate, and refresh the snapshot to
            // the current catalog price rather than adding across edits.
            Some(line) => {
                self.lines
                    .accumulate_line(&mut tx, line.uuid, quantity, unit_price)
                    .await?;
            }
            None => {
                self.lines
                    .create_cart_line(
                        &mut tx,
                        cart.uuid,
                        &CartLineInsert {
                            uuid: CartLineUuid::new(),
                            product,
                            quantity,
                            unit_price,
                            selected_size,
                            image_url: catalog_product.first_image().map(ToString::to_string),
                        },
                    )
                    .await?;
            }
        }

        self.carts.touch_cart(&mut tx, cart.uuid).await?;

        let cart = self.load_lines(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn update_item_quantity(
        &self,
        user: UserUuid,
        line: CartLineUuid,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError> {
        let quantity = to_quantity(quantity)?;

        let mut tx = self.db.begin().await?;

        let cart = self
            .carts
            .find_cart_by_user(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let rows_affected = self
            .lines
            .set_line_quantity(&mut tx, cart.uuid, line, quantity)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        self.carts.touch_cart(&mut tx, cart.uuid).await?;

        let cart = self.load_lines(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        line: CartLineUuid,
    ) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts
            .find_cart_by_user(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let rows_affected = self.lines.delete_cart_line(&mut tx, cart.uuid, line).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        self.carts.touch_cart(&mut tx, cart.uuid).await?;

        let cart = self.load_lines(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn clear(&self, user: UserUuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.find_or_create_cart(&mut tx, user).await?;

        self.lines.clear_cart_lines(&mut tx, cart.uuid).await?;
        self.carts.touch_cart(&mut tx, cart.uuid).await?;

        let cart = self.load_lines(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(cart)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The caller's cart, created empty on first access.
    async fn get_or_create_cart(&self, user: UserUuid) -> Result<Cart, CartsServiceError>;

    /// Add a product to the cart. Lines merge on (product, size); a merge
    /// refreshes the stored price to the product's current price.
    async fn add_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
        selected_size: Option<String>,
    ) -> Result<Cart, CartsServiceError>;

    /// Replace the quantity of a line addressed by its own UUID.
    async fn update_item_quantity(
        &self,
        user: UserUuid,
        line: CartLineUuid,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError>;

    /// Remove one line from the cart.
    async fn remove_item(
        &self,
        user: UserUuid,
        line: CartLineUuid,
    ) -> Result<Cart, CartsServiceError>;

    /// Empty the cart. Idempotent: clearing an already-empty cart is fine.
    async fn clear(&self, user: UserUuid) -> Result<Cart, CartsServiceError>;
}
