//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::models::Actor,
    database::Db,
    domain::{
        carts::repositories::{PgCartLinesRepository, PgCartsRepository},
        orders::{
            errors::OrdersServiceError,
            models::{NewOrder, Order, OrderFilter, OrderStatus, OrderUuid},
            repository::{OrderInsert, PgOrdersRepository},
        },
        paging::{Page, PageRequest},
        users::models::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    carts: PgCartsRepository,
    cart_lines: PgCartLinesRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            carts: PgCartsRepository::new(),
            cart_lines: PgCartLinesRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.create_order",
        skip(self, order),
        fields(user = %user, line_count = order.lines.len()),
        err
    )]
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<Order, OrdersServiceError> {
        if order.lines.is_empty() {
            return Err(OrdersServiceError::EmptyOrder);
        }

        let total = i64::try_from(order.total).map_err(|_| OrdersServiceError::InvalidData)?;

        let mut tx = self.db.begin().await?;

        let mut created = self
            .orders
            .create_order(
                &mut tx,
                &OrderInsert {
                    uuid: OrderUuid::new(),
                    user,
                    total,
                    payment_method: order.payment_method,
                    shipping_address: order.shipping_address,
                    notes: order.notes,
                },
            )
            .await?;

        for line in &order.lines {
            let line = self
                .orders
                .create_order_line(&mut tx, created.uuid, line)
                .await?;

            created.lines.push(line);
        }

        // Checkout empties the cart in the same transaction, so a fault
        // between the two writes cannot leave a stale cart behind.
        if let Some(cart) = self.carts.find_cart_by_user(&mut tx, user).await? {
            self.cart_lines.clear_cart_lines(&mut tx, cart.uuid).await?;
            self.carts.touch_cart(&mut tx, cart.uuid).await?;
        }

        tx.commit().await?;

        info!(order = %created.uuid, "order created");

        Ok(created)
    }

    async fn get_order(&self, actor: Actor, order: OrderUuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut found = self.orders.get_order(&mut tx, order).await?;

        if found.user != actor.user && !actor.is_admin() {
            return Err(OrdersServiceError::Forbidden);
        }

        found.lines = self.orders.get_order_lines(&mut tx, order).await?;

        tx.commit().await?;

        Ok(found)
    }

    async fn list_orders(
        &self,
        actor: Actor,
        filter: OrderFilter,
        page: PageRequest,
    ) -> Result<Page<Order>, OrdersServiceError> {
        // Admins see everything; everyone else only their own orders.
        let owner = (!actor.is_admin()).then_some(actor.user);

        let mut tx = self.db.begin().await?;

        let orders = self
            .orders
            .list_orders(&mut tx, owner, filter.status, page)
            .await?;

        let total = self.orders.count_orders(&mut tx, owner, filter.status).await?;

        tx.commit().await?;

        Ok(Page::new(orders, total, page))
    }

    #[tracing::instrument(name = "orders.service.update_status", skip(self), err)]
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.orders.get_order(&mut tx, order).await?;

        if !current.status.can_transition_to(status) {
            return Err(OrdersServiceError::InvalidTransition {
                from: current.status,
                to: status,
            });
        }

        let mut updated = self.orders.update_order_status(&mut tx, order, status).await?;

        updated.lines = self.orders.get_order_lines(&mut tx, order).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_order(&self, actor: Actor, order: OrderUuid) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let found = self.orders.get_order(&mut tx, order).await?;

        if found.user != actor.user {
            return Err(OrdersServiceError::Forbidden);
        }

        if found.status != OrderStatus::Pending {
            return Err(OrdersServiceError::NotPending);
        }

        self.orders.delete_order(&mut tx, order).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Snapshot the submitted lines into an immutable order and empty the
    /// owner's cart. Line data is trusted as submitted.
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<Order, OrdersServiceError>;

    /// Fetch one order; owner or admin only.
    async fn get_order(&self, actor: Actor, order: OrderUuid)
    -> Result<Order, OrdersServiceError>;

    /// Paginated order history, owner-scoped unless the actor is an admin.
    async fn list_orders(
        &self,
        actor: Actor,
        filter: OrderFilter,
        page: PageRequest,
    ) -> Result<Page<Order>, OrdersServiceError>;

    /// Advance the lifecycle along a legal edge.
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;

    /// Owner-only removal of an order that is still pending.
    async fn delete_order(&self, actor: Actor, order: OrderUuid)
    -> Result<(), OrdersServiceError>;
}
