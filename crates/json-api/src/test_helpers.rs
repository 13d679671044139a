//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    auth::{Actor, MockAuthService},
    context::AppContext,
    domain::{
        carts::{MockCartsService, models::{Cart, CartUuid}},
        inventory::MockInventoryService,
        orders::{
            MockOrdersService,
            models::{Order, OrderStatus, OrderUuid},
        },
        products::{
            MockProductsService,
            models::{Product, ProductUuid},
        },
        promotions::MockPromotionsService,
        stats::MockStatsService,
        taxonomy::{MockTaxonomyService, models::CategoryUuid},
        users::{
            MockUsersService,
            models::{Role, User, UserUuid},
        },
    },
};

use crate::state::State;

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());
pub(crate) const TEST_ADMIN_UUID: UserUuid =
    UserUuid::from_uuid(Uuid::from_u128(0xffff_ffff_ffff_ffff_ffff_ffff_ffff_ffff));

pub(crate) const TEST_USER: Actor = Actor::new(TEST_USER_UUID, Role::User);
pub(crate) const TEST_ADMIN: Actor = Actor::new(TEST_ADMIN_UUID, Role::Admin);

/// Test hoop standing in for the auth middleware: injects a fixed actor.
#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    use crate::extensions::*;

    depot.insert_actor(TEST_USER);
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    use crate::extensions::*;

    depot.insert_actor(TEST_ADMIN);
    ctrl.call_next(req, depot, res).await;
}

/// An [`AppContext`] where every service is a fresh mock. Mocks with no
/// expectations panic on any call, so uninvolved services stay strict
/// without spelling out `.never()` per method.
pub(crate) struct TestContextBuilder {
    pub auth: MockAuthService,
    pub users: MockUsersService,
    pub products: MockProductsService,
    pub taxonomy: MockTaxonomyService,
    pub carts: MockCartsService,
    pub orders: MockOrdersService,
    pub promotions: MockPromotionsService,
    pub inventory: MockInventoryService,
    pub stats: MockStatsService,
}

impl TestContextBuilder {
    pub(crate) fn new() -> Self {
        Self {
            auth: MockAuthService::new(),
            users: MockUsersService::new(),
            products: MockProductsService::new(),
            taxonomy: MockTaxonomyService::new(),
            carts: MockCartsService::new(),
            orders: MockOrdersService::new(),
            promotions: MockPromotionsService::new(),
            inventory: MockInventoryService::new(),
            stats: MockStatsService::new(),
        }
    }

    pub(crate) fn into_state(self) -> Arc<State> {
        Arc::new(State::new(AppContext {
            auth: Arc::new(self.auth),
            users: Arc::new(self.users),
            products: Arc::new(self.products),
            taxonomy: Arc::new(self.taxonomy),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            promotions: Arc::new(self.promotions),
            inventory: Arc::new(self.inventory),
            stats: Arc::new(self.stats),
        }))
    }
}

pub(crate) fn service_with_actor(
    builder: TestContextBuilder,
    route: Router,
    actor: Actor,
) -> Service {
    service(builder.into_state(), route, Some(actor))
}

fn service(state: Arc<State>, route: Router, actor: Option<Actor>) -> Service {
    let mut router = Router::new().hoop(inject(state));

    router = match actor {
        Some(actor) if actor.is_admin() => router.hoop(inject_admin),
        Some(_) => router.hoop(inject_user),
        None => router,
    };

    Service::new(router.push(route))
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    let mut builder = TestContextBuilder::new();
    builder.auth = auth;

    builder.into_state()
}

pub(crate) fn public_auth_service(auth: MockAuthService, route: Router) -> Service {
    service(state_with_auth(auth), route, None)
}

pub(crate) fn users_service(users: MockUsersService, route: Router) -> Service {
    let mut builder = TestContextBuilder::new();
    builder.users = users;

    service(builder.into_state(), route, Some(TEST_USER))
}

pub(crate) fn admin_users_service(users: MockUsersService, route: Router) -> Service {
    let mut builder = TestContextBuilder::new();
    builder.users = users;

    service(builder.into_state(), route, Some(TEST_ADMIN))
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    let mut builder = TestContextBuilder::new();
    builder.products = products;

    service(builder.into_state(), route, None)
}

pub(crate) fn taxonomy_service(taxonomy: MockTaxonomyService, route: Router) -> Service {
    let mut builder = TestContextBuilder::new();
    builder.taxonomy = taxonomy;

    service(builder.into_state(), route, None)
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    let mut builder = TestContextBuilder::new();
    builder.carts = carts;

    service(builder.into_state(), route, Some(TEST_USER))
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    let mut builder = TestContextBuilder::new();
    builder.orders = orders;

    service(builder.into_state(), route, Some(TEST_USER))
}

pub(crate) fn admin_orders_service(orders: MockOrdersService, route: Router) -> Service {
    let mut builder = TestContextBuilder::new();
    builder.orders = orders;

    service(builder.into_state(), route, Some(TEST_ADMIN))
}

pub(crate) fn promotions_service(promotions: MockPromotionsService, route: Router) -> Service {
    let mut builder = TestContextBuilder::new();
    builder.promotions = promotions;

    service(builder.into_state(), route, Some(TEST_ADMIN))
}

pub(crate) fn inventory_service(inventory: MockInventoryService, route: Router) -> Service {
    let mut builder = TestContextBuilder::new();
    builder.inventory = inventory;

    service(builder.into_state(), route, Some(TEST_ADMIN))
}

pub(crate) fn stats_service(stats: MockStatsService, route: Router) -> Service {
    let mut builder = TestContextBuilder::new();
    builder.stats = stats;

    service(builder.into_state(), route, Some(TEST_ADMIN))
}

pub(crate) fn make_user(uuid: UserUuid, role: Role) -> User {
    User {
        uuid,
        username: "minh".to_string(),
        email: "minh@example.com".to_string(),
        name: "Minh".to_string(),
        password_hash: "$argon2id$test$hash".to_string(),
        role,
        is_active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid, price: u64) -> Product {
    Product {
        uuid,
        name: "Summer Linen Shirt".to_string(),
        slug: "summer-linen-shirt".to_string(),
        description: Some("Breathable linen".to_string()),
        sku: Some("SLS-001".to_string()),
        price,
        stock: 25,
        rating: 4.5,
        brand: None,
        category: CategoryUuid::from_uuid(Uuid::nil()),
        images: vec!["https://cdn.example.com/sls-front.jpg".to_string()],
        sizes: vec!["M".to_string(), "L".to_string()],
        is_clearance: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart(user: UserUuid) -> Cart {
    Cart {
        uuid: CartUuid::from_uuid(Uuid::nil()),
        user,
        lines: Vec::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(uuid: OrderUuid, user: UserUuid, status: OrderStatus) -> Order {
    Order {
        uuid,
        user,
        lines: Vec::new(),
        total: 200_000,
        payment_method: "cod".to_string(),
        shipping_address: "12 Hang Bai, Hanoi".to_string(),
        notes: None,
        status,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
