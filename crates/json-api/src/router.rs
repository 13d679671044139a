//! App Router

use salvo::Router;

use crate::{admin, auth, carts, orders, products, promotions, taxonomy};

/// The full route tree. Catalog reads are public; everything else sits
/// behind the auth hoop, and admin surfaces additionally behind the role
/// gate.
pub(crate) fn app_router() -> Router {
    Router::new()
        // Public: registration, login, catalog reads.
        .push(
            Router::with_path("auth")
                .push(Router::with_path("register").post(auth::handlers::register::handler))
                .push(Router::with_path("login").post(auth::handlers::login::handler)),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{key}").get(products::get::handler)),
        )
        .push(Router::with_path("brands").get(taxonomy::brands::index))
        .push(Router::with_path("categories").get(taxonomy::categories::index))
        // Authenticated surface.
        .push(
            Router::new()
                .hoop(auth::middleware::authenticate)
                .push(
                    Router::with_path("auth/me")
                        .get(auth::handlers::me::handler)
                        .put(auth::handlers::update_me::handler),
                )
                .push(
                    Router::with_path("cart")
                        .get(carts::get::handler)
                        .delete(carts::clear::handler)
                        .push(
                            Router::with_path("items")
                                .post(carts::items::create::handler)
                                .push(
                                    Router::with_path("{item}")
                                        .put(carts::items::update::handler)
                                        .delete(carts::items::delete::handler),
                                ),
                        ),
                )
                .push(
                    Router::with_path("orders")
                        .get(orders::index::handler)
                        .post(orders::create::handler)
                        .push(
                            Router::with_path("{order}")
                                .get(orders::get::handler)
                                .delete(orders::delete::handler),
                        ),
                )
                .push(
                    Router::with_path("promotions/validate")
                        .post(promotions::validate::handler),
                )
                // Admin surface: role gated.
                .push(
                    Router::new()
                        .hoop(auth::middleware::require_admin)
                        .push(
                            Router::with_path("products")
                                .post(products::create::handler)
                                .push(
                                    Router::with_path("{key}")
                                        .put(products::update::handler)
                                        .delete(products::delete::handler),
                                ),
                        )
                        .push(
                            Router::with_path("brands")
                                .post(taxonomy::brands::create)
                                .push(
                                    Router::with_path("{brand}")
                                        .put(taxonomy::brands::update)
                                        .delete(taxonomy::brands::delete),
                                ),
                        )
                        .push(
                            Router::with_path("categories")
                                .post(taxonomy::categories::create)
                                .push(
                                    Router::with_path("{category}")
                                        .put(taxonomy::categories::update)
                                        .delete(taxonomy::categories::delete),
                                ),
                        )
                        .push(
                            Router::with_path("orders/{order}/status")
                                .put(orders::update_status::handler),
                        )
                        .push(
                            Router::with_path("promotions")
                                .get(promotions::index::handler)
                                .post(promotions::create::handler)
                                .push(
                                    Router::with_path("{promotion}")
                                        .get(promotions::get::handler)
                                        .put(promotions::update::handler)
                                        .delete(promotions::delete::handler),
                                ),
                        )
                        .push(
                            Router::with_path("admin")
                                .push(Router::with_path("stats").get(admin::stats::handler))
                                .push(
                                    Router::with_path("users")
                                        .get(admin::users::index)
                                        .push(
                                            Router::with_path("{user}")
                                                .put(admin::users::update)
                                                .delete(admin::users::delete),
                                        ),
                                )
                                .push(
                                    Router::with_path("products/{key}/stock")
                                        .put(admin::inventory::set_stock),
                                )
                                .push(
                                    Router::with_path("products/{key}/stock/history")
                                        .get(admin::inventory::history),
                                )
                                .push(
                                    Router::with_path("inventory/low-stock")
                                        .get(admin::inventory::low_stock),
                                ),
                        ),
                ),
        )
}
