//! App Router

use salvo::Router;

use crate::{auth, books, cart, favorites, orders, users};

/// Every API route.
///
/// Registration, login and catalog reads are public. Everything else runs
/// behind the bearer token hoop, and catalog writes plus user management
/// additionally require an admin.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("register").post(auth::register::handler))
        .push(Router::with_path("login").post(auth::login::handler))
        .push(
            Router::with_path("books")
                .get(books::index::handler)
                .push(Router::with_path("{book}").get(books::get::handler)),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(Router::with_path("users/me").get(users::me::handler))
                .push(
                    Router::with_path("cart")
                        .get(cart::get::handler)
                        .delete(cart::clear::handler)
                        .push(
                            Router::with_path("items")
                                .post(cart::items::add::handler)
                                .push(
                                    Router::with_path("{book}")
                                        .patch(cart::items::update::handler)
                                        .delete(cart::items::delete::handler),
                                ),
                        ),
                )
                .push(
                    Router::with_path("orders")
                        .get(orders::index::handler)
                        .post(orders::create::handler)
                        .push(Router::with_path("{order}").get(orders::get::handler)),
                )
                .push(
                    Router::with_path("favorites")
                        .get(favorites::index::handler)
                        .post(favorites::create::handler)
                        .push(Router::with_path("{book}").delete(favorites::delete::handler)),
                )
                .push(admin_router()),
        )
}

fn admin_router() -> Router {
    Router::new()
        .hoop(auth::middleware::require_admin)
        .push(
            Router::with_path("books")
                .post(books::create::handler)
                .push(
                    Router::with_path("{book}")
                        .put(books::replace::handler)
                        .patch(books::update::handler)
                        .delete(books::delete::handler),
                ),
        )
        .push(
            Router::with_path("users")
                .get(users::index::handler)
                .push(
                    Router::with_path("{user}")
                        .get(users::get::handler)
                        .patch(users::update::handler)
                        .delete(users::delete::handler),
                ),
        )
}
