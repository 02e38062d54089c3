//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use bookshop_app::{
    auth::{AuthenticatedUser, MockAuthService},
    context::AppContext,
    domain::{
        books::{
            MockBooksService,
            records::{BookRecord, BookUuid},
        },
        carts::MockCartsService,
        favorites::MockFavoritesService,
        orders::MockOrdersService,
        users::{MockUsersService, records::UserUuid},
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) fn test_user() -> AuthenticatedUser {
    AuthenticatedUser {
        uuid: TEST_USER_UUID,
        username: "reader".to_string(),
        is_admin: false,
    }
}

pub(crate) fn test_admin() -> AuthenticatedUser {
    AuthenticatedUser {
        is_admin: true,
        username: "librarian".to_string(),
        ..test_user()
    }
}

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_current_user(test_user());
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_current_user(test_admin());
    ctrl.call_next(req, depot, res).await;
}

/// An app whose services all panic when called.
pub(crate) fn strict_app() -> AppContext {
    AppContext {
        auth: Arc::new(MockAuthService::new()),
        users: Arc::new(MockUsersService::new()),
        books: Arc::new(MockBooksService::new()),
        carts: Arc::new(MockCartsService::new()),
        orders: Arc::new(MockOrdersService::new()),
        favorites: Arc::new(MockFavoritesService::new()),
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    State::from_app_context(AppContext {
        auth: Arc::new(auth),
        ..strict_app()
    })
}

/// Serve `route` without an authenticated user.
pub(crate) fn anonymous_service(app: AppContext, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(app)))
            .push(route),
    )
}

/// Serve `route` as the regular test user.
pub(crate) fn user_service(app: AppContext, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(app)))
            .hoop(inject_user)
            .push(route),
    )
}

/// Serve `route` as the admin test user.
pub(crate) fn admin_service(app: AppContext, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(app)))
            .hoop(inject_admin)
            .push(route),
    )
}

pub(crate) fn make_book(uuid: BookUuid, price: u64) -> BookRecord {
    BookRecord {
        uuid,
        title: "Dune".to_string(),
        author: "Frank Herbert".to_string(),
        description: None,
        price,
        category: Some("sci-fi".to_string()),
        pdf_url: None,
        cover_image_url: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}
