//! Test Helpers

use jiff::SignedDuration;

use crate::{
    auth::{AccessTokenCodec, TokenSecret},
    domain::{
        books::{
            BooksService, BooksServiceError,
            data::{BookDetails, NewBook},
            records::{BookRecord, BookUuid},
        },
        users::{
            UsersService, UsersServiceError,
            data::NewUser,
            records::{UserRecord, UserUuid},
        },
    },
    test::TestContext,
};

pub(crate) const TEST_PASSWORD: &str = "correct-horse";

const TEST_TOKEN_SECRET: &str = "bookshop-test-secret";

pub(crate) fn token_codec() -> AccessTokenCodec {
    AccessTokenCodec::new(
        TokenSecret::new(TEST_TOKEN_SECRET),
        SignedDuration::from_mins(30),
    )
}

pub(crate) fn book_details(title: &str, price: u64) -> BookDetails {
    BookDetails {
        title: title.to_string(),
        author: "Test Author".to_string(),
        description: None,
        price,
        category: None,
        pdf_url: None,
        cover_image_url: None,
    }
}

pub(crate) async fn create_book(
    ctx: &TestContext,
    title: &str,
    price: u64,
) -> Result<BookRecord, BooksServiceError> {
    ctx.books
        .create_book(NewBook {
            uuid: BookUuid::new(),
            details: book_details(title, price),
        })
        .await
}

/// Create an active user with email `{username}@example.com`.
///
/// The stored hash is a placeholder; use the auth service when a test needs to log in.
pub(crate) async fn create_user(
    ctx: &TestContext,
    username: &str,
) -> Result<UserRecord, UsersServiceError> {
    ctx.users
        .create_user(NewUser {
            uuid: UserUuid::new(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
            is_admin: false,
        })
        .await
}
