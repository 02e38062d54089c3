//! Bookshop Domain Concerns

pub mod books;
pub mod carts;
pub(crate) mod columns;
pub mod favorites;
pub mod orders;
pub mod pagination;
pub mod users;
