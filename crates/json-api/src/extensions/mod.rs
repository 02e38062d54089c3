//! Extension traits

mod depot;
mod pagination;
mod response;

pub(crate) use depot::DepotExt as _;
pub(crate) use pagination::PaginationExt as _;
pub(crate) use response::ResponseExt as _;
