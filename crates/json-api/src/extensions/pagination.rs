//! Offset/limit query parameter helpers.

use salvo::oapi::extract::QueryParam;

use bookshop_app::domain::pagination::Pagination;

pub(crate) trait PaginationExt {
    fn into_pagination(self) -> Pagination;
}

impl PaginationExt for (QueryParam<u32, false>, QueryParam<u32, false>) {
    fn into_pagination(self) -> Pagination {
        let (offset, limit) = self;

        Pagination::new(offset.into_inner(), limit.into_inner())
    }
}
