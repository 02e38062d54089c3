//! Offset pagination

/// Default page size when the caller does not ask for one.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Largest page a caller may request.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Offset/limit window over an ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: u32,
    pub limit: u32,
}

impl Pagination {
    /// Build a window from optional query values, clamping the limit to `1..=MAX_PAGE_LIMIT`.
    #[must_use]
    pub fn new(offset: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            offset: offset.unwrap_or(0),
            limit: limit
                .unwrap_or(DEFAULT_PAGE_LIMIT)
                .clamp(1, MAX_PAGE_LIMIT),
        }
    }

    pub(crate) fn offset_i64(self) -> i64 {
        i64::from(self.offset)
    }

    pub(crate) fn limit_i64(self) -> i64 {
        i64::from(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_hundred() {
        assert_eq!(
            Pagination::default(),
            Pagination {
                offset: 0,
                limit: 100
            }
        );
    }

    #[test]
    fn clamps_limit() {
        assert_eq!(Pagination::new(None, Some(0)).limit, 1);
        assert_eq!(Pagination::new(None, Some(5_000)).limit, MAX_PAGE_LIMIT);
        assert_eq!(Pagination::new(Some(20), Some(10)).offset, 20);
    }
}
