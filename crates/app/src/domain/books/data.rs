//! Book Data

use crate::domain::{
    books::{errors::BooksServiceError, records::BookUuid},
    pagination::Pagination,
};

/// Editable book fields, used for creation and full replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDetails {
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub price: u64,
    pub category: Option<String>,
    pub pdf_url: Option<String>,
    pub cover_image_url: Option<String>,
}

impl BookDetails {
    pub(crate) fn validate(&self) -> Result<(), BooksServiceError> {
        validate_text(&self.title)?;
        validate_text(&self.author)?;
        validate_price(self.price)
    }
}

/// New Book Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub uuid: BookUuid,
    pub details: BookDetails,
}

/// Partial Book Update Data
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub price: Option<u64>,
    pub category: Option<String>,
    pub pdf_url: Option<String>,
    pub cover_image_url: Option<String>,
}

impl BookUpdate {
    pub(crate) fn validate(&self) -> Result<(), BooksServiceError> {
        if let Some(title) = &self.title {
            validate_text(title)?;
        }

        if let Some(author) = &self.author {
            validate_text(author)?;
        }

        if let Some(price) = self.price {
            validate_price(price)?;
        }

        Ok(())
    }
}

/// Catalog listing filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFilter {
    pub category: Option<String>,
    pub page: Pagination,
}

fn validate_text(value: &str) -> Result<(), BooksServiceError> {
    if value.trim().is_empty() {
        return Err(BooksServiceError::InvalidData);
    }

    Ok(())
}

fn validate_price(price: u64) -> Result<(), BooksServiceError> {
    if price == 0 {
        return Err(BooksServiceError::InvalidData);
    }

    Ok(())
}
