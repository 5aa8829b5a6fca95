//! Addressing between the catalog and detail views.
//!
//! The detail view is reached through `/product-details?id=<token>`; the
//! token is the only state that crosses views.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::CoreError;
use crate::product::NormalizedProduct;

pub const CATALOG_PATH: &str = "/";
pub const DETAILS_PATH: &str = "/product-details";

/// Characters left unescaped in a query value.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Catalog,
    /// `id` is `None` when the query parameter was absent or empty.
    ProductDetails { id: Option<String> },
}

impl Navigation {
    #[must_use]
    pub fn for_product(product: &NormalizedProduct) -> Self {
        Navigation::ProductDetails {
            id: Some(product.id.to_string()),
        }
    }

    #[must_use]
    pub fn to_path(&self) -> String {
        match self {
            Navigation::Catalog => CATALOG_PATH.to_string(),
            Navigation::ProductDetails { id: Some(id) } => {
                format!("{DETAILS_PATH}?id={}", utf8_percent_encode(id, QUERY_VALUE))
            }
            Navigation::ProductDetails { id: None } => DETAILS_PATH.to_string(),
        }
    }

    /// Parses a path with an optional query string.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidNavigation`] for paths other than the
    /// catalog and detail routes.
    pub fn parse(path: &str) -> Result<Self, CoreError> {
        let (route, query) = path.split_once('?').unwrap_or((path, ""));
        match route {
            "" | CATALOG_PATH => Ok(Navigation::Catalog),
            DETAILS_PATH => Ok(Navigation::ProductDetails {
                id: query_param(query, "id").filter(|id| !id.is_empty()),
            }),
            _ => Err(CoreError::InvalidNavigation(path.to_string())),
        }
    }
}

/// First value for `key`, decoded the way browsers decode form queries
/// (`+` is a space).
fn query_param(query: &str, key: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        if name != key {
            return None;
        }
        let value = value.replace('+', " ");
        Some(percent_decode_str(&value).decode_utf8_lossy().into_owned())
    })
}
