use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unsupported page size {0}; expected one of 5, 10, 20")]
    InvalidPageSize(usize),

    #[error("unknown sort field: {0}")]
    UnknownSortField(String),

    #[error("unknown sort direction: {0}")]
    UnknownSortDirection(String),

    #[error("unrecognized navigation path: {0}")]
    InvalidNavigation(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// User-visible failure of a catalog or detail view load.
///
/// The display strings are shown verbatim to the user, so they carry no
/// upstream detail.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("Failed to fetch products")]
    FetchProducts,

    #[error("Product ID is missing")]
    MissingProductId,

    #[error("Product not found")]
    ProductNotFound,

    #[error("Failed to fetch product details")]
    FetchProductDetails,
}
