//! Domain model and pure logic for the grocery catalog viewer.
//!
//! Nothing in this crate performs I/O: the normalizer, the catalog
//! view-state transitions and the detail lookup all operate on values
//! handed to them by the HTTP-facing crates.

pub mod app_config;
pub mod catalog;
pub mod config;
pub mod dates;
pub mod detail;
pub mod error;
pub mod load_state;
pub mod navigation;
pub mod normalize;
pub mod product;

pub use app_config::{AppConfig, Environment};
pub use catalog::{
    categories, CatalogPage, GridColumn, PageSize, SortDirection, SortField, SortItem, SortModel,
    ViewState,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use dates::DateField;
pub use detail::{detail_fields, find_product, DetailField};
pub use error::{ConfigError, CoreError, ViewError};
pub use load_state::LoadState;
pub use navigation::Navigation;
pub use normalize::{normalize_payload, normalize_products, normalize_record};
pub use product::{NormalizedProduct, ProductId};
