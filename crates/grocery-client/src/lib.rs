pub mod catalog_view;
pub mod client;
pub mod debounce;
pub mod detail_view;
pub mod error;
pub mod notification;
mod view;

pub use catalog_view::{CatalogSnapshot, CatalogStatus, CatalogView};
pub use client::CatalogClient;
pub use debounce::Debouncer;
pub use detail_view::DetailView;
pub use error::ClientError;
pub use notification::Notification;
