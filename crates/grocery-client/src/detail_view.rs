//! The single-product view.
//!
//! Shares nothing with the catalog view: every mount fetches and normalizes
//! the whole collection again, then looks up the requested id.

use std::sync::{Arc, Weak};

use grocery_core::{find_product, LoadState, Navigation, NormalizedProduct, ViewError};
use tokio::sync::watch;

use crate::client::CatalogClient;
use crate::view::{update_if_mounted, ViewCell};

pub struct DetailView {
    cell: Arc<ViewCell<LoadState<NormalizedProduct>>>,
    changes: watch::Receiver<u64>,
}

impl DetailView {
    /// Mounts the view for `id`.
    ///
    /// A missing or empty id settles immediately as
    /// [`ViewError::MissingProductId`] without any fetch. Otherwise one
    /// fetch is started; must then be called from within a Tokio runtime.
    #[must_use]
    pub fn mount(client: CatalogClient, id: Option<String>) -> Self {
        let (cell, changes) = ViewCell::new(LoadState::Idle);
        cell.update(LoadState::start);

        match id.filter(|id| !id.is_empty()) {
            None => {
                cell.update(|load| load.finish(Err(ViewError::MissingProductId)));
            }
            Some(id) => {
                let weak = Arc::downgrade(&cell);
                tokio::spawn(async move {
                    let outcome = match client.fetch_products().await {
                        Ok(products) => find_product(&products, &id)
                            .cloned()
                            .ok_or(ViewError::ProductNotFound),
                        Err(e) => {
                            tracing::error!(
                                error = %e,
                                url = client.url(),
                                "product detail fetch failed"
                            );
                            Err(ViewError::FetchProductDetails)
                        }
                    };
                    apply_lookup(&weak, outcome);
                });
            }
        }

        Self { cell, changes }
    }

    /// Mounts the view addressed by `navigation`.
    ///
    /// Returns `None` for navigations that do not target the detail view.
    #[must_use]
    pub fn open(client: CatalogClient, navigation: &Navigation) -> Option<Self> {
        match navigation {
            Navigation::ProductDetails { id } => Some(Self::mount(client, id.clone())),
            Navigation::Catalog => None,
        }
    }

    #[must_use]
    pub fn state(&self) -> LoadState<NormalizedProduct> {
        self.cell.read(LoadState::clone)
    }

    /// Waits for the lookup to settle and returns the final state.
    pub async fn settled(&mut self) -> LoadState<NormalizedProduct> {
        loop {
            let state = self.state();
            if state.is_settled() {
                return state;
            }
            // The sender lives in `self.cell`; the channel stays open.
            let _ = self.changes.changed().await;
        }
    }
}

fn apply_lookup(
    cell: &Weak<ViewCell<LoadState<NormalizedProduct>>>,
    outcome: Result<NormalizedProduct, ViewError>,
) {
    if !update_if_mounted(cell, |load| {
        load.finish(outcome);
    }) {
        tracing::debug!("detail view unmounted before fetch completed; result discarded");
    }
}
