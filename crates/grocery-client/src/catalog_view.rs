//! The catalog grid as a mounted, stateful view.
//!
//! Mounting starts one fetch through the relay. User actions map onto the
//! pure [`ViewState`] transitions; search text goes through a 300 ms
//! debounce first. Rendering code reads a [`CatalogSnapshot`].

use std::sync::{Arc, Weak};
use std::time::Duration;

use grocery_core::catalog::SEARCH_DEBOUNCE_MS;
use grocery_core::{
    categories, LoadState, Navigation, NormalizedProduct, PageSize, SortModel, ViewError,
    ViewState,
};
use tokio::sync::watch;

use crate::client::CatalogClient;
use crate::debounce::Debouncer;
use crate::notification::Notification;
use crate::view::{update_if_mounted, ViewCell};

#[derive(Debug)]
struct CatalogModel {
    load: LoadState<Vec<NormalizedProduct>>,
    state: ViewState,
    notification: Option<Notification>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogStatus {
    Loading,
    Ready,
    Failed,
}

/// Everything needed to draw the catalog at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    pub status: CatalogStatus,
    pub state: ViewState,
    /// Category choices, from the unfiltered collection.
    pub categories: Vec<String>,
    /// Visible rows; empty unless `status` is `Ready`.
    pub rows: Vec<NormalizedProduct>,
    pub total_rows: usize,
    pub page: usize,
    pub page_count: usize,
    /// Error message, while the notification is showing.
    pub notification: Option<String>,
}

pub struct CatalogView {
    cell: Arc<ViewCell<CatalogModel>>,
    changes: watch::Receiver<u64>,
    search: Debouncer,
}

impl CatalogView {
    /// Mounts the view and starts fetching the catalog from `client`.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn mount(client: CatalogClient) -> Self {
        Self::mount_with_state(client, ViewState::default())
    }

    /// Like [`CatalogView::mount`], starting from `initial` instead of the
    /// default view state.
    #[must_use]
    pub fn mount_with_state(client: CatalogClient, initial: ViewState) -> Self {
        let view = Self::unmounted();
        view.cell.update(|m| {
            m.state = initial;
            m.load.start()
        });

        let cell = Arc::downgrade(&view.cell);
        tokio::spawn(async move {
            let outcome = client.fetch_products().await;
            if let Err(e) = &outcome {
                tracing::error!(error = %e, url = client.url(), "catalog fetch failed");
            }
            apply_fetch(&cell, outcome.map_err(|_| ViewError::FetchProducts));
        });

        view
    }

    fn unmounted() -> Self {
        let (cell, changes) = ViewCell::new(CatalogModel {
            load: LoadState::Idle,
            state: ViewState::default(),
            notification: None,
        });
        Self {
            cell,
            changes,
            search: Debouncer::new(Duration::from_millis(SEARCH_DEBOUNCE_MS)),
        }
    }

    /// Feeds raw search input. The filter changes only after 300 ms without
    /// further input.
    pub fn input_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        let cell = Arc::downgrade(&self.cell);
        self.search.schedule(move || {
            let applied = update_if_mounted(&cell, |m| {
                m.state = m.state.clone().with_search(text);
            });
            if !applied {
                tracing::debug!("search debounce fired after unmount");
            }
        });
    }

    pub fn select_category(&self, category: Option<String>) {
        self.transition(|state| state.with_category(category));
    }

    pub fn change_sort(&self, sort: SortModel) {
        self.transition(|state| state.with_sort(sort));
    }

    pub fn change_page(&self, page: usize) {
        self.transition(|state| state.with_page(page));
    }

    pub fn change_page_size(&self, page_size: PageSize) {
        self.transition(|state| state.with_page_size(page_size));
    }

    pub fn dismiss_notification(&self) {
        self.cell.update(|m| {
            if let Some(notification) = m.notification.as_mut() {
                notification.dismiss();
            }
        });
    }

    fn transition(&self, f: impl FnOnce(ViewState) -> ViewState) {
        self.cell.update(|m| m.state = f(m.state.clone()));
    }

    /// Navigation for the `row`-th visible row, if there is one.
    #[must_use]
    pub fn select_row(&self, row: usize) -> Option<Navigation> {
        self.cell.read(|m| {
            let products = m.load.success()?;
            m.state.page(products).select(row)
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> CatalogSnapshot {
        self.cell.read(|m| {
            let notification = m
                .notification
                .as_ref()
                .filter(|n| n.is_visible())
                .map(|n| n.message().to_string());

            let mut snapshot = CatalogSnapshot {
                status: CatalogStatus::Loading,
                state: m.state.clone(),
                categories: Vec::new(),
                rows: Vec::new(),
                total_rows: 0,
                page: 0,
                page_count: 0,
                notification,
            };

            match &m.load {
                LoadState::Idle | LoadState::Loading => {}
                LoadState::Error(_) => snapshot.status = CatalogStatus::Failed,
                LoadState::Success(products) => {
                    let page = m.state.page(products);
                    snapshot.status = CatalogStatus::Ready;
                    snapshot.categories =
                        categories(products).into_iter().map(str::to_string).collect();
                    snapshot.total_rows = page.total_rows;
                    snapshot.page = page.page;
                    snapshot.page_count = page.page_count;
                    snapshot.rows = page.rows.into_iter().cloned().collect();
                }
            }
            snapshot
        })
    }

    /// Waits for the next state change.
    pub async fn changed(&mut self) {
        // The sender lives in `self.cell`, so this cannot observe a closed
        // channel while `self` is alive.
        let _ = self.changes.changed().await;
    }

    /// Waits until the initial fetch has succeeded or failed.
    pub async fn settled(&mut self) {
        while !self.cell.read(|m| m.load.is_settled()) {
            self.changed().await;
        }
    }

    /// Tears the view down. Pending search input is discarded and an
    /// in-flight fetch finishes without effect.
    pub fn unmount(mut self) {
        self.search.cancel();
    }
}

fn apply_fetch(
    cell: &Weak<ViewCell<CatalogModel>>,
    outcome: Result<Vec<NormalizedProduct>, ViewError>,
) {
    let applied = update_if_mounted(cell, |m| {
        if let Err(error) = &outcome {
            m.notification = Some(Notification::raise(error.to_string()));
        }
        m.load.finish(outcome);
    });
    if !applied {
        tracing::debug!("catalog view unmounted before fetch completed; result discarded");
    }
}
