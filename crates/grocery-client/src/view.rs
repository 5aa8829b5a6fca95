//! State cell shared between a mounted view and its background tasks.
//!
//! The view owns the only strong reference. Tasks hold a [`Weak`] and
//! re-acquire it when they finish, so a result arriving after unmount finds
//! nothing to update and is dropped.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use tokio::sync::watch;

pub(crate) struct ViewCell<M> {
    model: Mutex<M>,
    revision: watch::Sender<u64>,
}

impl<M> ViewCell<M> {
    pub(crate) fn new(model: M) -> (Arc<Self>, watch::Receiver<u64>) {
        let (revision, changes) = watch::channel(0);
        let cell = Arc::new(Self {
            model: Mutex::new(model),
            revision,
        });
        (cell, changes)
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&M) -> R) -> R {
        let model = self.model.lock().unwrap_or_else(PoisonError::into_inner);
        f(&model)
    }

    /// Mutates the model and wakes anyone waiting on the revision channel.
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut M) -> R) -> R {
        let result = {
            let mut model = self.model.lock().unwrap_or_else(PoisonError::into_inner);
            f(&mut model)
        };
        self.revision.send_modify(|rev| *rev += 1);
        result
    }
}

/// Applies `f` if the view is still mounted. Returns whether it was.
pub(crate) fn update_if_mounted<M>(cell: &Weak<ViewCell<M>>, f: impl FnOnce(&mut M)) -> bool {
    match cell.upgrade() {
        Some(cell) => {
            cell.update(f);
            true
        }
        None => false,
    }
}
