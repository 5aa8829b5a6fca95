use crate::error::ViewError;

/// Per-mount load lifecycle: `Idle -> Loading -> {Success, Error}`.
///
/// Entered once; there is no transition out of a settled state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Error(ViewError),
}

impl<T> LoadState<T> {
    /// Moves `Idle` to `Loading`. Returns `false` from any other state.
    pub fn start(&mut self) -> bool {
        if matches!(self, LoadState::Idle) {
            *self = LoadState::Loading;
            true
        } else {
            false
        }
    }

    /// Settles a `Loading` state. Returns `false`, leaving the state
    /// unchanged, when not loading.
    pub fn finish(&mut self, outcome: Result<T, ViewError>) -> bool {
        if !matches!(self, LoadState::Loading) {
            return false;
        }
        *self = match outcome {
            Ok(value) => LoadState::Success(value),
            Err(error) => LoadState::Error(error),
        };
        true
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self, LoadState::Success(_) | LoadState::Error(_))
    }

    #[must_use]
    pub fn success(&self) -> Option<&T> {
        match self {
            LoadState::Success(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<ViewError> {
        match self {
            LoadState::Error(error) => Some(*error),
            _ => None,
        }
    }
}
