//! Last-good snapshot per resource, with request sequencing.
//!
//! Every action takes a [`RequestToken`] before its round trip. Tokens are
//! handed out in increasing order, and a result is applied only if its token
//! is newer than the last one settled, so a slow response can never overwrite
//! a fresher one. A failure records the user message and keeps the data.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use serde::Serialize;

use crate::app::errors::{ActionError, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

#[derive(Debug, Default)]
struct ViewState<S> {
    data: S,
    error: Option<String>,
    in_flight: usize,
    settled: u64,
}

/// What `GET /<resource>/view` returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot<S> {
    pub data: S,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct ResourceView<S> {
    resource: Resource,
    next_token: AtomicU64,
    state: RwLock<ViewState<S>>,
}

impl<S: Clone + Default> ResourceView<S> {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            next_token: AtomicU64::new(0),
            state: RwLock::new(ViewState::default()),
        }
    }

    /// Start an action. The view counts as loading until the returned guard
    /// is settled or dropped.
    pub fn begin(&self) -> Pending<'_, S> {
        let token = RequestToken(self.next_token.fetch_add(1, Ordering::SeqCst) + 1);
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .in_flight += 1;
        Pending { view: self, token }
    }

    pub fn snapshot(&self) -> ViewSnapshot<S> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        ViewSnapshot {
            data: state.data.clone(),
            loading: state.in_flight > 0,
            error: state.error.clone(),
        }
    }

    /// Run `action` under a fresh token and settle the view with its result.
    ///
    /// The caller always gets its own result back, even when a newer action
    /// has already settled and this one is discarded from the view.
    pub async fn run<F>(&self, action: F) -> Result<S, ActionError>
    where
        F: Future<Output = Result<S, ActionError>>,
    {
        let pending = self.begin();
        match action.await {
            Ok(data) => {
                pending.commit(data.clone());
                Ok(data)
            }
            Err(err) => {
                pending.fail(err);
                Err(err)
            }
        }
    }

    fn settle(&self, token: RequestToken, outcome: Result<S, ActionError>) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if token.0 <= state.settled {
            tracing::debug!(
                resource = self.resource.plural,
                token = token.0,
                settled = state.settled,
                "discarding stale response"
            );
            return false;
        }

        state.settled = token.0;
        match outcome {
            Ok(data) => {
                state.data = data;
                state.error = None;
            }
            Err(err) => {
                state.error = Some(err.user_message(self.resource));
            }
        }
        true
    }

    fn finish(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.in_flight = state.in_flight.saturating_sub(1);
    }
}

/// An action that has taken its token but not yet settled.
#[must_use = "a pending action keeps the view loading until it is settled"]
pub struct Pending<'a, S: Clone + Default> {
    view: &'a ResourceView<S>,
    token: RequestToken,
}

impl<S: Clone + Default> Pending<'_, S> {
    pub fn token(&self) -> RequestToken {
        self.token
    }

    /// Apply a fresh snapshot. Returns `false` if it was stale.
    pub fn commit(self, data: S) -> bool {
        self.view.settle(self.token, Ok(data))
    }

    /// Record a failure; the snapshot is kept. Returns `false` if it was stale.
    pub fn fail(self, err: ActionError) -> bool {
        self.view.settle(self.token, Err(err))
    }
}

impl<S: Clone + Default> Drop for Pending<'_, S> {
    fn drop(&mut self) {
        self.view.finish();
    }
}
