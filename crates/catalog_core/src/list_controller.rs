//! Async driver around [`ListState`].
//!
//! The lock is only held while a transition runs; fetches are awaited with it
//! released so overlapping intents can interleave, and completions come back
//! through the token checks in [`ListState`].

use std::sync::Arc;

use shared::domain::{PageDirection, TypeTag};
use tokio::sync::{broadcast, Mutex};
use tracing::debug;

use crate::{
    view_state::{FetchOutcome, ListSnapshot, ListState, PageRequest},
    CatalogApi,
};

#[derive(Debug, Clone)]
pub enum ListEvent {
    Updated(ListSnapshot),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitializeOutcome {
    pub page: FetchOutcome,
    pub vocabulary: FetchOutcome,
}

pub struct ListController {
    api: Arc<dyn CatalogApi>,
    state: Mutex<ListState>,
    events: broadcast::Sender<ListEvent>,
}

impl ListController {
    pub fn new(api: Arc<dyn CatalogApi>) -> Arc<Self> {
        Self::with_state(api, ListState::new())
    }

    pub fn with_page_limit(api: Arc<dyn CatalogApi>, limit: u32) -> Arc<Self> {
        Self::with_state(api, ListState::with_page_limit(limit))
    }

    fn with_state(api: Arc<dyn CatalogApi>, state: ListState) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            api,
            state: Mutex::new(state),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ListEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> ListSnapshot {
        self.state.lock().await.snapshot()
    }

    fn publish(&self, snapshot: ListSnapshot) {
        let _ = self.events.send(ListEvent::Updated(snapshot));
    }

    pub async fn initialize(&self) -> InitializeOutcome {
        let (page_request, vocabulary_request) = {
            let mut state = self.state.lock().await;
            let requests = state.begin_initialize();
            self.publish(state.snapshot());
            requests
        };

        let page = self.load_page(page_request);
        let vocabulary = async {
            let result = self.api.fetch_types().await;
            let mut state = self.state.lock().await;
            let outcome = state.complete_vocabulary(vocabulary_request, result);
            if outcome == FetchOutcome::Applied {
                self.publish(state.snapshot());
            }
            outcome
        };

        let (page, vocabulary) = futures::join!(page, vocabulary);
        InitializeOutcome { page, vocabulary }
    }

    /// Moves relative to the newest requested page, so calls issued before
    /// the previous one lands still chain.
    pub async fn go_to_page(&self, direction: PageDirection) -> FetchOutcome {
        let request = {
            let mut state = self.state.lock().await;
            let Some(request) = state.begin_page(direction) else {
                debug!(?direction, "page change is a no-op");
                return FetchOutcome::Skipped;
            };
            self.publish(state.snapshot());
            request
        };
        self.load_page(request).await
    }

    /// Jump straight to a 1-based page; clamped to the known total.
    pub async fn go_to_page_number(&self, page: u32) -> FetchOutcome {
        let request = {
            let mut state = self.state.lock().await;
            let Some(request) = state.begin_page_number(page) else {
                return FetchOutcome::Skipped;
            };
            self.publish(state.snapshot());
            request
        };
        self.load_page(request).await
    }

    async fn load_page(&self, request: PageRequest) -> FetchOutcome {
        let result = self.api.fetch_page(request.query).await;
        let mut state = self.state.lock().await;
        let outcome = state.complete_page(request, result);
        if outcome != FetchOutcome::Stale {
            self.publish(state.snapshot());
        }
        outcome
    }

    pub async fn set_type_filter(&self, tag: Option<TypeTag>) -> FetchOutcome {
        let request = {
            let mut state = self.state.lock().await;
            let request = state.begin_type_filter(tag);
            self.publish(state.snapshot());
            match request {
                Some(request) => request,
                None => return FetchOutcome::Applied,
            }
        };

        let result = self.api.fetch_type_members(&request.tag.name).await;
        let mut state = self.state.lock().await;
        let outcome = state.complete_type_filter(&request, result);
        if outcome != FetchOutcome::Stale {
            self.publish(state.snapshot());
        }
        outcome
    }

    pub async fn set_search_text(&self, text: &str) {
        let mut state = self.state.lock().await;
        state.set_search_text(text);
        self.publish(state.snapshot());
    }

    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        state.reset();
        self.publish(state.snapshot());
    }
}

#[cfg(test)]
#[path = "tests/list_controller_tests.rs"]
mod tests;
