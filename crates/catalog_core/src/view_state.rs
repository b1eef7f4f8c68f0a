//! Catalog list state and its transitions.
//!
//! Every intent goes through a `begin_*` method that mutates local state and
//! hands back the request to issue (if any). Network completions come back
//! through `complete_*` with the token they were issued under; completions
//! for a superseded token are dropped. `displayed` is only ever written by
//! [`ListState::recompute`].

use shared::{
    domain::{EntitySummary, PageDirection, PageWindow, TypeTag},
    error::CatalogResult,
    protocol::{PageQuery, PageResponse},
};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Always stored lower-case.
    pub search_text: String,
    pub type_filter: Option<TypeTag>,
}

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        self.search_text.is_empty() && self.type_filter.is_none()
    }
}

/// Which input the displayed list is currently derived from.
///
/// Search, type membership and paging do not compose; whichever was applied
/// last owns the view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Projection {
    #[default]
    Page,
    Search,
    Type,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// A newer request for the same operation was issued before this one
    /// completed.
    Stale,
    Failed,
    /// Nothing to fetch.
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub token: RequestToken,
    pub query: PageQuery,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRequest {
    pub token: RequestToken,
    pub tag: TypeTag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocabularyRequest {
    pub token: RequestToken,
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot {
    pub window: PageWindow,
    pub base_list: Vec<EntitySummary>,
    pub displayed_list: Vec<EntitySummary>,
    pub type_vocabulary: Vec<TypeTag>,
    pub filter: FilterSpec,
    pub projection: Projection,
    pub is_loading: bool,
    pub can_go_prev: bool,
    pub can_go_next: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ListState {
    window: PageWindow,
    base_list: Vec<EntitySummary>,
    type_members: Option<Vec<EntitySummary>>,
    type_vocabulary: Vec<TypeTag>,
    filter: FilterSpec,
    projection: Projection,
    displayed: Vec<EntitySummary>,
    last_token: u64,
    pending_page: Option<PageRequest>,
    pending_type: Option<TypeRequest>,
    pending_vocabulary: Option<VocabularyRequest>,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_limit(limit: u32) -> Self {
        Self {
            window: PageWindow::with_limit(limit),
            ..Self::default()
        }
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    pub fn base_list(&self) -> &[EntitySummary] {
        &self.base_list
    }

    pub fn displayed(&self) -> &[EntitySummary] {
        &self.displayed
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn type_vocabulary(&self) -> &[TypeTag] {
        &self.type_vocabulary
    }

    /// Vocabulary loads do not count; only the page and type fetches gate the list.
    pub fn is_loading(&self) -> bool {
        self.pending_page.is_some() || self.pending_type.is_some()
    }

    pub fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            window: self.window,
            base_list: self.base_list.clone(),
            displayed_list: self.displayed.clone(),
            type_vocabulary: self.type_vocabulary.clone(),
            filter: self.filter.clone(),
            projection: self.projection,
            is_loading: self.is_loading(),
            can_go_prev: self.window.can_go_prev(),
            can_go_next: self.window.can_go_next(),
        }
    }

    fn issue_token(&mut self) -> RequestToken {
        self.last_token += 1;
        RequestToken(self.last_token)
    }

    fn issue_page(&mut self, offset: u32) -> PageRequest {
        let request = PageRequest {
            token: self.issue_token(),
            query: PageQuery {
                offset,
                limit: self.window.limit(),
            },
        };
        self.pending_page = Some(request);
        request
    }

    /// First page plus the type vocabulary, fetched independently.
    pub fn begin_initialize(&mut self) -> (PageRequest, VocabularyRequest) {
        let page = self.issue_page(0);
        let vocabulary = VocabularyRequest {
            token: self.issue_token(),
        };
        self.pending_vocabulary = Some(vocabulary);
        (page, vocabulary)
    }

    /// Window a page move starts from: the page already requested if one is
    /// in flight, otherwise the committed one.
    fn page_origin(&self) -> PageWindow {
        match self.pending_page {
            Some(pending) => self.window.at_offset(pending.query.offset),
            None => self.window,
        }
    }

    pub fn begin_page(&mut self, direction: PageDirection) -> Option<PageRequest> {
        let offset = self.page_origin().target(direction)?;
        Some(self.issue_page(offset))
    }

    /// Jump to a 1-based page number, clamped to the known total.
    pub fn begin_page_number(&mut self, page: u32) -> Option<PageRequest> {
        let origin = self.page_origin();
        let offset = origin.offset_for_page(page);
        if offset == origin.offset() {
            return None;
        }
        Some(self.issue_page(offset))
    }

    pub fn complete_page(
        &mut self,
        request: PageRequest,
        result: CatalogResult<PageResponse>,
    ) -> FetchOutcome {
        if self.pending_page.map(|pending| pending.token) != Some(request.token) {
            debug!(
                token = request.token.0,
                offset = request.query.offset,
                "dropping stale page response"
            );
            return FetchOutcome::Stale;
        }
        self.pending_page = None;

        match result {
            Ok(page) => {
                info!(
                    offset = request.query.offset,
                    count = page.results.len(),
                    total = page.count,
                    "catalog page loaded"
                );
                self.window.commit(request.query.offset, page.count);
                self.base_list = page.results;
                // A new page replaces whatever filter projection was showing.
                self.projection = Projection::Page;
                self.recompute();
                FetchOutcome::Applied
            }
            Err(err) => {
                warn!(offset = request.query.offset, "error fetching catalog page: {err}");
                FetchOutcome::Failed
            }
        }
    }

    pub fn complete_vocabulary(
        &mut self,
        request: VocabularyRequest,
        result: CatalogResult<Vec<TypeTag>>,
    ) -> FetchOutcome {
        if self.pending_vocabulary.map(|pending| pending.token) != Some(request.token) {
            return FetchOutcome::Stale;
        }
        self.pending_vocabulary = None;

        match result {
            Ok(types) => {
                info!(count = types.len(), "type vocabulary loaded");
                self.type_vocabulary = types;
                FetchOutcome::Applied
            }
            Err(err) => {
                warn!("error fetching type vocabulary: {err}");
                FetchOutcome::Failed
            }
        }
    }

    /// `None` clears the type filter and shows the current page again.
    pub fn begin_type_filter(&mut self, tag: Option<TypeTag>) -> Option<TypeRequest> {
        self.filter.type_filter = tag.clone();
        match tag {
            None => {
                self.pending_type = None;
                self.type_members = None;
                self.projection = Projection::Page;
                self.recompute();
                None
            }
            Some(tag) => {
                let request = TypeRequest {
                    token: self.issue_token(),
                    tag,
                };
                self.pending_type = Some(request.clone());
                Some(request)
            }
        }
    }

    pub fn complete_type_filter(
        &mut self,
        request: &TypeRequest,
        result: CatalogResult<Vec<EntitySummary>>,
    ) -> FetchOutcome {
        if self.pending_type.as_ref().map(|pending| pending.token) != Some(request.token) {
            debug!(
                token = request.token.0,
                type_name = %request.tag.name,
                "dropping stale type membership response"
            );
            return FetchOutcome::Stale;
        }
        self.pending_type = None;

        match result {
            Ok(members) => {
                info!(
                    type_name = %request.tag.name,
                    count = members.len(),
                    "type membership loaded"
                );
                self.type_members = Some(members);
                self.projection = Projection::Type;
                self.recompute();
                FetchOutcome::Applied
            }
            Err(err) => {
                warn!(type_name = %request.tag.name, "error fetching type membership: {err}");
                FetchOutcome::Failed
            }
        }
    }

    /// Local only. Supersedes any in-flight type membership fetch.
    pub fn set_search_text(&mut self, text: &str) {
        self.filter.search_text = text.to_lowercase();
        self.pending_type = None;
        self.projection = Projection::Search;
        self.recompute();
    }

    pub fn reset(&mut self) {
        self.filter = FilterSpec::default();
        self.pending_type = None;
        self.type_members = None;
        self.projection = Projection::Page;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.displayed = derive_displayed(
            &self.base_list,
            self.type_members.as_deref(),
            &self.filter,
            self.projection,
        );
    }
}

pub fn derive_displayed(
    base_list: &[EntitySummary],
    type_members: Option<&[EntitySummary]>,
    filter: &FilterSpec,
    projection: Projection,
) -> Vec<EntitySummary> {
    match projection {
        Projection::Page => base_list.to_vec(),
        Projection::Search => search_filter(base_list, &filter.search_text),
        Projection::Type => type_members.unwrap_or(base_list).to_vec(),
    }
}

pub fn search_filter(base_list: &[EntitySummary], search_text: &str) -> Vec<EntitySummary> {
    if search_text.is_empty() {
        return base_list.to_vec();
    }
    let needle = search_text.to_lowercase();
    base_list
        .iter()
        .filter(|entry| entry.matches_search(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "tests/view_state_tests.rs"]
mod tests;
