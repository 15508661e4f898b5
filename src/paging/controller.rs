//! Infinite-scroll state for one browse or search selection.
//!
//! The controller never performs I/O. `trigger` hands out a [`PageRequest`]
//! tagged with the current scope generation, the caller fetches it, and
//! `resolve` folds the outcome back in. Requests from an earlier scope are
//! dropped on arrival, so a tab switch never mixes results.

use crate::api::{reconcile, ApiError, CatalogCategory, CatalogId, MediaItem, MediaKind, PresenceSet};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScopeSource {
    Browse(CatalogCategory),
    Search(String),
}

/// One category-or-query selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BrowseScope {
    pub kind: MediaKind,
    pub source: ScopeSource,
}

impl BrowseScope {
    pub fn browse(kind: MediaKind, category: CatalogCategory) -> Self {
        Self {
            kind,
            source: ScopeSource::Browse(category),
        }
    }

    /// A blank query falls back to browsing `category`.
    pub fn from_selection(kind: MediaKind, category: CatalogCategory, query: &str) -> Self {
        let query = query.trim();
        if query.is_empty() {
            Self::browse(kind, category)
        } else {
            Self {
                kind,
                source: ScopeSource::Search(query.to_string()),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Idle,
    Loading,
    Ready,
    Exhausted,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub scope: BrowseScope,
    pub page: u32,
    /// Set until the scope's presence set has been fetched successfully.
    pub fetch_presence: bool,
}

/// What a fetch produced: catalog items not yet reconciled, and the presence
/// set if this request was asked to fetch it and the fetch succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPage {
    pub items: Vec<MediaItem>,
    pub has_more: bool,
    pub presence: Option<PresenceSet>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Appended(usize),
    Exhausted,
    Failed,
    Stale,
}

#[derive(Debug)]
pub struct PagedListController {
    scope: BrowseScope,
    generation: u64,
    state: ListState,
    next_page: u32,
    items: Vec<MediaItem>,
    presence: Option<PresenceSet>,
    added: PresenceSet,
}

impl PagedListController {
    pub fn new(scope: BrowseScope) -> Self {
        Self {
            scope,
            generation: 0,
            state: ListState::Idle,
            next_page: 1,
            items: Vec::new(),
            presence: None,
            added: PresenceSet::new(),
        }
    }

    /// Starts a fresh scope. Anything still in flight for the old one will be
    /// reported as stale when it resolves.
    pub fn reset(&mut self, scope: BrowseScope) {
        self.generation += 1;
        self.scope = scope;
        self.state = ListState::Idle;
        self.next_page = 1;
        self.items.clear();
        self.presence = None;
        self.added = PresenceSet::new();
    }

    /// Claims the next page if the list accepts one. Returns `None` while a
    /// load is in flight, after exhaustion, and after a failure.
    pub fn trigger(&mut self) -> Option<PageRequest> {
        if !self.accepts_trigger() {
            return None;
        }

        self.state = ListState::Loading;
        Some(PageRequest {
            generation: self.generation,
            scope: self.scope.clone(),
            page: self.next_page,
            fetch_presence: self.presence.is_none(),
        })
    }

    pub fn resolve(
        &mut self,
        request: &PageRequest,
        outcome: Result<LoadedPage, ApiError>,
    ) -> Resolution {
        if request.generation != self.generation {
            return Resolution::Stale;
        }

        let loaded = match outcome {
            Ok(loaded) => loaded,
            Err(err) => {
                self.state = ListState::Failed(err.user_message());
                return Resolution::Failed;
            }
        };

        if self.presence.is_none() {
            self.presence = loaded.presence;
        }

        if loaded.items.is_empty() {
            self.state = ListState::Exhausted;
            return Resolution::Exhausted;
        }

        let empty = PresenceSet::new();
        let presence = self.presence.as_ref().unwrap_or(&empty);
        let mut page = reconcile(loaded.items, presence);
        for item in &mut page {
            if self.added.contains(item.catalog_id()) {
                item.mark_in_library();
            }
        }

        let appended = page.len();
        self.items.extend(page);
        self.next_page += 1;
        self.state = if loaded.has_more {
            ListState::Ready
        } else {
            ListState::Exhausted
        };
        Resolution::Appended(appended)
    }

    /// Records a successful add without refetching the presence set. The id
    /// stays marked for pages loaded later in this scope.
    pub fn mark_added(&mut self, id: CatalogId) -> bool {
        self.added.insert(id);
        let mut changed = false;
        for item in self.items.iter_mut().filter(|item| item.catalog_id() == id) {
            if !item.in_library {
                item.mark_in_library();
                changed = true;
            }
        }
        changed
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn scope(&self) -> &BrowseScope {
        &self.scope
    }

    /// Whether `trigger` would hand out a request. Reading this never
    /// changes the controller, so callers can check it on every scroll.
    pub fn accepts_trigger(&self) -> bool {
        matches!(self.state, ListState::Idle | ListState::Ready)
    }
}

#[cfg(test)]
impl PagedListController {
    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    pub fn is_loading(&self) -> bool {
        self.state == ListState::Loading
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == ListState::Exhausted
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ListState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn has_presence(&self) -> bool {
        self.presence.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Operation, Poster};

    fn movie(id: u64) -> MediaItem {
        MediaItem {
            id: CatalogId(id),
            title: format!("Movie {id}"),
            poster: Poster::Placeholder,
            overview: String::new(),
            release_date: String::new(),
            vote_average: 5.0,
            secondary_id: None,
            in_library: false,
            kind: MediaKind::Movie,
        }
    }

    fn page(ids: std::ops::RangeInclusive<u64>, presence: Option<PresenceSet>) -> LoadedPage {
        LoadedPage {
            items: ids.map(movie).collect(),
            has_more: true,
            presence,
        }
    }

    fn popular() -> BrowseScope {
        BrowseScope::browse(MediaKind::Movie, CatalogCategory::Popular)
    }

    fn failure() -> ApiError {
        ApiError::Status {
            operation: Operation::CatalogBrowse,
            status: 503,
            message: None,
        }
    }

    fn ids(controller: &PagedListController) -> Vec<u64> {
        controller.items().iter().map(|i| i.id.0).collect()
    }

    #[test]
    fn sequential_pages_accumulate_in_arrival_order() {
        let mut controller = PagedListController::new(popular());

        let first = controller.trigger().unwrap();
        assert_eq!(first.page, 1);
        assert!(first.fetch_presence);
        assert_eq!(
            controller.resolve(&first, Ok(page(1..=3, Some(PresenceSet::new())))),
            Resolution::Appended(3)
        );

        let second = controller.trigger().unwrap();
        assert_eq!(second.page, 2);
        assert!(!second.fetch_presence);
        controller.resolve(&second, Ok(page(4..=5, None)));

        assert_eq!(ids(&controller), vec![1, 2, 3, 4, 5]);
        assert_eq!(controller.next_page(), 3);
        assert_eq!(controller.state(), &ListState::Ready);
    }

    #[test]
    fn trigger_while_loading_issues_nothing() {
        let mut controller = PagedListController::new(popular());
        let mut issued = Vec::new();

        for _ in 0..5 {
            if let Some(request) = controller.trigger() {
                issued.push((request.generation, request.page));
            }
        }
        assert_eq!(issued, vec![(0, 1)]);
        assert!(controller.is_loading());
    }

    #[test]
    fn one_request_per_scope_and_page() {
        let mut controller = PagedListController::new(popular());
        let mut issued = Vec::new();

        for round in 0..3u64 {
            for _ in 0..4 {
                if let Some(request) = controller.trigger() {
                    issued.push((request.generation, request.page));
                }
            }
            let request = PageRequest {
                generation: 0,
                scope: popular(),
                page: issued.last().unwrap().1,
                fetch_presence: round == 0,
            };
            let first_id = round * 10 + 1;
            controller.resolve(&request, Ok(page(first_id..=first_id + 1, None)));
        }

        assert_eq!(issued, vec![(0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn empty_page_exhausts_without_advancing() {
        let mut controller = PagedListController::new(popular());
        let request = controller.trigger().unwrap();
        controller.resolve(&request, Ok(page(1..=2, None)));

        let request = controller.trigger().unwrap();
        let resolution = controller.resolve(
            &request,
            Ok(LoadedPage {
                items: Vec::new(),
                has_more: true,
                presence: None,
            }),
        );

        assert_eq!(resolution, Resolution::Exhausted);
        assert!(controller.is_exhausted());
        assert_eq!(controller.next_page(), 2);
        assert_eq!(controller.items().len(), 2);
        assert!(controller.trigger().is_none());
        assert!(controller.trigger().is_none());
    }

    #[test]
    fn only_idle_and_ready_lists_accept_a_trigger() {
        let mut controller = PagedListController::new(popular());
        assert!(controller.accepts_trigger());

        let request = controller.trigger().unwrap();
        assert!(!controller.accepts_trigger());

        controller.resolve(&request, Ok(page(1..=2, None)));
        assert!(controller.accepts_trigger());

        let request = controller.trigger().unwrap();
        controller.resolve(
            &request,
            Ok(LoadedPage {
                items: Vec::new(),
                has_more: false,
                presence: None,
            }),
        );
        assert!(!controller.accepts_trigger());

        controller.reset(popular());
        let request = controller.trigger().unwrap();
        controller.resolve(&request, Err(failure()));
        assert!(!controller.accepts_trigger());
    }

    #[test]
    fn last_catalog_page_exhausts_after_appending() {
        let mut controller = PagedListController::new(popular());
        let request = controller.trigger().unwrap();
        let mut last = page(1..=4, None);
        last.has_more = false;

        assert_eq!(controller.resolve(&request, Ok(last)), Resolution::Appended(4));
        assert!(controller.is_exhausted());
        assert!(controller.trigger().is_none());
    }

    #[test]
    fn failure_appends_nothing_and_blocks_until_reset() {
        let mut controller = PagedListController::new(popular());
        let request = controller.trigger().unwrap();
        controller.resolve(&request, Ok(page(1..=2, None)));

        let request = controller.trigger().unwrap();
        assert_eq!(controller.resolve(&request, Err(failure())), Resolution::Failed);
        assert_eq!(controller.error(), Some("Failed to fetch titles"));
        assert_eq!(controller.items().len(), 2);
        assert!(controller.trigger().is_none());

        controller.reset(BrowseScope::browse(MediaKind::Movie, CatalogCategory::TopRated));
        assert_eq!(controller.error(), None);
        assert_eq!(controller.trigger().map(|r| r.page), Some(1));
    }

    #[test]
    fn stale_scope_results_are_discarded() {
        let mut controller = PagedListController::new(popular());
        let slow_a = controller.trigger().unwrap();

        let scope_b = BrowseScope::from_selection(
            MediaKind::Movie,
            CatalogCategory::Popular,
            "alien",
        );
        controller.reset(scope_b.clone());
        let request_b = controller.trigger().unwrap();
        assert_eq!(request_b.scope, scope_b);
        assert_eq!(request_b.page, 1);

        controller.resolve(&request_b, Ok(page(100..=102, None)));
        assert_eq!(
            controller.resolve(&slow_a, Ok(page(1..=20, None))),
            Resolution::Stale
        );

        assert_eq!(ids(&controller), vec![100, 101, 102]);
        assert_eq!(controller.next_page(), 2);
    }

    #[test]
    fn stale_result_does_not_unblock_new_scope() {
        let mut controller = PagedListController::new(popular());
        let slow_a = controller.trigger().unwrap();
        controller.reset(BrowseScope::browse(MediaKind::Movie, CatalogCategory::Current));
        let request_b = controller.trigger().unwrap();

        controller.resolve(&slow_a, Err(failure()));
        assert!(controller.is_loading());
        assert!(controller.trigger().is_none());

        controller.resolve(&request_b, Ok(page(1..=1, None)));
        assert_eq!(controller.state(), &ListState::Ready);
    }

    #[test]
    fn presence_set_is_fetched_once_and_reused() {
        let mut controller = PagedListController::new(popular());
        let presence: PresenceSet = [CatalogId(2), CatalogId(12)].into_iter().collect();

        let first = controller.trigger().unwrap();
        controller.resolve(&first, Ok(page(1..=3, Some(presence))));
        assert!(controller.has_presence());

        let second = controller.trigger().unwrap();
        assert!(!second.fetch_presence);
        controller.resolve(&second, Ok(page(11..=13, None)));

        let present: Vec<u64> = controller
            .items()
            .iter()
            .filter(|i| i.in_library)
            .map(|i| i.id.0)
            .collect();
        assert_eq!(present, vec![2, 12]);
    }

    #[test]
    fn failed_presence_fetch_is_retried_next_page() {
        let mut controller = PagedListController::new(popular());
        let first = controller.trigger().unwrap();
        controller.resolve(&first, Ok(page(1..=2, None)));
        assert!(!controller.has_presence());
        assert!(controller.items().iter().all(|i| !i.in_library));

        let second = controller.trigger().unwrap();
        assert!(second.fetch_presence);
    }

    #[test]
    fn optimistic_add_survives_later_reconciliation() {
        let mut controller = PagedListController::new(popular());
        let first = controller.trigger().unwrap();
        controller.resolve(&first, Ok(page(1..=5, Some(PresenceSet::new()))));

        assert!(controller.mark_added(CatalogId(5)));
        assert!(!controller.mark_added(CatalogId(5)));

        // The catalog repeats id 5 on the next page; the cached set is stale.
        let second = controller.trigger().unwrap();
        controller.resolve(
            &second,
            Ok(LoadedPage {
                items: vec![movie(5), movie(6)],
                has_more: true,
                presence: None,
            }),
        );

        let flags: Vec<(u64, bool)> = controller
            .items()
            .iter()
            .map(|i| (i.id.0, i.in_library))
            .collect();
        assert_eq!(
            flags,
            vec![
                (1, false),
                (2, false),
                (3, false),
                (4, false),
                (5, true),
                (5, true),
                (6, false)
            ]
        );
    }

    #[test]
    fn blank_query_means_browse() {
        assert_eq!(
            BrowseScope::from_selection(MediaKind::Show, CatalogCategory::TopRated, "   "),
            BrowseScope::browse(MediaKind::Show, CatalogCategory::TopRated)
        );
        assert_eq!(
            BrowseScope::from_selection(MediaKind::Show, CatalogCategory::TopRated, " lost ")
                .source,
            ScopeSource::Search("lost".to_string())
        );
    }
}
