//! Paginated list state.
//!
//! The controller owns {page, size, typed search, applied search, busy
//! flag, current page data} and decides when a fetch is due. Like the
//! modal controller it performs no IO itself: state changes that require a
//! fetch hand back a [`FetchRequest`] for the frontend to run, and the
//! outcome comes back through [`ListController::resolve`].
//!
//! Every fetch carries a monotonically increasing token; a resolution
//! whose token is not the newest is discarded without touching state, so a
//! slow response for an old query can never overwrite a newer page.

use crate::models::{PageData, PageSize, Query};
use crate::service::{Notifier, ServiceError};

/// A list fetch the frontend must execute.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub token: u64,
    pub query: Query,
}

/// One slot in the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    /// Non-interactive placeholder.
    Ellipsis,
}

/// State of one paginated, searchable list screen.
pub struct ListController {
    /// Label used in fallback error messages, e.g. `theme`.
    label: String,
    page: u32,
    size: PageSize,
    typed_search: String,
    applied_search: String,
    busy: bool,
    seq: u64,
    data: PageData,
}

impl ListController {
    pub fn new(label: impl Into<String>, size: PageSize) -> Self {
        Self {
            label: label.into(),
            page: 1,
            size,
            typed_search: String::new(),
            applied_search: String::new(),
            busy: false,
            seq: 0,
            data: PageData::default(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> PageSize {
        self.size
    }

    pub fn typed_search(&self) -> &str {
        &self.typed_search
    }

    pub fn applied_search(&self) -> &str {
        &self.applied_search
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn data(&self) -> &PageData {
        &self.data
    }

    pub fn total_pages(&self) -> u32 {
        self.data.total_pages
    }

    /// Issue a fetch for the current {page, size, applied search}.
    ///
    /// Always allowed; it supersedes any outstanding fetch, whose response
    /// will then carry a stale token.
    pub fn refresh(&mut self) -> FetchRequest {
        self.seq += 1;
        self.busy = true;
        FetchRequest {
            token: self.seq,
            query: Query {
                page: self.page,
                size: self.size,
                search: self.applied_search.clone(),
            },
        }
    }

    /// Navigate to a page. Ignored while busy, out of range, or a no-op.
    pub fn set_page(&mut self, page: u32) -> Option<FetchRequest> {
        if self.busy || page == self.page || page < 1 {
            return None;
        }
        if self.data.total_pages > 0 && page > self.data.total_pages {
            return None;
        }
        self.page = page;
        Some(self.refresh())
    }

    pub fn next_page(&mut self) -> Option<FetchRequest> {
        self.set_page(self.page + 1)
    }

    pub fn prev_page(&mut self) -> Option<FetchRequest> {
        self.set_page(self.page.saturating_sub(1))
    }

    /// Change the page size; resets to page 1.
    pub fn set_size(&mut self, size: PageSize) -> Option<FetchRequest> {
        if self.busy || size == self.size {
            return None;
        }
        self.size = size;
        self.page = 1;
        Some(self.refresh())
    }

    /// Update the typed search text. Never triggers a fetch by itself.
    pub fn set_typed_search(&mut self, text: impl Into<String>) {
        self.typed_search = text.into();
    }

    /// Apply the typed search text; resets to page 1 and fetches.
    ///
    /// Submitting an unchanged search still re-queries.
    pub fn submit_search(&mut self) -> Option<FetchRequest> {
        if self.busy {
            return None;
        }
        self.applied_search = self.typed_search.trim().to_string();
        self.page = 1;
        Some(self.refresh())
    }

    /// Re-fetch after a modal completed a mutation, keeping the current
    /// page, size and applied search.
    pub fn on_mutation_complete(&mut self) -> FetchRequest {
        self.refresh()
    }

    /// Feed back the outcome of a fetch.
    ///
    /// On failure the previous page data stays on screen and the message
    /// (or an entity-specific default) is surfaced through the notifier.
    pub fn resolve(
        &mut self,
        token: u64,
        result: Result<PageData, ServiceError>,
        notifier: &mut dyn Notifier,
    ) {
        if token != self.seq {
            tracing::warn!(token, newest = self.seq, "discarding stale list response");
            return;
        }
        self.busy = false;
        match result {
            Ok(data) => {
                self.data = data;
            }
            Err(err) => {
                let default = format!("Failed to load {} list", self.label);
                notifier.error(err.message().unwrap_or(&default));
            }
        }
    }

    /// Page numbers (and ellipsis placeholders) to display.
    pub fn page_window(&self) -> Vec<PageItem> {
        page_window(self.data.total_pages, self.page)
    }
}

/// Windowing over the page-number bar.
///
/// Four pages or fewer are shown in full. Beyond that the window keeps the
/// first page, up to three numbers around the edges or the current page,
/// and ellipsis placeholders for the elided ranges.
pub fn page_window(total_pages: u32, current: u32) -> Vec<PageItem> {
    use PageItem::{Ellipsis, Page};

    if total_pages <= 4 {
        return (1..=total_pages).map(Page).collect();
    }
    let last = total_pages;
    if current <= 2 {
        vec![Page(1), Page(2), Page(3), Ellipsis, Page(last)]
    } else if current >= last - 1 {
        vec![Page(1), Ellipsis, Page(last - 2), Page(last - 1), Page(last)]
    } else {
        vec![
            Page(1),
            Ellipsis,
            Page(current - 1),
            Page(current),
            Page(current + 1),
            Ellipsis,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Audit, Record, RecordId};
    use crate::service::NullNotifier;
    use PageItem::{Ellipsis, Page};

    #[derive(Default)]
    struct Recorder {
        errors: Vec<String>,
    }

    impl Notifier for Recorder {
        fn success(&mut self, _message: &str) {}
        fn error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }
    }

    fn page_of(total_pages: u32, total_elements: u64) -> PageData {
        PageData {
            records: vec![Record {
                id: RecordId::Num(1),
                name: "row".into(),
                description: String::new(),
                color: None,
                audit: Audit::default(),
            }],
            total_pages,
            total_elements,
            page_size: 5,
        }
    }

    #[test]
    fn window_shows_all_pages_up_to_four() {
        // 12 elements at size 5 -> 3 pages, no ellipsis from any page.
        for current in 1..=3 {
            assert_eq!(
                page_window(3, current),
                vec![Page(1), Page(2), Page(3)],
                "current={current}"
            );
        }
        assert_eq!(page_window(0, 1), vec![]);
        assert_eq!(
            page_window(4, 2),
            vec![Page(1), Page(2), Page(3), Page(4)]
        );
    }

    #[test]
    fn window_near_the_start() {
        let expected = vec![Page(1), Page(2), Page(3), Ellipsis, Page(10)];
        assert_eq!(page_window(10, 1), expected);
        assert_eq!(page_window(10, 2), expected);
    }

    #[test]
    fn window_near_the_end() {
        let expected = vec![Page(1), Ellipsis, Page(8), Page(9), Page(10)];
        assert_eq!(page_window(10, 9), expected);
        assert_eq!(page_window(10, 10), expected);
    }

    #[test]
    fn window_in_the_middle() {
        assert_eq!(
            page_window(10, 5),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis]
        );
    }

    #[test]
    fn window_always_contains_the_current_page() {
        for total in 1..=12u32 {
            for current in 1..=total {
                let window = page_window(total, current);
                assert!(
                    window.contains(&Page(current)),
                    "total={total} current={current} window={window:?}"
                );
                assert_eq!(window.first(), Some(&Page(1)));
            }
        }
    }

    #[test]
    fn typing_does_not_fetch_but_submit_does() {
        let mut list = ListController::new("theme", PageSize::S5);
        list.set_typed_search("dark");
        assert!(!list.is_busy());
        assert_eq!(list.applied_search(), "");

        let request = list.submit_search().unwrap();
        assert_eq!(request.query.search, "dark");
        assert_eq!(request.query.page, 1);
        assert_eq!(list.applied_search(), "dark");
    }

    #[test]
    fn search_submit_trims_and_resets_page() {
        let mut list = ListController::new("theme", PageSize::S5);
        let request = list.refresh();
        list.resolve(request.token, Ok(page_of(10, 48)), &mut NullNotifier);
        list.set_page(7).unwrap();
        let token = list.seq;
        list.resolve(token, Ok(page_of(10, 48)), &mut NullNotifier);

        list.set_typed_search("  dark  ");
        let request = list.submit_search().unwrap();
        assert_eq!(request.query.search, "dark");
        assert_eq!(list.page(), 1);
    }

    #[test]
    fn size_change_resets_page_and_refetches() {
        let mut list = ListController::new("theme", PageSize::S5);
        let request = list.refresh();
        list.resolve(request.token, Ok(page_of(10, 48)), &mut NullNotifier);
        list.set_page(3).unwrap();
        list.resolve(list.seq, Ok(page_of(10, 48)), &mut NullNotifier);

        let request = list.set_size(PageSize::S20).unwrap();
        assert_eq!(request.query.page, 1);
        assert_eq!(request.query.size, PageSize::S20);
        assert_eq!(list.set_size(PageSize::S20), None);
    }

    #[test]
    fn controls_are_ignored_while_busy() {
        let mut list = ListController::new("theme", PageSize::S5);
        let request = list.refresh();
        list.resolve(request.token, Ok(page_of(10, 48)), &mut NullNotifier);

        let pending = list.refresh();
        assert!(list.is_busy());
        assert_eq!(list.set_page(2), None);
        assert_eq!(list.set_size(PageSize::S50), None);
        assert_eq!(list.submit_search(), None);

        list.resolve(pending.token, Ok(page_of(10, 48)), &mut NullNotifier);
        assert!(!list.is_busy());
        assert!(list.set_page(2).is_some());
    }

    #[test]
    fn page_navigation_respects_bounds() {
        let mut list = ListController::new("theme", PageSize::S5);
        let request = list.refresh();
        list.resolve(request.token, Ok(page_of(3, 12)), &mut NullNotifier);

        assert_eq!(list.prev_page(), None);
        assert!(list.next_page().is_some());
        list.resolve(list.seq, Ok(page_of(3, 12)), &mut NullNotifier);
        assert_eq!(list.set_page(4), None);
        assert_eq!(list.set_page(2), None); // same page, no fetch
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut list = ListController::new("theme", PageSize::S5);
        let old = list.refresh();
        let newer = list.refresh();
        assert_ne!(old.token, newer.token);

        list.resolve(old.token, Ok(page_of(9, 41)), &mut NullNotifier);
        // Stale result: still waiting on the newer fetch, data untouched.
        assert!(list.is_busy());
        assert_eq!(list.total_pages(), 0);

        list.resolve(newer.token, Ok(page_of(2, 8)), &mut NullNotifier);
        assert!(!list.is_busy());
        assert_eq!(list.total_pages(), 2);
    }

    #[test]
    fn fetch_failure_keeps_previous_data_and_notifies() {
        let mut list = ListController::new("theme", PageSize::S5);
        let request = list.refresh();
        list.resolve(request.token, Ok(page_of(3, 12)), &mut NullNotifier);

        let request = list.on_mutation_complete();
        let mut recorder = Recorder::default();
        list.resolve(
            request.token,
            Err(ServiceError::Transport("connection refused".into())),
            &mut recorder,
        );
        assert_eq!(recorder.errors, vec!["Failed to load theme list"]);
        assert_eq!(list.total_pages(), 3);
        assert!(!list.is_busy());

        let request = list.refresh();
        list.resolve(
            request.token,
            Err(ServiceError::Rejected {
                message: Some("index rebuilding".into()),
            }),
            &mut recorder,
        );
        assert_eq!(recorder.errors.last().unwrap(), "index rebuilding");
    }

    #[test]
    fn mutation_refresh_keeps_current_query() {
        let mut list = ListController::new("theme", PageSize::S20);
        let request = list.refresh();
        list.resolve(request.token, Ok(page_of(5, 90)), &mut NullNotifier);
        list.set_page(4).unwrap();
        list.resolve(list.seq, Ok(page_of(5, 90)), &mut NullNotifier);
        list.set_typed_search("legacy");
        list.submit_search().unwrap();
        list.resolve(list.seq, Ok(page_of(2, 25)), &mut NullNotifier);
        list.set_page(2).unwrap();
        list.resolve(list.seq, Ok(page_of(2, 25)), &mut NullNotifier);

        let request = list.on_mutation_complete();
        assert_eq!(request.query.page, 2);
        assert_eq!(request.query.size, PageSize::S20);
        assert_eq!(request.query.search, "legacy");
    }
}
