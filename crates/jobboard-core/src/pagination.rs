//! Page-at-a-time list state shared by every list screen.
//!
//! The API returns no total count, so [`Paginator::estimated_total_pages`] is
//! a lower bound: a full page means "at least one more page may exist", a
//! short page means "this is the last one".

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;

use tracing::{debug, warn};

use jobboard_client::ClientError;
use jobboard_types::api::PageQuery;
use jobboard_types::{Application, ApplicationId, JobId, JobPosting};

pub const PAGE_SIZE: u32 = 10;

/// Items that carry a stable identity for de-duplication.
pub trait Keyed {
    type Key: Eq + Hash + Clone;

    fn key(&self) -> Self::Key;
}

impl Keyed for JobPosting {
    type Key = JobId;

    fn key(&self) -> JobId {
        self.id
    }
}

impl Keyed for Application {
    type Key = ApplicationId;

    fn key(&self) -> ApplicationId {
        self.id
    }
}

/// Drop repeated ids. Each id keeps the slot of its first appearance and the
/// payload of its last.
pub fn dedup_last_wins<T: Keyed>(items: Vec<T>) -> Vec<T> {
    let mut slots: HashMap<T::Key, usize> = HashMap::with_capacity(items.len());
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        match slots.get(&item.key()) {
            Some(&idx) => out[idx] = item,
            None => {
                slots.insert(item.key(), out.len());
                out.push(item);
            }
        }
    }
    out
}

/// Lower-bound page count after fetching `page` and receiving `returned` items.
pub fn estimate_total_pages(page: u32, returned: usize, page_size: u32) -> u32 {
    let page = page.max(1);
    if returned >= page_size as usize {
        page.saturating_add(1)
    } else {
        page
    }
}

/// What the view should do besides re-rendering after a page change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEffect {
    None,
    ScrollToTop,
}

/// Identifies one page request. Only the most recently issued ticket may
/// update the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    seq: u64,
    page: u32,
}

impl PageTicket {
    pub fn page(&self) -> u32 {
        self.page
    }
}

#[derive(Debug, Clone)]
pub struct Paginator<T> {
    items: Vec<T>,
    page_size: u32,
    current_page: u32,
    estimated_total_pages: u32,
    loading: bool,
    load_failed: bool,
    issued: u64,
}

impl<T: Keyed> Default for Paginator<T> {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl<T: Keyed> Paginator<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            page_size: page_size.max(1),
            current_page: 1,
            estimated_total_pages: 1,
            loading: false,
            load_failed: false,
            issued: 0,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn estimated_total_pages(&self) -> u32 {
        self.estimated_total_pages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Set when the last fetch failed; the view offers a retry.
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// Start a request for `page`, superseding any request still in flight.
    pub fn begin(&mut self, page: u32) -> PageTicket {
        self.issued += 1;
        self.current_page = page.max(1);
        self.loading = true;
        PageTicket { seq: self.issued, page: self.current_page }
    }

    pub fn query(&self, ticket: PageTicket) -> PageQuery {
        PageQuery::new(ticket.page, self.page_size)
    }

    /// Apply the response for `ticket`. Returns `false` when a newer request
    /// has been issued since and the response was dropped.
    pub fn complete(&mut self, ticket: PageTicket, result: Result<Vec<T>, ClientError>) -> bool {
        if ticket.seq != self.issued {
            debug!(page = ticket.page, "dropping stale page response");
            return false;
        }
        self.loading = false;
        match result {
            Ok(items) => {
                self.estimated_total_pages = estimate_total_pages(ticket.page, items.len(), self.page_size);
                self.items = dedup_last_wins(items);
                self.load_failed = false;
            }
            Err(e) => {
                warn!(page = ticket.page, error = %e, "page fetch failed");
                self.items.clear();
                self.estimated_total_pages = 1;
                self.load_failed = true;
            }
        }
        true
    }

    /// Fetch `page` with `fetch` and apply the result. Failures are absorbed
    /// into the list state and never returned.
    pub async fn load<F, Fut>(&mut self, page: u32, fetch: F) -> &[T]
    where
        F: FnOnce(PageQuery) -> Fut,
        Fut: Future<Output = Result<Vec<T>, ClientError>>,
    {
        let ticket = self.begin(page);
        let result = fetch(self.query(ticket)).await;
        self.complete(ticket, result);
        &self.items
    }

    pub fn find(&self, key: &T::Key) -> Option<&T> {
        self.items.iter().find(|item| item.key() == *key)
    }

    /// Remove an item locally, e.g. after a successful delete.
    pub fn remove(&mut self, key: &T::Key) -> Option<T> {
        let idx = self.items.iter().position(|item| item.key() == *key)?;
        Some(self.items.remove(idx))
    }

    /// Patch an item in place.
    pub fn update(&mut self, key: &T::Key, f: impl FnOnce(&mut T)) -> bool {
        match self.items.iter_mut().find(|item| item.key() == *key) {
            Some(item) => {
                f(item);
                true
            }
            None => false,
        }
    }
}
