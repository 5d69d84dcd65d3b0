//! Incrementally loaded lists.
//!
//! Page 1 replaces the list and later pages append. Each request takes a
//! ticket stamped with the list's generation; resetting the list (new filter,
//! new search term) bumps the generation so answers to older requests are
//! dropped instead of overwriting newer results.

pub const FEED_PAGE_SIZE: u32 = 10;
pub const SEARCH_PAGE_SIZE: u32 = 10;
pub const PROFILE_PAGE_SIZE: u32 = 12;

/// Items with a stable identity used to skip duplicates on append.
pub trait Identified {
    fn id(&self) -> i64;
}

impl Identified for crate::models::Post {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for crate::models::Surat {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for i64 {
    fn id(&self) -> i64 {
        *self
    }
}

/// Handle for one in-flight page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    pub page: u32,
    generation: u64,
}

/// What `apply` did with a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageApply {
    Replaced { count: usize },
    Appended { added: usize, skipped: usize },
    Stale,
}

#[derive(Debug, Clone)]
pub struct PagedList<T> {
    items: Vec<T>,
    page_size: u32,
    loaded_page: u32,
    has_more: bool,
    generation: u64,
    loading: Option<PageTicket>,
}

impl<T: Identified> PagedList<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            page_size,
            loaded_page: 0,
            has_more: true,
            generation: 0,
            loading: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn loaded_page(&self) -> u32 {
        self.loaded_page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    /// Start a request for `page`.
    pub fn begin(&mut self, page: u32) -> PageTicket {
        let ticket = PageTicket {
            page: page.max(1),
            generation: self.generation,
        };
        self.loading = Some(ticket);
        ticket
    }

    /// Ticket for the page after the last loaded one, if any remain.
    pub fn begin_next(&mut self) -> Option<PageTicket> {
        if !self.has_more || self.loaded_page == 0 {
            return None;
        }
        Some(self.begin(self.loaded_page + 1))
    }

    /// Forget everything and invalidate outstanding tickets.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.items.clear();
        self.loaded_page = 0;
        self.has_more = true;
        self.loading = None;
    }

    /// Whether an answer to `ticket` would still be applied.
    pub fn is_current(&self, ticket: PageTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Record a failed request; loaded items are left as they are.
    pub fn fail(&mut self, ticket: PageTicket) {
        if self.loading == Some(ticket) {
            self.loading = None;
        }
    }

    pub fn apply(&mut self, ticket: PageTicket, items: Vec<T>, has_more: bool) -> PageApply {
        if ticket.generation != self.generation {
            tracing::debug!(
                "Dropping stale page {} (generation {} != {})",
                ticket.page,
                ticket.generation,
                self.generation
            );
            return PageApply::Stale;
        }
        if self.loading == Some(ticket) {
            self.loading = None;
        }

        self.has_more = has_more;
        if ticket.page <= 1 {
            let count = items.len();
            self.items = items;
            self.loaded_page = 1;
            return PageApply::Replaced { count };
        }

        let mut added = 0;
        let mut skipped = 0;
        for item in items {
            if self.contains(item.id()) {
                skipped += 1;
            } else {
                self.items.push(item);
                added += 1;
            }
        }
        self.loaded_page = self.loaded_page.max(ticket.page);
        PageApply::Appended { added, skipped }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.items.iter().any(|i| i.id() == id)
    }

    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id() != id);
        self.items.len() != before
    }

    /// Put an item at the front, e.g. a freshly created post.
    pub fn prepend(&mut self, item: T) {
        self.remove(item.id());
        self.items.insert(0, item);
    }
}
