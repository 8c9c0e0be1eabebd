//! List Synchronizer
//!
//! Owns the local view of the remote book collection: a forward-only page
//! cursor, the end-of-data flag and the books fetched so far.
//!
//! State machine:
//!
//! ```text
//! Idle(cursor=0, has_more, []) --load_next--> Loading
//! Loading --n > 0 books--> Idle(cursor + 1, has_more = true, books ++ page)
//! Loading --0 books-----> Idle(cursor, has_more = false, books)   (sticky until restart)
//! Loading --failure-----> Idle(unchanged) + error
//! Loading --restart-----> Loading(cursor=0, [])  (stale response dropped, page 0 re-requested)
//! ```
//!
//! The synchronizer is a cheap `Clone` handle for a single-threaded executor.
//! No `RefCell` borrow is held across an `.await`, so handles can be driven
//! from independent UI tasks.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use tracing::{debug, error, info, warn};

use crate::api::{ApiError, BookApi, PageRequest};
use crate::error::{SyncError, SyncResult};
use crate::model::{Book, BookId, Direction, Page};
use crate::session::{Credential, Session};

/// Next page to request, with the session's fixed size and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    index: u32,
    size: u32,
    direction: Direction,
}

impl PageCursor {
    pub fn new(size: u32, direction: Direction) -> SyncResult<Self> {
        if size == 0 {
            return Err(SyncError::Config("page size must be greater than zero".into()));
        }
        Ok(Self { index: 0, size, direction })
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn request(&self) -> PageRequest {
        PageRequest {
            page: self.index,
            size: self.size,
            direction: self.direction,
        }
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    fn rewind(&mut self) {
        self.index = 0;
    }
}

/// Client-local materialization of the collection
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub books: Vec<Book>,
    pub has_more: bool,
    pub loading: bool,
    pub cursor: PageCursor,
    /// Last collection size reported by the server; display only
    pub total_elements: Option<u64>,
    /// Ids confirmed deleted while a fetch was outstanding; that page may
    /// have been built before the delete committed
    deleted_while_loading: HashSet<BookId>,
}

impl ViewState {
    fn new(cursor: PageCursor) -> Self {
        Self {
            books: Vec::new(),
            has_more: true,
            loading: false,
            cursor,
            total_elements: None,
            deleted_while_loading: HashSet::new(),
        }
    }

    /// Back to page 0. An outstanding fetch keeps `loading` set; it
    /// re-requests the first page itself.
    fn reset(&mut self) {
        self.books.clear();
        self.has_more = true;
        self.cursor.rewind();
        self.total_elements = None;
        self.deleted_while_loading.clear();
    }

    fn end_load(&mut self) {
        self.loading = false;
        self.deleted_while_loading.clear();
    }

    pub fn contains(&self, id: &BookId) -> bool {
        self.books.iter().any(|b| &b.id == id)
    }

    /// Append a fetched page. Ids already present are dropped so the
    /// sequence never holds duplicates, even if the remote list shifted.
    fn apply_page(&mut self, page: Page) -> LoadOutcome {
        if page.is_empty() {
            self.has_more = false;
            return LoadOutcome::Exhausted;
        }

        let mut seen: HashSet<BookId> = self.books.iter().map(|b| b.id.clone()).collect();
        let mut appended = 0;
        for book in page.books {
            if self.deleted_while_loading.contains(&book.id) {
                debug!(id = %book.id, "skipping book deleted during fetch");
                continue;
            }
            if !seen.insert(book.id.clone()) {
                warn!(id = %book.id, page = self.cursor.index(), "dropping book already in view");
                continue;
            }
            self.books.push(book);
            appended += 1;
        }

        self.cursor.advance();
        self.has_more = true;
        if page.total_elements.is_some() {
            self.total_elements = page.total_elements;
        }
        LoadOutcome::Appended(appended)
    }
}

/// Result of a `load_next`/`sync` call that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page arrived; this many books were appended
    Appended(usize),
    /// No more data: either the fetch returned nothing or a previous one did
    Exhausted,
    /// Another fetch is outstanding; this call was dropped
    Busy,
    /// `sync` found the view already populated
    AlreadyLoaded,
}

type ChangeListener = Rc<dyn Fn(&ViewState)>;

struct Inner<A> {
    session: Session,
    api: A,
    state: RefCell<ViewState>,
    /// Bumped by `restart` so responses to earlier requests are dropped
    generation: Cell<u64>,
    listeners: RefCell<Vec<ChangeListener>>,
}

/// Paginated, pessimistically mutated view of the remote collection
pub struct ListSynchronizer<A> {
    inner: Rc<Inner<A>>,
}

impl<A> Clone for ListSynchronizer<A> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<A: BookApi> ListSynchronizer<A> {
    pub fn new(session: Session, api: A, cursor: PageCursor) -> Self {
        Self {
            inner: Rc::new(Inner {
                session,
                api,
                state: RefCell::new(ViewState::new(cursor)),
                generation: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    pub fn snapshot(&self) -> ViewState {
        self.inner.state.borrow().clone()
    }

    pub fn books(&self) -> Vec<Book> {
        self.inner.state.borrow().books.clone()
    }

    pub fn has_more(&self) -> bool {
        self.inner.state.borrow().has_more
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    pub fn cursor(&self) -> PageCursor {
        self.inner.state.borrow().cursor
    }

    /// Observe every state change (loading flag, append, removal, restart)
    pub fn subscribe(&self, listener: impl Fn(&ViewState) + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    fn notify(&self) {
        let listeners = self.inner.listeners.borrow().clone();
        if listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for listener in listeners {
            listener(&snapshot);
        }
    }

    /// Fetch the page under the cursor and append it.
    ///
    /// No request is made when the data is exhausted or another fetch is
    /// still outstanding. On failure nothing changes and `has_more` stays
    /// set, so invoking it again retries the same page. If `restart` runs
    /// while the fetch is outstanding, the response is dropped and page 0
    /// is requested before this call returns.
    pub async fn load_next(&self) -> SyncResult<LoadOutcome> {
        let mut credential = self.inner.session.credential()?;

        let (mut request, mut generation) = {
            let mut state = self.inner.state.borrow_mut();
            if state.loading {
                debug!(page = state.cursor.index(), "load already in flight");
                return Ok(LoadOutcome::Busy);
            }
            if !state.has_more {
                return Ok(LoadOutcome::Exhausted);
            }
            state.loading = true;
            (state.cursor.request(), self.inner.generation.get())
        };
        self.notify();

        let result = loop {
            debug!(page = request.page, size = request.size, direction = %request.direction, "fetching page");
            let result = self.inner.api.fetch_page(&credential, request).await;
            if self.inner.generation.get() == generation {
                break result;
            }

            if let Err(ApiError::Unauthorized) = result {
                self.end_load();
                return Err(self.reject_credential(&credential));
            }
            warn!(page = request.page, "dropping page fetched before restart");
            credential = match self.inner.session.credential() {
                Ok(current) => current,
                Err(err) => {
                    self.end_load();
                    return Err(err);
                }
            };
            request = self.inner.state.borrow().cursor.request();
            generation = self.inner.generation.get();
        };

        let outcome = {
            let mut state = self.inner.state.borrow_mut();
            let outcome = result.map(|page| state.apply_page(page));
            state.end_load();
            outcome
        };
        self.notify();

        match outcome {
            Ok(outcome) => {
                debug!(page = request.page, ?outcome, "page applied");
                Ok(outcome)
            }
            Err(ApiError::Unauthorized) => Err(self.reject_credential(&credential)),
            Err(source) => {
                error!(page = request.page, error = %source, "failed to fetch page");
                Err(SyncError::Fetch(source))
            }
        }
    }

    fn end_load(&self) {
        self.inner.state.borrow_mut().end_load();
        self.notify();
    }

    /// Delete a book remotely, then drop it from the view.
    ///
    /// The view only changes after the server confirms. The request is sent
    /// even if the id is not currently listed. Cursor and `has_more` are
    /// never touched.
    pub async fn remove(&self, id: &BookId) -> SyncResult<()> {
        let credential = self.inner.session.credential()?;
        if !self.inner.state.borrow().contains(id) {
            debug!(%id, "deleting book that is not in the local view");
        }

        match self.inner.api.delete_book(&credential, id).await {
            Ok(()) => {
                {
                    let mut state = self.inner.state.borrow_mut();
                    state.books.retain(|b| &b.id != id);
                    if state.loading {
                        state.deleted_while_loading.insert(id.clone());
                    }
                }
                info!(%id, "book deleted");
                self.notify();
                Ok(())
            }
            Err(ApiError::Unauthorized) => Err(self.reject_credential(&credential)),
            Err(source) => {
                warn!(%id, error = %source, "failed to delete book");
                Err(SyncError::Delete { id: id.clone(), source })
            }
        }
    }

    /// Forget everything; the next fetch asks for page 0 again
    pub fn restart(&self) {
        self.inner.generation.set(self.inner.generation.get() + 1);
        self.inner.state.borrow_mut().reset();
        debug!("list restarted");
        self.notify();
    }

    /// Idempotent mount entry point: loads the first page only if the view
    /// has never been populated.
    pub async fn sync(&self) -> SyncResult<LoadOutcome> {
        {
            let state = self.inner.state.borrow();
            if state.loading {
                return Ok(LoadOutcome::Busy);
            }
            if state.cursor.index() > 0 || !state.has_more {
                return Ok(LoadOutcome::AlreadyLoaded);
            }
        }
        self.load_next().await
    }

    /// Clear the session only if it still holds the credential the server
    /// rejected; a newer sign-in is left alone.
    fn reject_credential(&self, sent: &Credential) -> SyncError {
        if self.inner.session.credential().ok().as_ref() == Some(sent) {
            warn!("credential rejected, clearing session");
            self.inner.session.clear();
        } else {
            debug!("rejected credential was already replaced");
        }
        SyncError::Unauthenticated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_rejects_zero_size() {
        assert!(matches!(PageCursor::new(0, Direction::Asc), Err(SyncError::Config(_))));
    }

    #[test]
    fn test_cursor_advance_and_rewind() {
        let mut cursor = PageCursor::new(2, Direction::Desc).unwrap();
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.request(), PageRequest { page: 2, size: 2, direction: Direction::Desc });
        cursor.rewind();
        assert_eq!(cursor.index(), 0);
        assert_eq!(cursor.size(), 2);
    }

    #[test]
    fn test_apply_empty_page_exhausts() {
        let mut state = ViewState::new(PageCursor::new(2, Direction::Asc).unwrap());
        assert_eq!(state.apply_page(Page::default()), LoadOutcome::Exhausted);
        assert!(!state.has_more);
        assert_eq!(state.cursor.index(), 0);
    }
}
