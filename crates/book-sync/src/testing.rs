//! Scripted in-memory API for tests

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tokio::sync::oneshot;

use crate::api::{AccountCredentials, ApiError, AuthApi, BookApi, PageRequest, TokenResponse};
use crate::model::{Book, BookId, Page};
use crate::session::{Credential, Session};

pub(crate) fn book(id: &str) -> Book {
    Book {
        id: BookId::from(id),
        title: format!("Title {id}"),
        author: format!("Author {id}"),
        price: Decimal::new(4990, 2),
        launch_date: NaiveDate::from_ymd_opt(2017, 11, 29).unwrap(),
    }
}

pub(crate) fn books(ids: &[&str]) -> Vec<Book> {
    ids.iter().map(|id| book(id)).collect()
}

pub(crate) fn ids(books: &[Book]) -> Vec<String> {
    books.iter().map(|b| b.id.to_string()).collect()
}

pub(crate) fn signed_in() -> Session {
    let session = Session::new();
    session.establish(Credential::new("leandro", "token-1"));
    session
}

#[derive(Default)]
struct FakeState {
    /// Page index -> books; unscripted pages are empty
    pages: HashMap<u32, Vec<Book>>,
    /// One-shot failures consumed before the scripted page
    fetch_failures: HashMap<u32, VecDeque<ApiError>>,
    delete_failures: HashMap<BookId, ApiError>,
    /// Next fetch waits on this before answering; its response is built first
    gate: Option<oneshot::Receiver<()>>,
    /// Next delete waits on this before committing
    delete_gate: Option<oneshot::Receiver<()>>,
    fetches: Vec<PageRequest>,
    deletes: Vec<BookId>,
    deleted: HashSet<BookId>,
    bearers: Vec<String>,
    token: Option<Result<String, ApiError>>,
    sign_ins: Vec<String>,
}

#[derive(Clone, Default)]
pub(crate) struct FakeApi {
    state: Rc<RefCell<FakeState>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, index: u32, books: Vec<Book>) -> Self {
        self.state.borrow_mut().pages.insert(index, books);
        self
    }

    pub fn fail_fetch_once(&self, index: u32, error: ApiError) {
        self.state
            .borrow_mut()
            .fetch_failures
            .entry(index)
            .or_default()
            .push_back(error);
    }

    pub fn fail_delete(&self, id: &str, error: ApiError) {
        self.state.borrow_mut().delete_failures.insert(BookId::from(id), error);
    }

    /// Hold the next fetch until the returned sender fires
    pub fn hold_next_fetch(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.state.borrow_mut().gate = Some(rx);
        tx
    }

    /// Hold the next delete until the returned sender fires
    pub fn hold_next_delete(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.state.borrow_mut().delete_gate = Some(rx);
        tx
    }

    pub fn with_token(self, token: &str) -> Self {
        self.state.borrow_mut().token = Some(Ok(token.to_string()));
        self
    }

    pub fn with_sign_in_error(self, error: ApiError) -> Self {
        self.state.borrow_mut().token = Some(Err(error));
        self
    }

    pub fn fetches(&self) -> Vec<PageRequest> {
        self.state.borrow().fetches.clone()
    }

    pub fn fetched_pages(&self) -> Vec<u32> {
        self.state.borrow().fetches.iter().map(|r| r.page).collect()
    }

    pub fn deletes(&self) -> Vec<BookId> {
        self.state.borrow().deletes.clone()
    }

    pub fn bearers(&self) -> Vec<String> {
        self.state.borrow().bearers.clone()
    }

    pub fn sign_ins(&self) -> Vec<String> {
        self.state.borrow().sign_ins.clone()
    }
}

#[async_trait(?Send)]
impl BookApi for FakeApi {
    async fn fetch_page(&self, credential: &Credential, request: PageRequest) -> Result<Page, ApiError> {
        // The server answers with the collection as it was when the request arrived
        let (response, gate) = {
            let mut state = self.state.borrow_mut();
            state.fetches.push(request);
            state.bearers.push(credential.bearer());
            let failure = state
                .fetch_failures
                .get_mut(&request.page)
                .and_then(|queue| queue.pop_front());
            let response = match failure {
                Some(error) => Err(error),
                None => {
                    let books = state
                        .pages
                        .get(&request.page)
                        .map(|page| page.iter().filter(|b| !state.deleted.contains(&b.id)).cloned().collect())
                        .unwrap_or_default();
                    Ok(Page::new(books))
                }
            };
            (response, state.gate.take())
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        response
    }

    async fn delete_book(&self, credential: &Credential, id: &BookId) -> Result<(), ApiError> {
        let gate = {
            let mut state = self.state.borrow_mut();
            state.deletes.push(id.clone());
            state.bearers.push(credential.bearer());
            state.delete_gate.take()
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        let mut state = self.state.borrow_mut();
        if let Some(error) = state.delete_failures.get(id) {
            return Err(error.clone());
        }
        state.deleted.insert(id.clone());
        Ok(())
    }
}

#[async_trait(?Send)]
impl AuthApi for FakeApi {
    async fn sign_in(&self, account: &AccountCredentials) -> Result<TokenResponse, ApiError> {
        let mut state = self.state.borrow_mut();
        state.sign_ins.push(account.username.clone());
        match state.token.clone() {
            Some(Ok(access_token)) => Ok(TokenResponse { access_token }),
            Some(Err(error)) => Err(error),
            None => Err(ApiError::Status(500)),
        }
    }
}
