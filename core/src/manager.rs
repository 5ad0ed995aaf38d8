//! The Record Manager: cache, edit buffer and mode, plus the protocol that
//! keeps the cache in step with the remote collection.
//!
//! # Design
//! The manager never performs I/O. Every operation that needs the network
//! returns an [`Issued`] request stamped with a [`Ticket`]; the host executes
//! it whenever it likes and hands the outcome back through
//! [`RecordManager::complete`]. Tickets are handed out in increasing order,
//! which gives two guarantees regardless of how responses interleave:
//!
//! - a refresh response older than one already applied (or older than the
//!   last successful mutation) is discarded instead of overwriting the cache;
//! - at most one create/update/delete is outstanding at a time.
//!
//! Failures are logged through `log` and returned as values; nothing here
//! panics or propagates past the caller.

use std::collections::HashMap;

use thiserror::Error;

use crate::client::BookClient;
use crate::error::ApiError;
use crate::form::{EditBuffer, Field, Mode, Notice};
use crate::http::{HttpRequest, HttpResponse};
use crate::types::Book;
use crate::view::{self, TableBody};

/// Sequence token attached to every issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// A request the host must execute, and the ticket to complete it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issued {
    pub ticket: Ticket,
    pub request: HttpRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mutation {
    Create,
    Update,
    Delete,
}

impl Mutation {
    fn notice(self) -> Notice {
        match self {
            Mutation::Create => Notice::Added,
            Mutation::Update => Notice::Updated,
            Mutation::Delete => Notice::Deleted,
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Mutation::Create => "adding",
            Mutation::Update => "updating",
            Mutation::Delete => "deleting",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Refresh,
    Mutation(Mutation),
}

/// Why a submit did not produce a request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// A required field is missing; shown to the user, nothing was sent.
    #[error("{0}")]
    Validation(Notice),

    /// A create/update/delete is still waiting for its response.
    #[error("another submit is still in flight")]
    Busy,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// What applying a response did to the manager's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The cache was replaced with `count` records.
    Refreshed { count: usize },
    /// The response was stale or its ticket unknown; state is unchanged.
    Discarded,
    /// The cache was left as it was.
    RefreshFailed(ApiError),
    /// The mutation succeeded, the buffer was cleared and `refresh` must be
    /// executed to resynchronize the cache.
    Mutated { notice: Notice, refresh: Issued },
    /// The mutation failed; buffer and cache are untouched.
    MutationFailed(ApiError),
}

#[derive(Debug)]
pub struct RecordManager {
    client: BookClient,
    cache: Vec<Book>,
    buffer: EditBuffer,
    mode: Mode,
    next_ticket: u64,
    pending: HashMap<Ticket, Pending>,
    // Refresh responses with a ticket below this are stale.
    fresh_from: u64,
}

impl RecordManager {
    pub fn new(client: BookClient) -> Self {
        Self {
            client,
            cache: Vec::new(),
            buffer: EditBuffer::default(),
            mode: Mode::default(),
            next_ticket: 0,
            pending: HashMap::new(),
            fresh_from: 0,
        }
    }

    pub fn cache(&self) -> &[Book] {
        &self.cache
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// True while a create/update/delete awaits its response.
    pub fn is_busy(&self) -> bool {
        self.pending.values().any(|p| matches!(p, Pending::Mutation(_)))
    }

    pub fn editable_fields(&self) -> &'static [Field] {
        view::editable_fields(self.mode)
    }

    pub fn table(&self) -> TableBody {
        view::table_rows(&self.cache)
    }

    /// Issue a read of the whole remote collection.
    pub fn refresh(&mut self) -> Issued {
        let request = self.client.build_list_books();
        self.issue(Pending::Refresh, request)
    }

    /// Switch the active mode. Cache and buffer are left alone.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn edit_field(&mut self, field: Field, value: impl Into<String>) {
        self.buffer.set(field, value);
    }

    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
    }

    /// Submit according to the current mode.
    pub fn submit(&mut self) -> Result<Issued, SubmitError> {
        match self.mode {
            Mode::Add => self.submit_add(),
            Mode::Update => self.submit_update(),
            Mode::Delete => self.submit_delete(),
        }
    }

    pub fn submit_add(&mut self) -> Result<Issued, SubmitError> {
        if self.buffer.title.is_empty() || self.buffer.author.is_empty() {
            return Err(self.reject(Notice::MissingTitleOrAuthor));
        }
        self.ensure_idle()?;
        let request = self.client.build_create_book(&self.buffer.to_input())?;
        Ok(self.issue(Pending::Mutation(Mutation::Create), request))
    }

    pub fn submit_update(&mut self) -> Result<Issued, SubmitError> {
        if self.buffer.id.is_empty() {
            return Err(self.reject(Notice::MissingIdForUpdate));
        }
        self.ensure_idle()?;
        let request = self
            .client
            .build_update_book(&self.buffer.id, &self.buffer.to_input())?;
        Ok(self.issue(Pending::Mutation(Mutation::Update), request))
    }

    pub fn submit_delete(&mut self) -> Result<Issued, SubmitError> {
        if self.buffer.id.is_empty() {
            return Err(self.reject(Notice::MissingIdForDelete));
        }
        self.ensure_idle()?;
        let request = self.client.build_delete_book(&self.buffer.id);
        Ok(self.issue(Pending::Mutation(Mutation::Delete), request))
    }

    /// Apply the outcome of a previously issued request.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<HttpResponse, ApiError>,
    ) -> Completion {
        let Some(pending) = self.pending.remove(&ticket) else {
            log::debug!("ignoring response for unknown ticket {}", ticket.0);
            return Completion::Discarded;
        };
        match pending {
            Pending::Refresh => self.complete_refresh(ticket, result),
            Pending::Mutation(mutation) => self.complete_mutation(mutation, result),
        }
    }

    fn complete_refresh(
        &mut self,
        ticket: Ticket,
        result: Result<HttpResponse, ApiError>,
    ) -> Completion {
        match result.and_then(|response| self.client.parse_list_books(response)) {
            Ok(_) if ticket.0 < self.fresh_from => {
                log::debug!("discarding stale refresh {}", ticket.0);
                Completion::Discarded
            }
            Ok(books) => {
                self.fresh_from = ticket.0 + 1;
                self.cache = books;
                log::debug!("cache replaced with {} books", self.cache.len());
                Completion::Refreshed {
                    count: self.cache.len(),
                }
            }
            Err(e) => {
                log::error!("Error fetching books: {e}");
                Completion::RefreshFailed(e)
            }
        }
    }

    fn complete_mutation(
        &mut self,
        mutation: Mutation,
        result: Result<HttpResponse, ApiError>,
    ) -> Completion {
        if let Err(e) = result.and_then(|response| self.accept_mutation(mutation, response)) {
            log::error!("Error {} book: {e}", mutation.verb());
            return Completion::MutationFailed(e);
        }
        let refresh = self.refresh();
        // Anything issued before this refresh may predate the mutation.
        self.fresh_from = refresh.ticket.0;
        self.buffer.clear();
        Completion::Mutated {
            notice: mutation.notice(),
            refresh,
        }
    }

    /// Any 2xx is success. A saved record in the body is only logged; the
    /// follow-up refresh is what updates the cache.
    fn accept_mutation(&self, mutation: Mutation, response: HttpResponse) -> Result<(), ApiError> {
        if mutation == Mutation::Delete {
            return self.client.parse_delete_book(response);
        }
        self.client.check_mutation(&response)?;
        let saved = match mutation {
            Mutation::Create => self.client.parse_create_book(response),
            _ => self.client.parse_update_book(response),
        };
        match saved {
            Ok(book) => log::debug!("saved book {} ({})", book.id, book.title),
            Err(e) => log::debug!("mutation body is not a book: {e}"),
        }
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), SubmitError> {
        if self.is_busy() {
            log::warn!("submit rejected: a previous submit has not completed");
            return Err(SubmitError::Busy);
        }
        Ok(())
    }

    fn reject(&self, notice: Notice) -> SubmitError {
        log::debug!("{} submit rejected: {notice}", self.mode);
        SubmitError::Validation(notice)
    }

    fn issue(&mut self, pending: Pending, request: HttpRequest) -> Issued {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        log::debug!("[{}] {} {}", ticket.0, request.method, request.path);
        self.pending.insert(ticket, pending);
        Issued { ticket, request }
    }
}
