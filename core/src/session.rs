//! Synchronous driver that pairs a `RecordManager` with a `Transport`.
//!
//! Each call executes the issued request, and for a successful mutation the
//! follow-up refresh, before returning an [`Outcome`] the interface layer can
//! render. Everything is also logged by the manager.

use crate::client::BookClient;
use crate::error::ApiError;
use crate::form::{Field, Mode, Notice};
use crate::http::Transport;
use crate::manager::{Completion, Issued, RecordManager, SubmitError};

/// Result of one user action, for the interface to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Refreshed,
    /// Cache left stale.
    RefreshFailed(ApiError),
    /// Mutation succeeded; the cache reflects the follow-up refresh if it
    /// succeeded too.
    Done(Notice),
    /// Validation failed before anything was sent.
    Rejected(Notice),
    Busy,
    /// Mutation failed; buffer and cache untouched.
    Failed(ApiError),
}

#[derive(Debug)]
pub struct Session<T> {
    manager: RecordManager,
    transport: T,
}

impl<T: Transport> Session<T> {
    /// Create the session and perform the initial fetch.
    pub fn mount(client: BookClient, transport: T) -> (Self, Outcome) {
        let mut session = Self {
            manager: RecordManager::new(client),
            transport,
        };
        let outcome = session.refresh();
        (session, outcome)
    }

    pub fn manager(&self) -> &RecordManager {
        &self.manager
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.manager.set_mode(mode);
    }

    pub fn edit_field(&mut self, field: Field, value: impl Into<String>) {
        self.manager.edit_field(field, value);
    }

    pub fn clear_buffer(&mut self) {
        self.manager.clear_buffer();
    }

    pub fn refresh(&mut self) -> Outcome {
        let issued = self.manager.refresh();
        match self.run(issued) {
            Completion::RefreshFailed(e) => Outcome::RefreshFailed(e),
            _ => Outcome::Refreshed,
        }
    }

    pub fn submit(&mut self) -> Outcome {
        let issued = self.manager.submit();
        self.finish(issued)
    }

    pub fn submit_add(&mut self) -> Outcome {
        let issued = self.manager.submit_add();
        self.finish(issued)
    }

    pub fn submit_update(&mut self) -> Outcome {
        let issued = self.manager.submit_update();
        self.finish(issued)
    }

    pub fn submit_delete(&mut self) -> Outcome {
        let issued = self.manager.submit_delete();
        self.finish(issued)
    }

    fn finish(&mut self, issued: Result<Issued, SubmitError>) -> Outcome {
        let issued = match issued {
            Ok(issued) => issued,
            Err(SubmitError::Validation(notice)) => return Outcome::Rejected(notice),
            Err(SubmitError::Busy) => return Outcome::Busy,
            Err(SubmitError::Api(e)) => return Outcome::Failed(e),
        };
        match self.run(issued) {
            Completion::Mutated { notice, refresh } => {
                // A failed follow-up refresh is logged; the mutation itself stands.
                self.run(refresh);
                Outcome::Done(notice)
            }
            Completion::MutationFailed(e) => Outcome::Failed(e),
            other => Outcome::Failed(unexpected(&other)),
        }
    }

    fn run(&mut self, issued: Issued) -> Completion {
        let result = self.transport.execute(issued.request);
        self.manager.complete(issued.ticket, result)
    }
}

/// A submit ticket resolved to something other than a mutation result.
fn unexpected(completion: &Completion) -> ApiError {
    log::error!("submit completed unexpectedly: {completion:?}");
    ApiError::Unexpected(format!("submit resolved as {completion:?}"))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Replays canned responses and records every request.
    #[derive(Default)]
    struct Scripted {
        responses: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
        seen: RefCell<Vec<HttpRequest>>,
    }

    impl Scripted {
        fn with(responses: Vec<Result<HttpResponse, ApiError>>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
                seen: RefCell::default(),
            }
        }

        fn methods(&self) -> Vec<HttpMethod> {
            self.seen.borrow().iter().map(|r| r.method).collect()
        }
    }

    impl Transport for Scripted {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".into())))
        }
    }

    fn ok(body: &str) -> Result<HttpResponse, ApiError> {
        Ok(HttpResponse::new(200, body))
    }

    const DUNE: &str = r#"[{"id":1,"title":"Dune","author":"Herbert","genre":"","year":"","rating":""}]"#;

    fn client() -> BookClient {
        BookClient::new("http://books.test")
    }

    #[test]
    fn unexpected_completion_is_a_failure() {
        let err = unexpected(&Completion::Discarded);
        assert_eq!(err, ApiError::Unexpected("submit resolved as Discarded".to_string()));
        assert_eq!(err.to_string(), "unexpected completion: submit resolved as Discarded");
    }

    #[test]
    fn rejected_and_failed_submits_keep_mode() {
        let transport = Scripted::with(vec![ok(DUNE), Ok(HttpResponse::new(404, ""))]);
        let (mut session, _) = Session::mount(client(), &transport);
        session.set_mode(Mode::Delete);
        assert_eq!(session.submit(), Outcome::Rejected(Notice::MissingIdForDelete));
        assert_eq!(session.manager().mode(), Mode::Delete);
        session.edit_field(Field::Id, "3");
        assert_eq!(session.submit(), Outcome::Failed(ApiError::NotFound));
        assert_eq!(session.manager().mode(), Mode::Delete);
    }

    #[test]
    fn mount_fetches_once() {
        let transport = Scripted::with(vec![ok(DUNE)]);
        let (session, outcome) = Session::mount(client(), &transport);
        assert_eq!(outcome, Outcome::Refreshed);
        assert_eq!(session.manager().cache().len(), 1);
        assert_eq!(transport.methods(), vec![HttpMethod::Get]);
    }

    #[test]
    fn mount_survives_unreachable_remote() {
        let transport = Scripted::with(vec![Err(ApiError::Transport("refused".into()))]);
        let (session, outcome) = Session::mount(client(), &transport);
        assert!(matches!(outcome, Outcome::RefreshFailed(ApiError::Transport(_))));
        assert!(session.manager().cache().is_empty());
    }

    #[test]
    fn validation_sends_nothing() {
        let transport = Scripted::with(vec![ok("[]")]);
        let (mut session, _) = Session::mount(client(), &transport);
        session.edit_field(Field::Author, "Herbert");
        assert_eq!(
            session.submit_add(),
            Outcome::Rejected(Notice::MissingTitleOrAuthor)
        );
        session.set_mode(Mode::Delete);
        assert_eq!(session.submit(), Outcome::Rejected(Notice::MissingIdForDelete));
        assert_eq!(transport.methods(), vec![HttpMethod::Get]);
    }

    #[test]
    fn add_then_refresh_then_clear() {
        let transport = Scripted::with(vec![ok("[]"), ok("{}"), ok(DUNE)]);
        let (mut session, _) = Session::mount(client(), &transport);
        session.edit_field(Field::Title, "Dune");
        session.edit_field(Field::Author, "Herbert");

        assert_eq!(session.submit_add(), Outcome::Done(Notice::Added));
        assert_eq!(
            transport.methods(),
            vec![HttpMethod::Get, HttpMethod::Post, HttpMethod::Get]
        );
        assert_eq!(session.manager().cache()[0].title, "Dune");
        assert!(session.manager().buffer().is_empty());
    }

    #[test]
    fn failed_submit_skips_refresh() {
        let transport = Scripted::with(vec![ok(DUNE), Ok(HttpResponse::new(500, "down"))]);
        let (mut session, _) = Session::mount(client(), &transport);
        session.set_mode(Mode::Update);
        session.edit_field(Field::Id, "1");
        session.edit_field(Field::Rating, "5");
        let before = session.manager().buffer().clone();

        let outcome = session.submit_update();
        assert!(matches!(outcome, Outcome::Failed(ApiError::HttpError { status: 500, .. })));
        assert_eq!(session.manager().buffer(), &before);
        assert_eq!(transport.methods(), vec![HttpMethod::Get, HttpMethod::Put]);
    }

    #[test]
    fn failed_follow_up_refresh_still_reports_done() {
        let transport = Scripted::with(vec![
            ok(DUNE),
            ok("Book deleted successfully!"),
            Err(ApiError::Transport("timeout".into())),
        ]);
        let (mut session, _) = Session::mount(client(), &transport);
        session.set_mode(Mode::Delete);
        session.edit_field(Field::Id, "1");
        assert_eq!(session.submit_delete(), Outcome::Done(Notice::Deleted));
        assert_eq!(session.manager().cache().len(), 1);
        assert!(session.manager().buffer().is_empty());
    }
}
