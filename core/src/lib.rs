//! Client core for a remote collection of book records.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps a client-side
//! Record Manager (cached collection, shared edit buffer, operation mode) in
//! step with the remote `/books` resource.
//!
//! # Design
//! - `BookClient` is stateless; it holds only `base_url`.
//! - `RecordManager` hands out ticketed requests and applies their outcomes,
//!   so stale refreshes never overwrite newer state.
//! - `Session` drives a manager through any `Transport` synchronously.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod form;
pub mod http;
pub mod manager;
pub mod session;
pub mod types;
pub mod view;

pub use client::BookClient;
pub use error::ApiError;
pub use form::{EditBuffer, Field, Mode, Notice};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use manager::{Completion, Issued, RecordManager, SubmitError, Ticket};
pub use session::{Outcome, Session};
pub use types::{Book, BookInput, FieldValue};
pub use view::{TableBody, TABLE_HEADERS};
