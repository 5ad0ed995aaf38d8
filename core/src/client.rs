//! Stateless HTTP request builder and response parser for the books API.
//!
//! # Design
//! `BookClient` holds only a `base_url` and carries no mutable state between
//! calls. Each CRUD operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip.
//!
//! Ids come straight from user input, so they are percent-encoded before
//! being placed in the path.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Book, BookInput};

/// Synchronous, stateless client for the books API.
#[derive(Debug, Clone)]
pub struct BookClient {
    base_url: String,
}

impl BookClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_books(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/books", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_book(&self, input: &BookInput) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/books", self.base_url),
            headers: json_headers(),
            body: Some(to_json(input)?),
        })
    }

    /// The full field set is always sent: blank fields overwrite the remote
    /// values with empty text.
    pub fn build_update_book(&self, id: &str, input: &BookInput) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.book_path(id),
            headers: json_headers(),
            body: Some(to_json(input)?),
        })
    }

    pub fn build_delete_book(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.book_path(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_books(&self, response: HttpResponse) -> Result<Vec<Book>, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_create_book(&self, response: HttpResponse) -> Result<Book, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_update_book(&self, response: HttpResponse) -> Result<Book, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_delete_book(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    /// Status-only check for create/update/delete. The body is ignored, so a
    /// backend that answers with plain text still counts as success.
    pub fn check_mutation(&self, response: &HttpResponse) -> Result<(), ApiError> {
        check_status(response)
    }

    fn book_path(&self, id: &str) -> String {
        format!("{}/books/{}", self.base_url, urlencoding::encode(id))
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn to_json(input: &BookInput) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn from_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
