//! In-memory stand-in for the remote `/books` resource.
//!
//! Ids are assigned sequentially from 1. Updates replace every field; fields
//! missing from a body are stored as empty text. `year` and `rating` keep
//! whatever JSON value the client sent.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::{net::TcpListener, sync::RwLock};

pub const DELETED_MESSAGE: &str = "Book deleted successfully!";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: Value,
    pub rating: Value,
}

#[derive(Debug, Deserialize)]
pub struct BookInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default = "empty")]
    pub year: Value,
    #[serde(default = "empty")]
    pub rating: Value,
}

fn empty() -> Value {
    Value::String(String::new())
}

impl BookInput {
    fn into_book(self, id: u64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            genre: self.genre,
            year: self.year,
            rating: self.rating,
        }
    }
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: u64,
    books: BTreeMap<u64, Book>,
}

impl Store {
    pub fn insert(&mut self, input: BookInput) -> Book {
        self.next_id += 1;
        let book = input.into_book(self.next_id);
        self.books.insert(book.id, book.clone());
        book
    }

    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Db::default())
}

/// Router over an existing store, so tests can inspect or seed it.
pub fn app_with(db: Db) -> Router {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/{id}", get(get_book).put(update_book).delete(delete_book))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(db)).await
}

async fn list_books(State(db): State<Db>) -> Json<Vec<Book>> {
    let store = db.read().await;
    Json(store.books().cloned().collect())
}

async fn create_book(State(db): State<Db>, Json(input): Json<BookInput>) -> Json<Book> {
    let book = db.write().await.insert(input);
    tracing::debug!(id = book.id, "book created");
    Json(book)
}

async fn get_book(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Book>, StatusCode> {
    let store = db.read().await;
    store.books.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_book(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<BookInput>,
) -> Result<Json<Book>, StatusCode> {
    let mut store = db.write().await;
    let book = store.books.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    *book = input.into_book(id);
    tracing::debug!(id, "book replaced");
    Ok(Json(book.clone()))
}

async fn delete_book(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<&'static str, StatusCode> {
    let mut store = db.write().await;
    store.books.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    tracing::debug!(id, "book deleted");
    Ok(DELETED_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(json: &str) -> BookInput {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn book_serializes_to_json() {
        let book = input(r#"{"title":"Dune","author":"Herbert","year":1965}"#).into_book(1);
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Dune");
        assert_eq!(json["genre"], "");
        assert_eq!(json["year"], 1965);
        assert_eq!(json["rating"], "");
    }

    #[test]
    fn input_fields_all_default_to_empty() {
        let book = input("{}").into_book(3);
        assert_eq!(book.title, "");
        assert_eq!(book.year, Value::String(String::new()));
    }

    #[test]
    fn input_keeps_textual_scalars() {
        let book = input(r#"{"year":"1965","rating":"4.5"}"#).into_book(1);
        assert_eq!(book.year, "1965");
        assert_eq!(book.rating, "4.5");
    }

    #[test]
    fn store_assigns_sequential_ids() {
        let mut store = Store::default();
        assert_eq!(store.insert(input("{}")).id, 1);
        assert_eq!(store.insert(input("{}")).id, 2);
        store.books.remove(&2);
        assert_eq!(store.insert(input("{}")).id, 3);
        let ids: Vec<u64> = store.books().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
