//! Rendering contract: what the interface shows is derived from state,
//! never stored.

use crate::form::{Field, Mode};
use crate::types::Book;

pub const TABLE_HEADERS: [&str; 6] = ["ID", "Title", "Author", "Genre", "Year", "Rating"];

pub const EMPTY_TABLE_PLACEHOLDER: &str = "No books available";

/// Fields the form exposes for editing in `mode`.
pub fn editable_fields(mode: Mode) -> &'static [Field] {
    match mode {
        Mode::Add => &[
            Field::Title,
            Field::Author,
            Field::Genre,
            Field::Year,
            Field::Rating,
        ],
        Mode::Update => &[
            Field::Id,
            Field::Title,
            Field::Author,
            Field::Genre,
            Field::Year,
            Field::Rating,
        ],
        Mode::Delete => &[Field::Id],
    }
}

/// Body of the records table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    Rows(Vec<[String; 6]>),
    /// Single full-width row shown instead of an empty body.
    Placeholder(&'static str),
}

pub fn table_rows(cache: &[Book]) -> TableBody {
    if cache.is_empty() {
        return TableBody::Placeholder(EMPTY_TABLE_PLACEHOLDER);
    }
    TableBody::Rows(
        cache
            .iter()
            .map(|b| {
                [
                    b.id.to_string(),
                    b.title.clone(),
                    b.author.clone(),
                    b.genre.clone(),
                    b.year.to_string(),
                    b.rating.to_string(),
                ]
            })
            .collect(),
    )
}
