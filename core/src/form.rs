//! Edit buffer, operation mode and user-facing notices.

use std::fmt;
use std::str::FromStr;

use crate::types::BookInput;

/// Selects which remote operation a submit triggers and which fields are
/// editable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Add,
    Update,
    Delete,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Add, Mode::Update, Mode::Delete];

    pub fn name(self) -> &'static str {
        match self {
            Mode::Add => "add",
            Mode::Update => "update",
            Mode::Delete => "delete",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Mode::Add => "Add New Book",
            Mode::Update => "Update Book",
            Mode::Delete => "Delete Book",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown mode `{s}` (expected add, update or delete)"))
    }
}

/// One field of the edit buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Title,
    Author,
    Genre,
    Year,
    Rating,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Id,
        Field::Title,
        Field::Author,
        Field::Genre,
        Field::Year,
        Field::Rating,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Title => "title",
            Field::Author => "author",
            Field::Genre => "genre",
            Field::Year => "year",
            Field::Rating => "rating",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Id => "ID",
            Field::Title => "Title",
            Field::Author => "Author",
            Field::Genre => "Genre",
            Field::Year => "Year",
            Field::Rating => "Rating",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown field `{s}`"))
    }
}

/// The single staging area for user-entered values. Shared by every mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: String,
    pub rating: String,
}

impl EditBuffer {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Id => &self.id,
            Field::Title => &self.title,
            Field::Author => &self.author,
            Field::Genre => &self.genre,
            Field::Year => &self.year,
            Field::Rating => &self.rating,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Id => &mut self.id,
            Field::Title => &mut self.title,
            Field::Author => &mut self.author,
            Field::Genre => &mut self.genre,
            Field::Year => &mut self.year,
            Field::Rating => &mut self.rating,
        };
        *slot = value.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.into_iter().all(|f| self.get(f).is_empty())
    }

    /// The request body for create/update; `id` is left out.
    pub fn to_input(&self) -> BookInput {
        BookInput {
            title: self.title.clone(),
            author: self.author.clone(),
            genre: self.genre.clone(),
            year: self.year.clone(),
            rating: self.rating.clone(),
        }
    }
}

/// A message meant for the user, as opposed to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    MissingTitleOrAuthor,
    MissingIdForUpdate,
    MissingIdForDelete,
    Added,
    Updated,
    Deleted,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::MissingTitleOrAuthor => "Please fill title and author",
            Notice::MissingIdForUpdate => "Enter Book ID to update",
            Notice::MissingIdForDelete => "Enter Book ID to delete",
            Notice::Added => "Book added successfully!",
            Notice::Updated => "Book updated successfully!",
            Notice::Deleted => "Book deleted successfully!",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
