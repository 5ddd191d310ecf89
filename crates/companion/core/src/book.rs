//! Books and the chronological library.

use core::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::character::AttributeImpact;
use crate::genre::Genre;

/// Stable book identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct BookId(pub Uuid);

impl BookId {
    /// Creates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A logged book.
///
/// `attribute_impact` is frozen when the book is logged (the positive
/// attribute deltas it caused at that moment) and is display data only;
/// rebuilding a character never reads it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub genre: Genre,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cover_reference: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub themes: Vec<String>,
    pub date_added: DateTime<Utc>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attribute_impact: AttributeImpact,
}

impl Book {
    /// Creates a book with a fresh id and no recorded impact.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: Genre,
        date_added: DateTime<Utc>,
    ) -> Self {
        Self {
            id: BookId::new(),
            title: title.into(),
            author: author.into(),
            genre,
            cover_reference: None,
            themes: Vec::new(),
            date_added,
            attribute_impact: AttributeImpact::new(),
        }
    }

    pub fn with_cover(mut self, cover_reference: impl Into<String>) -> Self {
        self.cover_reference = Some(cover_reference.into());
        self
    }

    pub fn with_themes<I, S>(mut self, themes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.themes = themes.into_iter().map(Into::into).collect();
        self
    }
}

/// A reader's books, kept oldest-first.
///
/// Replay order is part of the type: [`Library::replay`] always yields books
/// in the order they were logged, so rebuilding a character never depends on
/// how a persistence layer happened to sort its rows. Books with equal
/// timestamps keep their insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<Book>", into = "Vec<Book>")
)]
pub struct Library {
    books: Vec<Book>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a library from books in any order.
    pub fn from_books(books: impl IntoIterator<Item = Book>) -> Self {
        let mut books: Vec<Book> = books.into_iter().collect();
        books.sort_by_key(|book| book.date_added);
        Self { books }
    }

    /// Inserts a book at its chronological position.
    pub fn push(&mut self, book: Book) {
        let index = self
            .books
            .partition_point(|existing| existing.date_added <= book.date_added);
        self.books.insert(index, book);
    }

    /// Removes a book by id, returning it if it was present.
    pub fn remove(&mut self, id: BookId) -> Option<Book> {
        let index = self.books.iter().position(|book| book.id == id)?;
        Some(self.books.remove(index))
    }

    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Books in canonical replay order (oldest first).
    pub fn replay(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    /// Books newest first, the usual display order.
    pub fn newest_first(&self) -> impl Iterator<Item = &Book> {
        self.books.iter().rev()
    }

    pub fn as_slice(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl From<Vec<Book>> for Library {
    fn from(books: Vec<Book>) -> Self {
        Self::from_books(books)
    }
}

impl From<Library> for Vec<Book> {
    fn from(library: Library) -> Self {
        library.books
    }
}

impl FromIterator<Book> for Library {
    fn from_iter<I: IntoIterator<Item = Book>>(iter: I) -> Self {
        Self::from_books(iter)
    }
}
