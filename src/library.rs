use log::debug;

use crate::error::{LibraryError, Result};
use crate::models::{Book, Status};
use crate::source::BookSource;
use crate::stage::{self, Stage};

/// Fields of a book entered by hand.
#[derive(Debug, Clone, Default)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub cover_url: String,
}

/// Replacement values for [`Library::update`]. Empty or missing fields keep
/// the current value; `status` is always written.
#[derive(Debug, Clone, Default)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub cover_url: Option<String>,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BorrowKey {
    /// Case-insensitive exact title.
    Title(String),
    Isbn(String),
}

impl BorrowKey {
    pub fn identifier(&self) -> &str {
        match self {
            BorrowKey::Title(s) | BorrowKey::Isbn(s) => s.trim(),
        }
    }

    fn matches(&self, book: &Book) -> bool {
        match self {
            BorrowKey::Title(title) => book.title.to_lowercase() == title.trim().to_lowercase(),
            BorrowKey::Isbn(isbn) => book.isbn == isbn.trim(),
        }
    }

    fn missing(&self) -> LibraryError {
        match self {
            BorrowKey::Title(_) => {
                LibraryError::Validation("enter the title of the book to borrow")
            }
            BorrowKey::Isbn(_) => LibraryError::Validation("enter the ISBN of the book to borrow"),
        }
    }
}

/// The book list of one session.
///
/// Lookups scan in insertion order and the first match wins. ISBNs are not
/// required to be unique.
pub struct Library<S> {
    source: S,
    books: Vec<Book>,
}

fn required<'a>(value: &'a str, missing: &'static str) -> Result<&'a str> {
    let value = value.trim();

    if value.is_empty() {
        return Err(LibraryError::Validation(missing));
    }

    Ok(value)
}

fn replacement(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn report<T>(subject: &str, r: &Result<T>, done: Stage) {
    match r {
        Ok(_) => stage::update(subject, done),
        Err(err) => stage::update(subject, Stage::Fail(err)),
    }
}

impl<S: BookSource> Library<S> {
    /// Fills a new library with the source's default search. A failed search
    /// leaves it empty and hands the error back next to it.
    pub fn open(source: S) -> (Self, Option<LibraryError>) {
        let mut library = Library::with_books(source, Vec::new());

        let r = library.source.search(None).map_err(LibraryError::transport);
        report("startup", &r, Stage::Fetched(r.as_ref().map_or(0, Vec::len)));

        match r {
            Ok(books) => {
                library.books = books;
                (library, None)
            }
            Err(err) => (library, Some(err)),
        }
    }

    pub fn with_books(source: S, books: Vec<Book>) -> Self {
        Library { source, books }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn add(&mut self, new_book: NewBook) -> Result<&Book> {
        let r = self.try_add(new_book);
        report("add", &r, Stage::Added);

        let i = r?;
        Ok(&self.books[i])
    }

    fn try_add(&mut self, new_book: NewBook) -> Result<usize> {
        const MISSING: &str = "fill all fields";

        let title = required(&new_book.title, MISSING)?;
        let author = required(&new_book.author, MISSING)?;
        let isbn = required(&new_book.isbn, MISSING)?;
        let cover_url = required(&new_book.cover_url, MISSING)?;

        let cover = self
            .source
            .fetch_cover(cover_url)
            .ok_or_else(|| LibraryError::ImageFetch(cover_url.to_string()))?;
        debug!("cover {} is a {} image of {} bytes", cover_url, cover.format.as_str(), cover.len());

        self.books.push(Book::new(title, author, isbn, cover_url));

        Ok(self.books.len() - 1)
    }

    pub fn update(&mut self, isbn: &str, update: BookUpdate) -> Result<&Book> {
        let r = self.try_update(isbn, update);
        report(isbn, &r, Stage::Updated);

        let i = r?;
        Ok(&self.books[i])
    }

    fn try_update(&mut self, isbn: &str, update: BookUpdate) -> Result<usize> {
        let isbn = required(isbn, "enter ISBN of the book to update")?;

        let i = self
            .position(isbn)
            .ok_or_else(|| LibraryError::NotFound(isbn.to_string()))?;
        let book = &mut self.books[i];

        if let Some(title) = replacement(update.title) {
            book.title = title;
        }
        if let Some(author) = replacement(update.author) {
            book.author = author;
        }
        if let Some(cover_url) = replacement(update.cover_url) {
            book.cover_url = cover_url;
        }
        book.status = update.status;

        Ok(i)
    }

    pub fn delete(&mut self, isbn: &str) -> Result<Book> {
        let r = self.try_delete(isbn);
        report(isbn, &r, Stage::Deleted);

        r
    }

    fn try_delete(&mut self, isbn: &str) -> Result<Book> {
        let isbn = required(isbn, "enter ISBN of the book to delete")?;

        let i = self
            .position(isbn)
            .ok_or_else(|| LibraryError::NotFound(isbn.to_string()))?;

        Ok(self.books.remove(i))
    }

    /// Replaces the whole list with the search results. A failed search
    /// empties the list.
    pub fn search(&mut self, term: &str) -> Result<&[Book]> {
        let r = self.try_search(term);
        report(term, &r, Stage::Searched(self.books.len()));

        r?;
        Ok(&self.books)
    }

    fn try_search(&mut self, term: &str) -> Result<()> {
        let term = required(term, "enter a search term")?;

        match self.source.search(Some(term)) {
            Ok(books) => {
                self.books = books;
                Ok(())
            }
            Err(err) => {
                self.books = Vec::new();
                Err(LibraryError::transport(err))
            }
        }
    }

    /// Marks the first matching available book as borrowed.
    pub fn borrow(&mut self, key: &BorrowKey) -> Result<&Book> {
        let r = self.try_borrow(key);
        report(key.identifier(), &r, Stage::Borrowed);

        let i = r?;
        Ok(&self.books[i])
    }

    fn try_borrow(&mut self, key: &BorrowKey) -> Result<usize> {
        if key.identifier().is_empty() {
            return Err(key.missing());
        }

        let available = self
            .books
            .iter()
            .position(|book| key.matches(book) && book.is_available());

        match available {
            Some(i) => {
                self.books[i].status = Status::Borrowed;
                Ok(i)
            }
            None => match self.books.iter().find(|book| key.matches(book)) {
                Some(book) => Err(LibraryError::AlreadyBorrowed(book.title.clone())),
                None => Err(LibraryError::NotFound(key.identifier().to_string())),
            },
        }
    }

    fn position(&self, isbn: &str) -> Option<usize> {
        self.books.iter().position(|book| book.isbn == isbn)
    }
}
