use std::io::{self, BufRead, Write};

use log::trace;

use crate::library::{BookUpdate, BorrowKey, Library, NewBook};
use crate::models::{Book, Status};
use crate::source::BookSource;

const CARD_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ViewAll,
    Add,
    Update,
    Delete,
    Search,
    Borrow,
    Quit,
}

impl Action {
    pub const MENU: [Action; 6] = [
        Action::ViewAll,
        Action::Add,
        Action::Update,
        Action::Delete,
        Action::Search,
        Action::Borrow,
    ];

    pub fn label(&self) -> &str {
        match self {
            Action::ViewAll => "View All Books",
            Action::Add => "Add Book",
            Action::Update => "Update Book",
            Action::Delete => "Delete Book",
            Action::Search => "Search Books",
            Action::Borrow => "Borrow Book",
            Action::Quit => "Quit",
        }
    }

    /// Accepts the menu number or the label, ignoring case.
    pub fn parse(input: &str) -> Option<Action> {
        let input = input.trim();

        if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
            return Some(Action::Quit);
        }

        if let Ok(n) = input.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| Action::MENU.get(i).copied());
        }

        Action::MENU
            .iter()
            .find(|action| action.label().eq_ignore_ascii_case(input))
            .copied()
    }
}

fn fit(text: &str, width: usize) -> String {
    let mut fitted = text.chars().take(width).collect::<String>();

    if text.chars().count() > width && width > 3 {
        fitted = fitted.chars().take(width - 3).collect();
        fitted.push_str("...");
    }

    format!("{:<width$}", fitted, width = width)
}

pub fn card(book: &Book) -> Vec<String> {
    vec![
        book.title.clone(),
        format!("Author: {}", book.author),
        format!("ISBN: {}", book.isbn),
        format!("Status: {}", book.status),
        format!("Cover: {}", book.cover_url),
    ]
}

/// Lays cards out left to right, `columns` to a row.
pub fn grid(books: &[Book], columns: usize) -> String {
    let mut out = String::new();

    for row in books.chunks(columns.max(1)) {
        let cards = row.iter().map(card).collect::<Vec<_>>();
        let height = cards.iter().map(Vec::len).max().unwrap_or(0);

        for line in 0..height {
            let cells = cards
                .iter()
                .map(|c| fit(c.get(line).map_or("", String::as_str), CARD_WIDTH))
                .collect::<Vec<_>>();
            out.push_str(cells.join(" | ").trim_end());
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

pub struct Console<R, W> {
    input: R,
    output: W,
    columns: usize,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, columns: usize) -> Self {
        Console {
            input,
            output,
            columns,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// `None` once the input is exhausted.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    /// Prompts each field in turn. `None` if the input runs out first.
    fn form(&mut self, fields: &[&str]) -> io::Result<Option<Vec<String>>> {
        let mut values = Vec::with_capacity(fields.len());

        for field in fields {
            match self.prompt(field)? {
                Some(value) => values.push(value),
                None => return Ok(None),
            }
        }

        Ok(Some(values))
    }

    fn menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "Library Management System")?;
        for (i, action) in Action::MENU.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, action.label())?;
        }
        writeln!(self.output, "  q) {}", Action::Quit.label())
    }

    pub fn run<S: BookSource>(&mut self, library: &mut Library<S>) -> io::Result<()> {
        loop {
            self.menu()?;

            let choice = match self.prompt("Choose")? {
                Some(choice) => choice,
                None => return Ok(()),
            };

            let action = match Action::parse(&choice) {
                Some(Action::Quit) => return Ok(()),
                Some(action) => action,
                None => {
                    writeln!(self.output, "Error: Unknown choice \"{}\".", choice.trim())?;
                    continue;
                }
            };
            trace!("action = {:?}", action);

            writeln!(self.output, "\n{}", action.label())?;
            if !self.dispatch(action, library)? {
                return Ok(());
            }
            writeln!(self.output)?;
        }
    }

    /// Runs one action. `false` when the input ran out halfway through a form.
    fn dispatch<S: BookSource>(
        &mut self,
        action: Action,
        library: &mut Library<S>,
    ) -> io::Result<bool> {
        let message = match action {
            Action::ViewAll => {
                if library.is_empty() {
                    writeln!(self.output, "No books to show.")?;
                } else {
                    write!(self.output, "{}", grid(library.books(), self.columns))?;
                }
                return Ok(true);
            }
            Action::Add => {
                let fields = ["Title", "Author", "ISBN", "Book Cover Image URL"];
                let values = match self.form(&fields)? {
                    Some(values) => values,
                    None => return Ok(false),
                };
                let mut values = values.into_iter();
                let new_book = NewBook {
                    title: values.next().unwrap_or_default(),
                    author: values.next().unwrap_or_default(),
                    isbn: values.next().unwrap_or_default(),
                    cover_url: values.next().unwrap_or_default(),
                };

                library
                    .add(new_book)
                    .map(|book| format!("Book \"{}\" added successfully!", book.title))
            }
            Action::Update => {
                let fields = [
                    "ISBN of the book to update",
                    "New Title (optional)",
                    "New Author (optional)",
                    "New Book Cover Image URL (optional)",
                    "Status [Available/Borrowed]",
                ];
                let values = match self.form(&fields)? {
                    Some(values) => values,
                    None => return Ok(false),
                };

                let status = if values[4].trim().is_empty() {
                    Ok(Status::Available)
                } else {
                    values[4].parse::<Status>()
                };
                let status = match status {
                    Ok(status) => status,
                    Err(err) => {
                        writeln!(self.output, "Error: {}", err)?;
                        return Ok(true);
                    }
                };

                let isbn = values[0].clone();
                let update = BookUpdate {
                    title: Some(values[1].clone()),
                    author: Some(values[2].clone()),
                    cover_url: Some(values[3].clone()),
                    status,
                };

                library
                    .update(&isbn, update)
                    .map(|_| format!("Book \"{}\" updated successfully!", isbn.trim()))
            }
            Action::Delete => {
                let isbn = match self.prompt("ISBN of the book to delete")? {
                    Some(isbn) => isbn,
                    None => return Ok(false),
                };

                library
                    .delete(&isbn)
                    .map(|_| format!("Book \"{}\" deleted successfully!", isbn.trim()))
            }
            Action::Search => {
                let term = match self.prompt("Search Term")? {
                    Some(term) => term,
                    None => return Ok(false),
                };

                match library.search(&term) {
                    Ok(books) => {
                        writeln!(self.output, "Search results for \"{}\":", term.trim())?;
                        write!(self.output, "{}", grid(books, self.columns))?;
                        return Ok(true);
                    }
                    Err(err) => Err(err),
                }
            }
            Action::Borrow => {
                let title = match self.prompt("Title of the book to borrow")? {
                    Some(title) => title,
                    None => return Ok(false),
                };

                library
                    .borrow(&BorrowKey::Title(title))
                    .map(|book| format!("You have borrowed \"{}\".", book.title))
            }
            Action::Quit => return Ok(false),
        };

        match message {
            Ok(message) => writeln!(self.output, "{}", message)?,
            Err(err) => writeln!(self.output, "Error: {}", err)?,
        }

        Ok(true)
    }
}
