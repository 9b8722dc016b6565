pub mod config;
pub mod console;
pub mod error;
pub mod library;
pub mod models;
pub mod parser;
pub mod source;
pub mod stage;

pub use config::Config;
pub use error::LibraryError;
pub use library::{BookUpdate, BorrowKey, Library, NewBook};
pub use models::{Book, CoverImage, ImageFormat, Status};
pub use source::{BookSource, GoogleBooks};
