mod book;
mod cover;

pub use book::{Book, Status, NO_ISBN, NO_TITLE};
pub use cover::{CoverImage, ImageFormat};
