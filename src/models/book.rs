use std::fmt;
use std::str::FromStr;

pub const NO_TITLE: &str = "No Title";
pub const NO_ISBN: &str = "No ISBN";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Available,
    Borrowed,
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::Available => "Available",
            Status::Borrowed => "Borrowed",
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Available
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(Status::Available),
            "borrowed" => Ok(Status::Borrowed),
            unknown => Err(anyhow::anyhow!("Unknown Status {}", unknown)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub cover_url: String,
    pub status: Status,
}

impl Book {
    /// New books always start out `Available`.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        cover_url: impl Into<String>,
    ) -> Book {
        Book {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            cover_url: cover_url.into(),
            status: Status::Available,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == Status::Available
    }
}
