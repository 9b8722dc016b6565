use std::fmt;

use log::{error, info};

use crate::error::LibraryError;

pub fn update(subject: &str, stage: Stage) {
    match stage {
        Stage::Fail(err) => error!("{}: {}: {}", subject, stage, err),
        other => info!("{}: {}", subject, other),
    }
}

pub enum Stage<'a> {
    Fetched(usize),
    Added,
    Updated,
    Deleted,
    Searched(usize),
    Borrowed,
    Fail(&'a LibraryError),
}

impl<'a> fmt::Display for Stage<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetched(count) => write!(f, "Fetched {} Books", count),
            Self::Added => f.write_str("Added Book"),
            Self::Updated => f.write_str("Updated Book"),
            Self::Deleted => f.write_str("Deleted Book"),
            Self::Searched(count) => write!(f, "Searched {} Books", count),
            Self::Borrowed => f.write_str("Borrowed Book"),
            Self::Fail(_) => f.write_str("Fail"),
        }
    }
}
