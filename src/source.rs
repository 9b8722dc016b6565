use anyhow;
use log::trace;
use reqwest::blocking::Client;

use crate::config::Config;
use crate::models::{Book, CoverImage};
use crate::parser::{fetch_image, Parser, Volumes};

/// Where a [`Library`](crate::Library) gets its books and cover images from.
pub trait BookSource {
    /// Runs one search. An empty or absent query means the default term.
    fn search(&self, query: Option<&str>) -> anyhow::Result<Vec<Book>>;

    fn fetch_cover(&self, url: &str) -> Option<CoverImage>;
}

impl<S: BookSource + ?Sized> BookSource for &S {
    fn search(&self, query: Option<&str>) -> anyhow::Result<Vec<Book>> {
        (**self).search(query)
    }

    fn fetch_cover(&self, url: &str) -> Option<CoverImage> {
        (**self).fetch_cover(url)
    }
}

/// Google Books over blocking HTTP.
pub struct GoogleBooks {
    client: Client,
    api_url: String,
    default_query: String,
}

impl GoogleBooks {
    pub fn new(config: &Config) -> anyhow::Result<GoogleBooks> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(GoogleBooks::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &Config) -> GoogleBooks {
        GoogleBooks {
            client,
            api_url: config.api_url.clone(),
            default_query: config.default_query.clone(),
        }
    }

    fn query<'a>(&'a self, query: Option<&'a str>) -> &'a str {
        match query.map(str::trim) {
            Some(q) if !q.is_empty() => q,
            _ => self.default_query.as_str(),
        }
    }
}

impl BookSource for GoogleBooks {
    fn search(&self, query: Option<&str>) -> anyhow::Result<Vec<Book>> {
        trace!("GoogleBooks::search()");
        let volumes = Volumes::new(self.api_url.as_str(), self.query(query)).request(&self.client)?;

        volumes.parse()
    }

    fn fetch_cover(&self, url: &str) -> Option<CoverImage> {
        fetch_image(&self.client, url)
    }
}
