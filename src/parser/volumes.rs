use anyhow::{self, Context};
use log::{debug, trace};
use reqwest::blocking::Client;
use reqwest::Url;
use serde::Deserialize;
use serde_json;

use super::Parser;
use crate::models::{Book, Status, NO_ISBN, NO_TITLE};

const ISBN_13: &str = "ISBN_13";

/// # Volumes Parser
/// Searches the Google Books volumes endpoint.
///
/// ```json
/// {
///   "items": [
///     {
///       "volumeInfo": {
///         "title": "Dune",
///         "authors": ["Frank Herbert"],
///         "industryIdentifiers": [
///           { "type": "ISBN_10", "identifier": "0441013597" },
///           { "type": "ISBN_13", "identifier": "9780441013593" }
///         ],
///         "imageLinks": { "thumbnail": "http://books.google.com/books/content?id=..." }
///       }
///     }
///   ]
/// }
/// ```
pub struct Volumes {
    api_url: String,
    query: String,
    request_data: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct VolumesResponse {
    items: Option<Vec<Volume>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct Volume {
    volume_info: Option<VolumeInfo>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    industry_identifiers: Option<Vec<IndustryIdentifier>>,
    image_links: Option<ImageLinks>,
}

#[derive(Deserialize, Debug)]
struct IndustryIdentifier {
    #[serde(rename = "type")]
    kind: Option<String>,
    identifier: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ImageLinks {
    thumbnail: Option<String>,
}

impl VolumeInfo {
    fn isbn_13(&self) -> Option<&str> {
        self.industry_identifiers
            .iter()
            .flatten()
            .find(|id| id.kind.as_deref() == Some(ISBN_13))
            .and_then(|id| id.identifier.as_deref())
    }

    fn into_book(self) -> Book {
        let isbn = self.isbn_13().unwrap_or(NO_ISBN).to_string();

        Book {
            title: self.title.unwrap_or_else(|| NO_TITLE.to_string()),
            author: self.authors.unwrap_or_default().join(", "),
            isbn,
            cover_url: self
                .image_links
                .and_then(|links| links.thumbnail)
                .unwrap_or_default(),
            status: Status::Available,
        }
    }
}

impl Volumes {
    pub fn new(api_url: impl Into<String>, query: impl Into<String>) -> Volumes {
        Volumes {
            api_url: api_url.into(),
            query: query.into(),
            request_data: None,
        }
    }

    #[cfg(test)]
    fn from_body(body: &str) -> Volumes {
        Volumes {
            api_url: String::new(),
            query: String::new(),
            request_data: Some(body.to_string()),
        }
    }
}

impl Parser for Volumes {
    type RequestData = String;
    type ParseData = Vec<Book>;

    fn request_data(&self) -> anyhow::Result<&Self::RequestData> {
        match self.request_data {
            Some(ref rd) => Ok(rd),
            None => Err(anyhow::Error::msg("Can't get request_data")),
        }
    }

    fn url(&self) -> anyhow::Result<String> {
        let url = Url::parse_with_params(&self.api_url, &[("q", self.query.as_str())])
            .with_context(|| format!("invalid books api url `{}`", self.api_url))?;

        Ok(url.to_string())
    }

    fn request(mut self, client: &Client) -> anyhow::Result<Self> {
        trace!("Volumes::request()");
        let url = self.url()?;

        debug!("url = {}", url);

        let body = client.get(&url).send()?.error_for_status()?.text()?;

        self.request_data = Some(body);
        Ok(self)
    }

    fn parse(&self) -> anyhow::Result<Self::ParseData> {
        trace!("Volumes::parse()");
        let response = serde_json::from_str::<VolumesResponse>(self.request_data()?)
            .context("malformed volumes response")?;

        let books = response
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|volume| volume.volume_info.unwrap_or_default().into_book())
            .collect::<Vec<_>>();

        debug!("parsed {} volumes", books.len());

        Ok(books)
    }
}

#[cfg(test)]
mod tests {
    use super::{Parser, Volumes};
    use crate::models::{Book, Status};
    use crate::parser::fixture;

    const DUNE: &str = r#"{
        "kind": "books#volumes",
        "totalItems": 2,
        "items": [
            {
                "volumeInfo": {
                    "title": "Dune",
                    "authors": ["Frank Herbert"],
                    "industryIdentifiers": [
                        { "type": "ISBN_10", "identifier": "0441013597" },
                        { "type": "ISBN_13", "identifier": "9780441013593" }
                    ],
                    "imageLinks": { "thumbnail": "http://books.example/dune.jpg" }
                }
            },
            {
                "volumeInfo": {
                    "title": "Good Omens",
                    "authors": ["Terry Pratchett", "Neil Gaiman"],
                    "industryIdentifiers": [
                        { "type": "ISBN_13", "identifier": "9780060853983" }
                    ]
                }
            }
        ]
    }"#;

    #[test]
    fn parse_volumes() -> anyhow::Result<()> {
        let books = Volumes::from_body(DUNE).parse()?;

        let expected = vec![
            Book {
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                isbn: "9780441013593".to_string(),
                cover_url: "http://books.example/dune.jpg".to_string(),
                status: Status::Available,
            },
            Book {
                title: "Good Omens".to_string(),
                author: "Terry Pratchett, Neil Gaiman".to_string(),
                isbn: "9780060853983".to_string(),
                cover_url: String::new(),
                status: Status::Available,
            },
        ];

        assert_eq!(expected, books);

        Ok(())
    }

    #[test]
    fn parse_volumes_missing_fields() -> anyhow::Result<()> {
        let body = r#"{
            "items": [
                {},
                { "volumeInfo": {} },
                {
                    "volumeInfo": {
                        "authors": null,
                        "industryIdentifiers": [
                            { "type": "ISBN_10", "identifier": "0441013597" },
                            { "type": "OTHER", "identifier": "OCLC:123" }
                        ],
                        "imageLinks": {}
                    }
                },
                {
                    "volumeInfo": {
                        "title": "Unnumbered",
                        "industryIdentifiers": [{ "type": "ISBN_13" }]
                    }
                }
            ]
        }"#;

        let books = Volumes::from_body(body).parse()?;

        assert_eq!(4, books.len());
        for book in &books {
            assert_eq!("No ISBN", book.isbn);
            assert_eq!("", book.author);
            assert_eq!("", book.cover_url);
            assert_eq!(Status::Available, book.status);
        }
        assert_eq!("No Title", books[0].title);
        assert_eq!("No Title", books[2].title);
        assert_eq!("Unnumbered", books[3].title);

        Ok(())
    }

    #[test]
    fn parse_volumes_without_items() -> anyhow::Result<()> {
        let books = Volumes::from_body(r#"{ "kind": "books#volumes", "totalItems": 0 }"#).parse()?;

        assert!(books.is_empty());

        Ok(())
    }

    #[test]
    fn parse_malformed_body() {
        assert!(Volumes::from_body("<html>").parse().is_err());
    }

    #[test]
    fn parse_before_request() {
        assert!(Volumes::new("http://127.0.0.1:1", "fiction").parse().is_err());
    }

    #[test]
    fn url_encodes_query() -> anyhow::Result<()> {
        let volumes = Volumes::new("https://www.googleapis.com/books/v1/volumes", "the hobbit&x");

        assert_eq!(
            "https://www.googleapis.com/books/v1/volumes?q=the+hobbit%26x",
            volumes.url()?
        );

        Ok(())
    }

    #[test]
    fn request_volumes() -> anyhow::Result<()> {
        let (base, requests) = fixture::serve_json(200, DUNE);
        let client = fixture::client()?;

        let volumes = Volumes::new(format!("{}/books/v1/volumes", base), "dune").request(&client)?;
        let books = volumes.parse()?;

        assert_eq!("/books/v1/volumes?q=dune", requests.recv()?);
        assert_eq!(2, books.len());
        assert_eq!("Dune", books[0].title);

        Ok(())
    }

    #[test]
    fn request_volumes_http_error() -> anyhow::Result<()> {
        let (base, _requests) = fixture::serve_json(503, r#"{ "error": "unavailable" }"#);
        let client = fixture::client()?;

        assert!(Volumes::new(base, "dune").request(&client).is_err());

        Ok(())
    }
}
