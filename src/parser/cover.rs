use anyhow;
use bytes::Bytes;
use log::{trace, warn};
use reqwest::blocking::Client;

use super::Parser;
use crate::models::CoverImage;

pub struct Cover {
    url: String,
    request_data: Option<Bytes>,
}

impl Cover {
    pub fn new(url: impl Into<String>) -> Cover {
        Cover {
            url: url.into(),
            request_data: None,
        }
    }
}

impl Parser for Cover {
    type RequestData = Bytes;
    type ParseData = CoverImage;

    fn request_data(&self) -> anyhow::Result<&Self::RequestData> {
        match self.request_data {
            Some(ref rd) => Ok(rd),
            None => Err(anyhow::Error::msg("Can't get request_data")),
        }
    }

    fn url(&self) -> anyhow::Result<String> {
        Ok(self.url.clone())
    }

    fn request(mut self, client: &Client) -> anyhow::Result<Self> {
        trace!("Cover::request()");
        let bytes = client
            .get(self.url()?.as_str())
            .send()?
            .error_for_status()?
            .bytes()?;

        self.request_data = Some(bytes);
        Ok(self)
    }

    fn parse(&self) -> anyhow::Result<Self::ParseData> {
        trace!("Cover::parse()");
        CoverImage::decode(self.request_data()?.clone())
    }
}

/// Downloads and decodes a cover image. Every failure is logged and
/// collapses to `None`.
pub fn fetch_image(client: &Client, url: &str) -> Option<CoverImage> {
    let r = Cover::new(url).request(client).and_then(|cover| cover.parse());

    match r {
        Ok(cover) => Some(cover),
        Err(err) => {
            warn!("Error fetching image {}: {:#}", url, err);
            None
        }
    }
}
