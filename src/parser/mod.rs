use anyhow;
use reqwest::blocking::Client;

mod cover;
mod volumes;

#[cfg(test)]
pub(crate) mod fixture;

pub use cover::{fetch_image, Cover};
pub use volumes::Volumes;

/// Two-step fetch: `request` downloads and keeps the raw body, `parse` turns
/// the kept body into `ParseData` without touching the network again.
pub trait Parser: Sized {
    type RequestData;
    type ParseData;

    fn request_data(&self) -> anyhow::Result<&Self::RequestData>;

    fn url(&self) -> anyhow::Result<String>;

    fn request(self, client: &Client) -> anyhow::Result<Self>;

    fn parse(&self) -> anyhow::Result<Self::ParseData>;
}
