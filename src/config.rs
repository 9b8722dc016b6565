use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "bookshelf.toml";
pub const ENV_PREFIX: &str = "BOOKSHELF_";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Base address of the book search API.
    pub api_url: String,
    /// Query used when a search is issued without a term, including at startup.
    pub default_query: String,
    /// Number of cards per row in the book grid.
    pub grid_columns: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: "https://www.googleapis.com/books/v1/volumes".to_string(),
            default_query: "fiction".to_string(),
            grid_columns: 3,
        }
    }
}

impl Config {
    /// Defaults, then `bookshelf.toml` from the working directory, then
    /// `BOOKSHELF_*` environment variables.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }
}
