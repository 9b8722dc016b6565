use std::io;

use anyhow::{self, Context};
use log::{info, warn};

use bookshelf::console::Console;
use bookshelf::{Config, GoogleBooks, Library};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::load().context("Can't load configuration")?;
    info!("books api = {}", config.api_url);

    let source = GoogleBooks::new(&config)?;
    let (mut library, err) = Library::open(source);

    if let Some(err) = err {
        warn!("starting with an empty library");
        eprintln!("Error: {}", err);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock(), config.grid_columns);

    console.run(&mut library)?;

    Ok(())
}
