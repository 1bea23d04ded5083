mod config;
mod input;
mod models;
mod plot;
mod report;
mod run;
mod store;
mod util;

use anyhow::Result;
use std::io;

fn main() -> Result<()> {
    env_logger::init();

    let config = config::Config::from_env()?;
    let store = store::Store::open(&config.store_path)?;
    log::info!("using store {}", store.path().display());

    let today = chrono::Local::now().date_naive();
    let stdin = io::stdin();
    let mut prompter = input::Prompter::new(stdin.lock(), io::stdout(), today);

    run::as_menu(&mut prompter, &store, &mut plot::show)
}
