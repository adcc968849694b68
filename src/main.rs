mod actions;
mod db;
mod ledger;
mod logging;
mod models;
mod projection;
mod run;
mod session;
mod ui;

use anyhow::{Context, Result};
use std::path::PathBuf;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let data_dir = get_data_dir()?;
    logging::init(&data_dir);

    let db = db::Database::open(&data_dir.join("expensetui.db"))?;
    let mut session = session::Session::load(Box::new(db));

    match args.len() {
        1 => run::as_tui(&mut session),
        _ => run::as_cli(&args, &mut session),
    }
}

fn get_data_dir() -> Result<PathBuf> {
    let data_dir = match std::env::var_os("EXPENSETUI_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => directories::ProjectDirs::from("com", "expensetui", "ExpenseTUI")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?
            .data_dir()
            .to_path_buf(),
    };
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir)
}
