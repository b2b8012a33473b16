#![forbid(unsafe_code)]

mod api;
mod assets;
mod config;
mod http;
mod logging;
mod pages;
mod routes;
mod server;

use chores_core::LocalCalendar;
use chores_storage::SqliteStore;
use clap::Parser;
use server::{AppState, Server};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The local offset is only observable while the process is single-threaded.
    let calendar = LocalCalendar::detect();

    logging::init();
    let cli = config::Cli::parse();

    let calendar = calendar.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "local UTC offset unavailable; using UTC for calendar days");
        LocalCalendar::utc()
    });

    let store = SqliteStore::open(&cli.db_path).inspect_err(|err| {
        tracing::error!(path = %cli.db_path.display(), error = %err, "failed to initialize database");
    })?;

    let server = Server::bind(cli.bind_addr(), AppState::new(store, calendar)).inspect_err(|err| {
        tracing::error!(host = %cli.host, port = cli.port, error = %err, "failed to bind");
    })?;
    let addr = server.local_addr()?;
    tracing::info!(
        %addr,
        db = %cli.db_path.display(),
        utc_offset = %calendar.offset(),
        "chores server listening"
    );

    let state = server.run()?;
    match Arc::try_unwrap(state) {
        Ok(state) => state.into_store().close()?,
        Err(_) => tracing::warn!("connections still hold the store; closing on drop"),
    }
    Ok(())
}
