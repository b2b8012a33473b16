#![forbid(unsafe_code)]

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "chores", version, about = "Household chore tracker")]
pub(crate) struct Cli {
    /// SQLite database file; created and seeded on first start.
    #[arg(long, env = "CHORES_DB_PATH", default_value = "chores.db")]
    pub(crate) db_path: PathBuf,

    #[arg(long, env = "CHORES_HOST", default_value = "0.0.0.0")]
    pub(crate) host: String,

    #[arg(long, env = "CHORES_PORT", default_value_t = 5000)]
    pub(crate) port: u16,
}

impl Cli {
    pub(crate) fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}
