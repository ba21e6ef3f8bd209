//! Binary entrypoint: open the store, wrap it in the service, serve HTTP.
//!
//! Configuration comes from the environment:
//! - `TZWEB_DB`   — SQLite file path (default `tzweb.db`)
//! - `TZWEB_ADDR` — bind address (default `0.0.0.0:3000`)

use std::env;
use std::error::Error;
use std::sync::Arc;

use log::info;
use tzweb::{http, SqliteRepository, TemporalService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let db_path = env::var("TZWEB_DB").unwrap_or_else(|_| "tzweb.db".to_string());
    let addr = env::var("TZWEB_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let repo = SqliteRepository::open(&db_path)?;
    let service = Arc::new(TemporalService::new(repo));

    info!("serving on {} (database {})", addr, db_path);
    http::serve(service, &addr).await?;
    Ok(())
}
