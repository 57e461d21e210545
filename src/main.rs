//! MediNova
//!
//! An MCP server for weekly diet plans, exercise plans, and BMI.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use medinova::client::{BackendClient, PlanSource, StorePlanSource};
use medinova::config::Config;
use medinova::db::{self, Database};
use medinova::mcp::MedinovaService;
use medinova::tools::status::{NAME, VERSION};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging goes to stderr so it never interleaves with MCP stdio
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("medinova=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("{} v{} starting MCP server on stdio", NAME, VERSION);

    let config = Config::from_env()?;
    tracing::info!(path = %config.database_path.display(), "Opening plan store");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = Database::open(&config.database_path)?;
    let version = database.with_conn(db::migrations::get_schema_version)?;
    tracing::info!(version, "Database schema ready");

    let source: Arc<dyn PlanSource> = match &config.api_url {
        Some(url) => Arc::new(BackendClient::new(url, config.auth_token.clone())?),
        None => Arc::new(StorePlanSource::new(database.clone())),
    };
    tracing::info!(source = %source.describe(), user_id = config.user_id, "Plan source selected");

    let service = MedinovaService::new(config.database_path, database, source, config.user_id);

    let server = service.serve((stdin(), stdout())).await?;
    server.waiting().await?;

    Ok(())
}
