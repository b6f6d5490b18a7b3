use anyhow::Result;
use clap::{Parser, Subcommand};
use sqlx::migrate::MigrateDatabase;

/// passgate - username/password authentication service
#[derive(Parser)]
#[command(name = "passgate")]
#[command(about = "Registration, login and session tokens for web apps", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = passgate::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    passgate::observability::init_observability(
        "passgate",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
        config.is_production(),
    )?;

    if config.jwt.uses_default_secret() {
        tracing::warn!(
            "Using the built-in development JWT secret; set PASSGATE__JWT__SECRET or SECRET_KEY"
        );
    }

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            passgate::server::serve(config, host, port).await
        }
        Commands::Migrate => migrate_command(&config).await,
        Commands::Reset => reset_command(&config).await,
    }
}

#[tracing::instrument(skip(config))]
async fn migrate_command(config: &passgate::Config) -> Result<()> {
    tracing::info!("Running database migrations...");

    let db_pool = passgate::db::create_pool(&config.database.url, 1).await?;
    passgate::db::migrate(&db_pool).await?;

    tracing::info!("Migrations completed successfully");

    Ok(())
}

#[tracing::instrument(skip(config))]
async fn reset_command(config: &passgate::Config) -> Result<()> {
    tracing::info!("Resetting database...");

    if sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::warn!("Dropping existing database: {}", config.database.url);
        sqlx::Sqlite::drop_database(&config.database.url).await?;
        tracing::info!("Database dropped successfully");
    } else {
        tracing::info!("Database does not exist, nothing to drop");
    }

    migrate_command(config).await?;

    tracing::info!("Database reset completed successfully");

    Ok(())
}
