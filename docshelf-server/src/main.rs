use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use docshelf_core::{UserID, database::PostgresDatabase, unix_now};
use docshelf_server::{AppState, auth::token::TokenSigner, create_app, infra::config::Config};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "docshelf-server")]
#[command(about = "Library membership and share-link management service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply database migrations and exit
    Migrate,
    /// Print a bearer token for a user (development only)
    IssueToken {
        /// User id the token identifies
        #[arg(long)]
        uid: i64,

        /// Lifetime in seconds
        #[arg(long, default_value_t = 3600)]
        ttl: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(host) = cli.serve.host {
        config.server_host = host;
    }
    if let Some(port) = cli.serve.port {
        config.server_port = port;
    }

    match cli.command {
        Some(Command::Migrate) => run_migrate(&config).await,
        Some(Command::IssueToken { uid, ttl }) => issue_token(&config, uid, ttl),
        None => run_server(config).await,
    }
}

async fn connect(config: &Config) -> anyhow::Result<PostgresDatabase> {
    let url = config.require_database_url()?;
    PostgresDatabase::connect(url, config.database_max_connections)
        .await
        .context("failed to connect to PostgreSQL")
}

async fn run_migrate(config: &Config) -> anyhow::Result<()> {
    let postgres = connect(config).await?;
    postgres.migrate().await.context("database migration failed")?;
    info!("Database migrations applied successfully");
    Ok(())
}

fn issue_token(config: &Config, uid: i64, ttl: i64) -> anyhow::Result<()> {
    anyhow::ensure!(uid > 0, "uid must be positive");
    anyhow::ensure!(ttl > 0, "ttl must be positive");
    if config.uses_default_token_key() {
        warn!("issuing a token with the development key");
    }

    let signer = TokenSigner::new(&config.auth_token_key).context("invalid AUTH_TOKEN_KEY")?;
    println!("{}", signer.issue(UserID(uid), unix_now() + ttl));
    Ok(())
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    if config.uses_default_token_key() && !config.dev_mode {
        warn!("AUTH_TOKEN_KEY is the development default; set it before exposing the server");
    }

    let postgres = Arc::new(connect(&config).await?);
    postgres.migrate().await.context("database migration failed")?;

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port)
        .parse()
        .context("invalid SERVER_HOST/SERVER_PORT")?;

    let state = AppState::with_postgres(postgres, config)?;
    let router = create_app(state);

    info!(%addr, "Starting Docshelf server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["docshelf-server", "issue-token", "--uid", "7"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::IssueToken { uid: 7, ttl: 3600 })
        ));

        let cli = Cli::try_parse_from(["docshelf-server", "migrate"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Migrate)));
    }

    #[test]
    fn serve_flags_override_config() {
        let cli = Cli::try_parse_from(["docshelf-server", "--port", "8080", "--host", "127.0.0.1"])
            .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.serve.port, Some(8080));
        assert_eq!(cli.serve.host.as_deref(), Some("127.0.0.1"));
    }
}
